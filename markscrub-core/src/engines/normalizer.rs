//! Post-substitution cleanup.
//!
//! Substitutions that replace a token with a shorter description, or with
//! nothing, leave double spaces, dangling indentation and empty list items
//! behind. This pass tidies those up. It must only ever run after the whole
//! rule pipeline: several rules match on spacing that this pass would erase.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::config::NormalizerConfig;
use crate::errors::ScrubError;

static HORIZONTAL_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"[ \t]{2,}").expect("static regex"));

// CRLF mode so `\r\n` endings keep their `\r`.
static LEADING_WS: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?mR)^[ \t]+").expect("static regex"));
static TRAILING_WS: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?mR)[ \t]+$").expect("static regex"));

/// Whitespace and empty-element cleanup pass.
#[derive(Debug)]
pub struct Normalizer {
    empty_element_patterns: Vec<Regex>,
}

impl Normalizer {
    pub fn new(config: &NormalizerConfig) -> Result<Self, ScrubError> {
        let mut empty_element_patterns = Vec::with_capacity(config.empty_elements.len());
        for element in &config.empty_elements {
            let name = regex::escape(element);
            let pattern = format!(r"<{name}(?:\s[^<>]*)?>\s*</{name}\s*>");
            let regex = Regex::new(&pattern)
                .map_err(|e| ScrubError::RuleCompilationError(format!("normalizer:{element}"), e))?;
            empty_element_patterns.push(regex);
        }
        Ok(Self { empty_element_patterns })
    }

    /// Removes emptied elements, then collapses and trims horizontal
    /// whitespace line by line.
    ///
    /// Empty elements go first so that the gap an element leaves behind is
    /// collapsed in the same pass, which keeps the pass idempotent.
    pub fn normalize(&self, document: &str) -> String {
        let mut current = document.to_string();
        for pattern in &self.empty_element_patterns {
            current = pattern.replace_all(&current, "").into_owned();
        }
        let collapsed = HORIZONTAL_RUN.replace_all(&current, " ");
        let leading = LEADING_WS.replace_all(&collapsed, "");
        TRAILING_WS.replace_all(&leading, "").into_owned()
    }
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::new(&NormalizerConfig::default()).expect("default normalizer config is valid")
    }
}

/// Normalizes with the default settings (`<li>` is the only removable element).
pub fn normalize(document: &str) -> String {
    Normalizer::default().normalize(document)
}

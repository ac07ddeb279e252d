//! Translation dictionaries for the quote-scoped translator.
//!
//! A dictionary is a list of `(term, translation)` pairs plus the policies
//! the quote scanner needs (escape handling and what to do with a quote that
//! never closes). Dictionaries are loaded from YAML, validated once, and then
//! handed to the translator as immutable values.
//!
//! License: MIT OR Apache-2.0

use anyhow::{Context, Result};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

use crate::errors::ScrubError;

/// One `term -> translation` pair.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct TranslationEntry {
    pub term: String,
    pub translation: String,
}

impl TranslationEntry {
    pub fn new(term: impl Into<String>, translation: impl Into<String>) -> Self {
        Self {
            term: term.into(),
            translation: translation.into(),
        }
    }

    /// Term length in characters, the sort key for application order.
    pub fn term_len(&self) -> usize {
        self.term.chars().count()
    }
}

/// What the translator does with a quote that is still open at end of input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UnterminatedSpanPolicy {
    /// Emit everything from the opening quote onwards verbatim.
    #[default]
    LeaveUntranslated,
    /// Fail the translation with `ScrubError::UnterminatedSpan`.
    Reject,
}

fn default_true() -> bool {
    true
}

/// A complete translation dictionary document.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct DictionaryConfig {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub source_language: Option<String>,
    #[serde(default)]
    pub target_language: Option<String>,
    #[serde(default)]
    pub unterminated_span: UnterminatedSpanPolicy,
    /// A quote preceded by an odd number of backslashes is literal text.
    #[serde(default = "default_true")]
    pub backslash_escapes: bool,
    /// Attribute names whose quoted values are never translated. A trailing
    /// `*` matches any name with that prefix (`data-*`, `on*`).
    #[serde(default)]
    pub protected_attributes: Vec<String>,
    #[serde(default)]
    pub entries: Vec<TranslationEntry>,
}

impl Default for DictionaryConfig {
    fn default() -> Self {
        Self {
            name: String::new(),
            source_language: None,
            target_language: None,
            unterminated_span: UnterminatedSpanPolicy::default(),
            backslash_escapes: true,
            protected_attributes: Vec::new(),
            entries: Vec::new(),
        }
    }
}

impl DictionaryConfig {
    /// Builds an in-memory dictionary from pairs, with default policies.
    pub fn from_pairs<I, T, U>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (T, U)>,
        T: Into<String>,
        U: Into<String>,
    {
        Self {
            entries: pairs
                .into_iter()
                .map(|(term, translation)| TranslationEntry::new(term, translation))
                .collect(),
            ..Self::default()
        }
    }

    /// Loads a dictionary from a YAML file and validates it.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading dictionary from: {}", path.display());
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read dictionary file {}", path.display()))?;
        let config: DictionaryConfig = serde_yml::from_str(&text)
            .with_context(|| format!("Failed to parse dictionary file {}", path.display()))?;

        config.validate()?;
        info!("Loaded {} dictionary entries from {}.", config.entries.len(), path.display());
        Ok(config)
    }

    /// Loads the built-in Dutch to English UI dictionary.
    pub fn load_default() -> Result<Self> {
        debug!("Loading default dictionary from embedded string...");
        let default_yaml = include_str!("../config/ui_dictionary.yaml");
        let config: DictionaryConfig =
            serde_yml::from_str(default_yaml).context("Failed to parse default dictionary")?;

        config.validate()?;
        debug!("Loaded {} default dictionary entries.", config.entries.len());
        Ok(config)
    }

    /// Rejects empty terms and duplicate terms.
    pub fn validate(&self) -> Result<(), ScrubError> {
        let mut seen = HashSet::new();
        let mut errors = Vec::new();

        for (idx, entry) in self.entries.iter().enumerate() {
            if entry.term.is_empty() {
                errors.push(format!("Entry #{} has an empty `term`.", idx + 1));
            } else if entry.term.trim() != entry.term {
                errors.push(format!(
                    "Entry '{}' has leading or trailing whitespace in its term.",
                    entry.term
                ));
            }
            if !entry.term.is_empty() && !seen.insert(entry.term.as_str()) {
                errors.push(format!("Duplicate dictionary term: '{}'.", entry.term));
            }
        }

        for attr in &self.protected_attributes {
            let name = attr.strip_suffix('*').unwrap_or(attr);
            if name.is_empty() || !name.chars().all(is_attribute_name_char) {
                errors.push(format!("Protected attribute '{}' is not a valid attribute name.", attr));
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ScrubError::InvalidDictionary(errors.join("\n")))
        }
    }

    /// True if quoted values of attribute `name` must be left alone.
    pub fn is_protected_attribute(&self, name: &str) -> bool {
        matches_protected_attribute(&self.protected_attributes, name)
    }

    /// Entries in application order: longest term first, ties in
    /// declaration order.
    pub fn application_order(&self) -> Vec<&TranslationEntry> {
        let mut ordered: Vec<&TranslationEntry> = self.entries.iter().collect();
        // `sort_by` is stable, which keeps ties deterministic.
        ordered.sort_by(|a, b| b.term_len().cmp(&a.term_len()));
        ordered
    }
}

/// Characters allowed in an attribute name for protection purposes.
pub fn is_attribute_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | ':' | '.')
}

/// True if `name` matches any of `patterns` (see `protected_attributes`).
pub fn matches_protected_attribute(patterns: &[String], name: &str) -> bool {
    patterns.iter().any(|pattern| attribute_pattern_matches(pattern, name))
}

/// Case-insensitive attribute match; `prefix*` needs at least one more char.
fn attribute_pattern_matches(pattern: &str, name: &str) -> bool {
    match pattern.strip_suffix('*') {
        Some(prefix) => {
            name.len() > prefix.len()
                && name.is_char_boundary(prefix.len())
                && name[..prefix.len()].eq_ignore_ascii_case(prefix)
        }
        None => pattern.eq_ignore_ascii_case(name),
    }
}

/// Layers a user dictionary over a base one.
///
/// Terms already present take the user's translation; new terms are
/// appended. Policies and metadata come from the user dictionary; the
/// protected attribute list is the union of both.
pub fn merge_dictionaries(base: DictionaryConfig, user: Option<DictionaryConfig>) -> DictionaryConfig {
    let Some(user) = user else {
        return base;
    };

    let mut entries = base.entries;
    for user_entry in user.entries {
        match entries.iter_mut().find(|e| e.term == user_entry.term) {
            Some(existing) => existing.translation = user_entry.translation,
            None => entries.push(user_entry),
        }
    }
    debug!("Merged dictionary has {} entries.", entries.len());

    let mut protected_attributes = base.protected_attributes;
    for attr in user.protected_attributes {
        if !protected_attributes.contains(&attr) {
            protected_attributes.push(attr);
        }
    }

    DictionaryConfig {
        name: if user.name.is_empty() { base.name } else { user.name },
        source_language: user.source_language.or(base.source_language),
        target_language: user.target_language.or(base.target_language),
        unterminated_span: user.unterminated_span,
        backslash_escapes: user.backslash_escapes,
        protected_attributes,
        entries,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_dictionary_loads() {
        let dict = DictionaryConfig::load_default().unwrap();
        assert_eq!(dict.entries.len(), 150);
        assert_eq!(dict.unterminated_span, UnterminatedSpanPolicy::LeaveUntranslated);
        assert!(dict.backslash_escapes);
    }

    #[test]
    fn test_application_order_is_longest_first_and_stable() {
        let dict = DictionaryConfig::from_pairs([
            ("taak", "task"),
            ("Nieuwe taak", "New task"),
            ("Taak", "Task"),
            ("Taakbeheer", "Task management"),
        ]);
        let order: Vec<&str> = dict.application_order().iter().map(|e| e.term.as_str()).collect();
        assert_eq!(order, vec!["Nieuwe taak", "Taakbeheer", "taak", "Taak"]);
    }

    #[test]
    fn test_term_length_counts_characters_not_bytes() {
        let dict = DictionaryConfig::from_pairs([("ééé", "x"), ("abcd", "y")]);
        let order: Vec<&str> = dict.application_order().iter().map(|e| e.term.as_str()).collect();
        assert_eq!(order, vec!["abcd", "ééé"]);
    }

    #[test]
    fn test_validate_rejects_duplicates_and_empty_terms() {
        let dict = DictionaryConfig::from_pairs([("taak", "task"), ("taak", "job"), ("", "x")]);
        let err = dict.validate().unwrap_err().to_string();
        assert!(err.contains("Duplicate dictionary term: 'taak'"));
        assert!(err.contains("empty `term`"));
    }

    #[test]
    fn test_protected_attribute_matching() {
        let mut dict = DictionaryConfig::default();
        dict.protected_attributes = vec!["class".into(), "data-*".into(), "on*".into()];
        assert!(dict.is_protected_attribute("class"));
        assert!(dict.is_protected_attribute("CLASS"));
        assert!(dict.is_protected_attribute("data-view"));
        assert!(dict.is_protected_attribute("onclick"));
        assert!(!dict.is_protected_attribute("data-"));
        assert!(!dict.is_protected_attribute("title"));
        assert!(dict.validate().is_ok());

        dict.protected_attributes.push("bad name".into());
        assert!(dict.validate().is_err());
    }

    #[test]
    fn test_merge_overrides_and_appends() {
        let base = DictionaryConfig::from_pairs([("taak", "task"), ("lijst", "list")]);
        let mut user = DictionaryConfig::from_pairs([("taak", "chore"), ("week", "week")]);
        user.unterminated_span = UnterminatedSpanPolicy::Reject;
        let merged = merge_dictionaries(base, Some(user));
        assert_eq!(merged.entries[0], TranslationEntry::new("taak", "chore"));
        assert_eq!(merged.entries[1], TranslationEntry::new("lijst", "list"));
        assert_eq!(merged.entries[2], TranslationEntry::new("week", "week"));
        assert_eq!(merged.unterminated_span, UnterminatedSpanPolicy::Reject);
    }
}

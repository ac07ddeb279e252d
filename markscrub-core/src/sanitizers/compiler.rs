//! compiler.rs - Compiles rewrite rules into ready-to-run regexes.
//!
//! Compilation happens once per rule set, before any document is touched.
//! Every failing rule is collected so a broken configuration is reported in
//! full rather than one error at a time.
//!
//! License: MIT OR APACHE 2.0

use log::{debug, warn};
use regex::{Regex, RegexBuilder};

use crate::config::{RewriteRule, MAX_PATTERN_LENGTH};
use crate::errors::ScrubError;

/// Compiled regex size cap (10 MB).
const REGEX_SIZE_LIMIT: usize = 10 * (1 << 20);

/// A single compiled rewrite rule.
#[derive(Debug)]
pub struct CompiledRule {
    /// The compiled regular expression used for matching.
    pub regex: Regex,
    /// Replacement template; `$n` / `${name}` are expanded per match.
    pub replace_with: String,
    /// The unique name of the rule.
    pub name: String,
    /// Suffixes that veto a match when found directly after it.
    pub not_followed_by: Vec<String>,
    pub case_insensitive: bool,
}

/// Compiled rules in application order.
#[derive(Debug)]
pub struct CompiledRules {
    pub rules: Vec<CompiledRule>,
}

impl CompiledRules {
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

/// Compiles `RewriteRule`s into `CompiledRules`, preserving their order.
///
/// Disabled rules and rules without a pattern are skipped with a warning.
pub fn compile_rules(rules_to_compile: Vec<RewriteRule>) -> Result<CompiledRules, ScrubError> {
    debug!("Starting compilation of {} rules.", rules_to_compile.len());

    let mut compiled_rules = Vec::with_capacity(rules_to_compile.len());
    let mut compilation_errors = Vec::new();

    for rule in rules_to_compile {
        if !rule.is_enabled() {
            debug!("Rule '{}' is disabled, not compiling it.", &rule.name);
            continue;
        }

        let Some(pattern) = rule.pattern.as_ref() else {
            warn!("Skipping rule '{}' because its pattern is missing.", &rule.name);
            continue;
        };

        if pattern.len() > MAX_PATTERN_LENGTH {
            compilation_errors.push(ScrubError::PatternLengthExceeded(
                rule.name,
                pattern.len(),
                MAX_PATTERN_LENGTH,
            ));
            continue;
        }

        let regex_result = RegexBuilder::new(pattern)
            .case_insensitive(rule.case_insensitive)
            .multi_line(rule.multiline)
            .dot_matches_new_line(rule.dot_matches_new_line)
            .size_limit(REGEX_SIZE_LIMIT)
            .build();

        match regex_result {
            Ok(regex) => {
                log::debug!(
                    target: "markscrub_core::compiler",
                    "Rule '{}' compiled successfully.",
                    &rule.name
                );
                compiled_rules.push(CompiledRule {
                    regex,
                    replace_with: rule.replace_with,
                    name: rule.name,
                    not_followed_by: rule.not_followed_by,
                    case_insensitive: rule.case_insensitive,
                });
            }
            Err(e) => {
                compilation_errors.push(ScrubError::RuleCompilationError(rule.name, e));
            }
        }
    }

    if !compilation_errors.is_empty() {
        let error_message = compilation_errors
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<String>>()
            .join("\n");
        return Err(ScrubError::Fatal(format!(
            "Failed to compile {} rule(s):\n{}",
            compilation_errors.len(),
            error_message
        )));
    }

    debug!("Finished compiling rules. Total compiled: {}.", compiled_rules.len());
    Ok(CompiledRules { rules: compiled_rules })
}

//! The ordered rule pipeline.
//!
//! Rules run strictly one after another over the whole document: rule *i+1*
//! only ever sees the output of rule *i*. Every rule replaces all of its
//! non-overlapping matches in one pass. Later rules are written assuming the
//! earlier ones already ran, so the order of the compiled rule list is part
//! of the pipeline's contract.
//!
//! License: MIT OR APACHE 2.0

use log::debug;

use crate::config::{validate_rules, RewriteRule, RewriteSummaryItem, RuleSetConfig};
use crate::errors::ScrubError;
use crate::rewrite_log::{log_rule_match_debug, log_rule_veto_debug};
use crate::sanitizers::compiler::{compile_rules, CompiledRule, CompiledRules};
use crate::sanitizers::guards::is_vetoed_by_suffix;

const MODULE_PATH: &str = "markscrub_core::pipeline";

/// A compiled, immutable, ordered list of rewrite rules.
#[derive(Debug)]
pub struct RulePipeline {
    compiled: CompiledRules,
}

impl RulePipeline {
    /// Compiles `rules` in the given order. Fails on the first invalid
    /// configuration, before any document is processed.
    pub fn new(rules: Vec<RewriteRule>) -> Result<Self, ScrubError> {
        let compiled = compile_rules(rules)?;
        Ok(Self { compiled })
    }

    /// Validates a full rule set and compiles its rules.
    pub fn from_config(config: &RuleSetConfig) -> Result<Self, ScrubError> {
        validate_rules(config)?;
        Self::new(config.rules.clone())
    }

    /// Runs every rule over `document` and returns the result.
    pub fn apply(&self, document: &str) -> String {
        apply_rules(document, &self.compiled)
    }

    /// Like [`RulePipeline::apply`], also reporting how often each rule fired.
    pub fn apply_with_summary(&self, document: &str) -> (String, Vec<RewriteSummaryItem>) {
        let mut current = document.to_string();
        let mut summary = Vec::new();

        for rule in &self.compiled.rules {
            let (next, occurrences) = apply_rule(rule, &current);
            if occurrences > 0 {
                summary.push(RewriteSummaryItem {
                    name: rule.name.clone(),
                    occurrences,
                });
                current = next;
            }
        }
        (current, summary)
    }

    /// Names of the compiled rules in application order. Disabled and
    /// pattern-less rules are absent.
    pub fn rule_names(&self) -> impl Iterator<Item = &str> {
        self.compiled.rules.iter().map(|r| r.name.as_str())
    }

    /// Zero-based position of a rule in application order.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.compiled.rules.iter().position(|r| r.name == name)
    }

    pub fn len(&self) -> usize {
        self.compiled.len()
    }

    pub fn is_empty(&self) -> bool {
        self.compiled.is_empty()
    }
}

/// Applies compiled rules to `document` in order.
pub fn apply_rules(document: &str, rules: &CompiledRules) -> String {
    let mut current = document.to_string();
    for rule in &rules.rules {
        let (next, occurrences) = apply_rule(rule, &current);
        if occurrences > 0 {
            current = next;
        }
    }
    current
}

/// Replaces every non-vetoed match of one rule. Returns the rewritten text
/// and the number of replacements made.
pub fn apply_rule(rule: &CompiledRule, document: &str) -> (String, usize) {
    let mut output = String::with_capacity(document.len());
    let mut last_end = 0usize;
    let mut occurrences = 0usize;

    for caps in rule.regex.captures_iter(document) {
        let Some(whole) = caps.get(0) else { continue };

        if !rule.not_followed_by.is_empty()
            && is_vetoed_by_suffix(document, whole.end(), &rule.not_followed_by, rule.case_insensitive)
        {
            log_rule_veto_debug(MODULE_PATH, &rule.name, whole.as_str());
            continue;
        }

        output.push_str(&document[last_end..whole.start()]);
        let replacement_start = output.len();
        caps.expand(&rule.replace_with, &mut output);
        log_rule_match_debug(MODULE_PATH, &rule.name, whole.as_str(), &output[replacement_start..]);

        last_end = whole.end();
        occurrences += 1;
    }

    if occurrences == 0 {
        return (document.to_string(), 0);
    }

    output.push_str(&document[last_end..]);
    debug!("Rule '{}' applied {} time(s).", rule.name, occurrences);
    (output, occurrences)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pipeline(rules: &[(&str, &str, &str)]) -> RulePipeline {
        RulePipeline::new(
            rules
                .iter()
                .map(|(name, pattern, replacement)| RewriteRule::new(*name, *pattern, *replacement))
                .collect(),
        )
        .unwrap()
    }

    #[test]
    fn test_rule_replaces_every_occurrence() {
        let p = pipeline(&[("b2", r"\bB2\b", "cloud storage")]);
        assert_eq!(p.apply("B2 and B2 again"), "cloud storage and cloud storage again");
    }

    #[test]
    fn test_zero_matches_is_a_no_op() {
        let p = pipeline(&[("b2", r"\bB2\b", "cloud storage")]);
        assert_eq!(p.apply("nothing to see"), "nothing to see");
        let (out, summary) = p.apply_with_summary("nothing to see");
        assert_eq!(out, "nothing to see");
        assert!(summary.is_empty());
    }

    #[test]
    fn test_capture_groups_are_expanded_per_match() {
        let p = pipeline(&[("file_line", r"(\w+)\.js:(\d+)", "$1 module")]);
        assert_eq!(p.apply("see app.js:12 and db.js:7"), "see app module and db module");
    }

    #[test]
    fn test_each_rule_sees_previous_output() {
        let p = pipeline(&[("one", "alpha", "beta"), ("two", "beta", "gamma")]);
        assert_eq!(p.apply("alpha"), "gamma");
    }

    #[test]
    fn test_not_followed_by_veto_leaves_match_in_place() {
        let mut rule = RewriteRule::new("vercel", r"\bVercel\b", "hosting platform");
        rule.case_insensitive = true;
        rule.not_followed_by = vec![" deployment".to_string()];
        let p = RulePipeline::new(vec![rule]).unwrap();
        assert_eq!(
            p.apply("Vercel deployment on vercel"),
            "Vercel deployment on hosting platform"
        );
    }

    #[test]
    fn test_summary_counts_per_rule_in_order() {
        let p = pipeline(&[("x", "x", "y"), ("none", "zzz", ""), ("y", "y", "w")]);
        let (out, summary) = p.apply_with_summary("x x");
        assert_eq!(out, "w w");
        assert_eq!(
            summary,
            vec![
                RewriteSummaryItem { name: "x".into(), occurrences: 2 },
                RewriteSummaryItem { name: "y".into(), occurrences: 2 },
            ]
        );
    }

    #[test]
    fn test_from_config_rejects_invalid_pattern_eagerly() {
        let config = RuleSetConfig {
            rules: vec![RewriteRule::new("bad", "(oops", "")],
            ..RuleSetConfig::default()
        };
        let err = RulePipeline::from_config(&config).unwrap_err();
        assert!(err.is_configuration_error());
    }
}

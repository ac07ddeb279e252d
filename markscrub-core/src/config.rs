//! Configuration management for `markscrub-core`.
//!
//! This module defines the rule records that drive sanitization and the
//! rule-set container they live in. It handles YAML (de)serialization and
//! provides utilities for loading, merging, filtering and validating rule
//! sets. Rule order is significant everywhere in this module: a rule set is
//! an ordered pipeline, never a bag of rules.
//!
//! License: MIT OR Apache-2.0

use anyhow::{Context, Result};
use log::{debug, info, warn};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::path::Path;

use crate::errors::ScrubError;

/// Maximum allowed length for a regex pattern string.
pub const MAX_PATTERN_LENGTH: usize = 500;

// Same grammar `Captures::expand` uses: `$$` is a literal dollar, `$name`
// takes the longest `[_0-9A-Za-z]` run, `${name}` is braced.
static CAPTURE_REF_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\$\$|\$(?:([A-Za-z0-9_]+)|\{([A-Za-z0-9_]+)\})").expect("static regex"));

static ELEMENT_NAME_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z][A-Za-z0-9-]*$").expect("static regex"));

/// What kind of sensitive detail a rule generalizes.
///
/// Purely descriptive: the pipeline never branches on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum RuleCategory {
    Endpoint,
    SchemaIdentifier,
    TableName,
    IndexName,
    FileLocation,
    FunctionName,
    SqlFragment,
    ServiceName,
    SessionDetail,
    ClassName,
    MiddlewareConfig,
    TestArtifact,
    DatetimeApi,
    BuildArtifact,
    ExternalResource,
}

impl RuleCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            RuleCategory::Endpoint => "endpoint",
            RuleCategory::SchemaIdentifier => "schema-identifier",
            RuleCategory::TableName => "table-name",
            RuleCategory::IndexName => "index-name",
            RuleCategory::FileLocation => "file-location",
            RuleCategory::FunctionName => "function-name",
            RuleCategory::SqlFragment => "sql-fragment",
            RuleCategory::ServiceName => "service-name",
            RuleCategory::SessionDetail => "session-detail",
            RuleCategory::ClassName => "class-name",
            RuleCategory::MiddlewareConfig => "middleware-config",
            RuleCategory::TestArtifact => "test-artifact",
            RuleCategory::DatetimeApi => "datetime-api",
            RuleCategory::BuildArtifact => "build-artifact",
            RuleCategory::ExternalResource => "external-resource",
        }
    }
}

impl fmt::Display for RuleCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single rewrite rule: one step of the sanitization pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct RewriteRule {
    /// Unique identifier for the rule (e.g., "api_path_with_method").
    pub name: String,
    /// Human-readable description of what the rule targets.
    pub description: Option<String>,
    pub category: Option<RuleCategory>,
    /// The regex pattern string.
    pub pattern: Option<String>,
    /// Replacement text. `$1` / `${name}` expand to captured groups.
    pub replace_with: String,
    pub case_insensitive: bool,
    /// If true, `^` and `$` match at line boundaries.
    pub multiline: bool,
    /// If true, the dot character `.` in regex will match newlines.
    pub dot_matches_new_line: bool,
    /// Literal suffixes that veto a match when they directly follow it.
    pub not_followed_by: Vec<String>,
    /// Explicit override for enabling/disabling the rule.
    pub enabled: Option<bool>,
    pub tags: Option<Vec<String>>,
}

impl RewriteRule {
    /// Convenience constructor used heavily by tests and synthetic rule sets.
    pub fn new(name: impl Into<String>, pattern: impl Into<String>, replace_with: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            pattern: Some(pattern.into()),
            replace_with: replace_with.into(),
            ..Self::default()
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled != Some(false)
    }
}

/// Settings for the post-substitution cleanup pass.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct NormalizerConfig {
    /// Element names removed when they contain nothing but whitespace.
    pub empty_elements: Vec<String>,
}

impl Default for NormalizerConfig {
    fn default() -> Self {
        Self {
            empty_elements: vec!["li".to_string()],
        }
    }
}

/// The top-level rule-set document: ordered rules plus normalizer settings.
#[derive(Debug, Default, Deserialize, Serialize, Clone, PartialEq)]
pub struct RuleSetConfig {
    /// Rules in application order.
    pub rules: Vec<RewriteRule>,
    #[serde(default)]
    pub normalizer: NormalizerConfig,
}

/// A per-rule (or per-term) tally reported after a rewrite.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewriteSummaryItem {
    /// Rule name for sanitization, dictionary term for translation.
    pub name: String,
    pub occurrences: usize,
}

impl RuleSetConfig {
    /// Loads a rule set from a YAML file and validates it.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading rule set from: {}", path.display());
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read rule set file {}", path.display()))?;
        let config: RuleSetConfig = serde_yml::from_str(&text)
            .with_context(|| format!("Failed to parse rule set file {}", path.display()))?;

        validate_rules(&config)?;
        info!("Loaded {} rules from file {}.", config.rules.len(), path.display());
        Ok(config)
    }

    /// Loads the built-in changelog sanitization rules.
    pub fn load_default_rules() -> Result<Self> {
        debug!("Loading default rules from embedded string...");
        let default_yaml = include_str!("../config/sanitize_rules.yaml");
        let config: RuleSetConfig =
            serde_yml::from_str(default_yaml).context("Failed to parse default rules")?;

        validate_rules(&config)?;
        debug!("Loaded {} default rules.", config.rules.len());
        Ok(config)
    }

    /// Drops rules named in `disable_rules`, keeping the order of the rest.
    pub fn set_disabled_rules(&mut self, disable_rules: &[String]) {
        let disable_set: HashSet<&str> = disable_rules.iter().map(String::as_str).collect();
        let all_rule_names: HashSet<&str> = self.rules.iter().map(|r| r.name.as_str()).collect();

        for rule_name in disable_set.difference(&all_rule_names) {
            warn!("Rule '{}' in disable list does not exist.", rule_name);
        }

        self.rules.retain(|rule| !disable_set.contains(rule.name.as_str()));
        debug!("Active rules count after filtering: {}", self.rules.len());
    }

    /// Position of a rule in application order.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.rules.iter().position(|r| r.name == name)
    }
}

/// Merges a user rule set over the defaults.
///
/// A user rule whose name matches a default rule replaces it at the default
/// rule's position; any other user rule is appended after all defaults, in
/// the user's order. The user's normalizer settings win when present.
pub fn merge_rules(default_config: RuleSetConfig, user_config: Option<RuleSetConfig>) -> RuleSetConfig {
    debug!("merge_rules called. Initial default rules count: {}", default_config.rules.len());

    let Some(user_cfg) = user_config else {
        return default_config;
    };

    let mut final_rules = default_config.rules;
    let mut appended = 0usize;
    for user_rule in user_cfg.rules {
        match final_rules.iter_mut().find(|r| r.name == user_rule.name) {
            Some(existing) => {
                debug!("User rule '{}' overrides default rule in place.", user_rule.name);
                *existing = user_rule;
            }
            None => {
                final_rules.push(user_rule);
                appended += 1;
            }
        }
    }
    debug!("Final total rules after merge: {} ({} appended).", final_rules.len(), appended);

    RuleSetConfig {
        rules: final_rules,
        normalizer: user_cfg.normalizer,
    }
}

/// Validates rule integrity: names, patterns, capture references and
/// normalizer element names. All problems are collected into one error.
pub fn validate_rules(config: &RuleSetConfig) -> Result<(), ScrubError> {
    let mut rule_names = HashSet::new();
    let mut errors = Vec::new();

    for rule in &config.rules {
        if rule.name.is_empty() {
            errors.push("A rule has an empty `name` field.".to_string());
        } else if !rule_names.insert(rule.name.as_str()) {
            errors.push(format!("Duplicate rule name found: '{}'.", rule.name));
        }

        let pattern = match &rule.pattern {
            Some(p) if !p.is_empty() => p,
            Some(_) => {
                errors.push(format!("Rule '{}' has an empty `pattern` field.", rule.name));
                continue;
            }
            None => {
                errors.push(format!("Rule '{}' is missing the `pattern` field.", rule.name));
                continue;
            }
        };

        let regex = match Regex::new(pattern) {
            Ok(r) => r,
            Err(e) => {
                errors.push(format!("Rule '{}' has an invalid regex pattern: {}", rule.name, e));
                continue;
            }
        };

        let group_count = regex.captures_len() - 1;
        let group_names: HashSet<&str> = regex.capture_names().flatten().collect();
        for cap in CAPTURE_REF_REGEX.captures_iter(&rule.replace_with) {
            let Some(reference) = cap.get(1).or_else(|| cap.get(2)) else {
                continue;
            };
            match reference.as_str().parse::<usize>() {
                Ok(num) if num > group_count => errors.push(format!(
                    "Rule '{}': replacement references non-existent capture group '${}'.",
                    rule.name, num
                )),
                Ok(_) => {}
                Err(_) if !group_names.contains(reference.as_str()) => errors.push(format!(
                    "Rule '{}': replacement references unknown named group '{}' (use `${{1}}` to follow a group number with text).",
                    rule.name,
                    reference.as_str()
                )),
                Err(_) => {}
            }
        }

        if rule.not_followed_by.iter().any(String::is_empty) {
            errors.push(format!("Rule '{}' has an empty `not_followed_by` entry.", rule.name));
        }
    }

    for element in &config.normalizer.empty_elements {
        if !ELEMENT_NAME_REGEX.is_match(element) {
            errors.push(format!("Normalizer element name '{}' is not a valid tag name.", element));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ScrubError::InvalidRuleSet(errors.join("\n")))
    }
}

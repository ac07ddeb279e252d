// markscrub-core/tests/config_integration_tests.rs
use anyhow::Result;
use std::io::Write;
use tempfile::NamedTempFile;

use markscrub_core::config::{self, RewriteRule, RuleCategory, RuleSetConfig};
use markscrub_core::{merge_dictionaries, DictionaryConfig, UnterminatedSpanPolicy};

fn write_temp(content: &str) -> Result<NamedTempFile> {
    let mut file = NamedTempFile::new()?;
    file.write_all(content.as_bytes())?;
    Ok(file)
}

#[test]
fn test_load_default_rules() {
    let config = RuleSetConfig::load_default_rules().unwrap();
    assert!(!config.rules.is_empty());
    let vercel = config.rules.iter().find(|r| r.name == "svc_vercel").unwrap();
    assert!(vercel.case_insensitive);
    assert_eq!(vercel.category, Some(RuleCategory::ServiceName));
    assert_eq!(config.normalizer.empty_elements, vec!["li".to_string()]);
}

#[test]
fn test_load_from_file() -> Result<()> {
    let yaml_content = r#"
rules:
  - name: internal_host
    category: external-resource
    pattern: 'intranet\.example\.com'
    replace_with: "internal host"
    not_followed_by: ["/public"]
  - name: ticket_ref
    pattern: 'JIRA-(\d+)'
    replace_with: "ticket $1"
normalizer:
  empty_elements: ["li", "p"]
"#;
    let file = write_temp(yaml_content)?;
    let config = RuleSetConfig::load_from_file(file.path())?;
    assert_eq!(config.rules.len(), 2);
    assert_eq!(config.rules[0].name, "internal_host");
    assert_eq!(config.rules[0].not_followed_by, vec!["/public".to_string()]);
    assert_eq!(config.rules[1].pattern, Some(r"JIRA-(\d+)".to_string()));
    assert!(!config.rules[1].case_insensitive);
    assert!(config.rules[1].is_enabled());
    assert_eq!(config.normalizer.empty_elements, vec!["li".to_string(), "p".to_string()]);
    Ok(())
}

#[test]
fn test_load_from_file_rejects_bad_capture_reference() -> Result<()> {
    let yaml_content = r#"
rules:
  - name: bad_ref
    pattern: 'JIRA-\d+'
    replace_with: "ticket $1"
"#;
    let file = write_temp(yaml_content)?;
    let err = RuleSetConfig::load_from_file(file.path()).unwrap_err();
    assert!(format!("{:#}", err).contains("bad_ref"));
    Ok(())
}

#[test]
fn test_load_from_file_rejects_malformed_yaml() -> Result<()> {
    let file = write_temp("rules: [ this is : not valid")?;
    let err = RuleSetConfig::load_from_file(file.path()).unwrap_err();
    assert!(err.to_string().contains("Failed to parse rule set file"));
    Ok(())
}

#[test]
fn test_merge_keeps_default_order() {
    let defaults = RuleSetConfig {
        rules: vec![
            RewriteRule::new("a", "a", "A"),
            RewriteRule::new("b", "b", "B"),
            RewriteRule::new("c", "c", "C"),
        ],
        ..RuleSetConfig::default()
    };
    let user = RuleSetConfig {
        rules: vec![RewriteRule::new("z", "z", "Z"), RewriteRule::new("b", "bb", "BB")],
        ..RuleSetConfig::default()
    };

    let merged = config::merge_rules(defaults, Some(user));
    let names: Vec<&str> = merged.rules.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["a", "b", "c", "z"]);
    assert_eq!(merged.rules[1].pattern.as_deref(), Some("bb"));
}

#[test]
fn test_merge_without_user_rules_is_identity() {
    let defaults = RuleSetConfig::load_default_rules().unwrap();
    let merged = config::merge_rules(defaults.clone(), None);
    assert_eq!(merged, defaults);
}

#[test]
fn test_set_disabled_rules_preserves_order() {
    let mut config = RuleSetConfig::load_default_rules().unwrap();
    let before = config.rules.len();
    config.set_disabled_rules(&["svc_b2".to_string(), "no_such_rule".to_string()]);
    assert_eq!(config.rules.len(), before - 1);
    assert!(config.position("svc_b2").is_none());
    assert!(config.position("svc_b2_qualified") < config.position("svc_mailgun"));
}

#[test]
fn test_disabled_flag_is_respected_by_compiler() -> Result<()> {
    let yaml_content = r#"
rules:
  - name: off
    pattern: 'foo'
    replace_with: "bar"
    enabled: false
  - name: on
    pattern: 'baz'
    replace_with: "qux"
"#;
    let file = write_temp(yaml_content)?;
    let config = RuleSetConfig::load_from_file(file.path())?;
    let compiled = markscrub_core::compile_rules(config.rules)?;
    assert_eq!(compiled.len(), 1);
    assert_eq!(compiled.rules[0].name, "on");
    Ok(())
}

#[test]
fn test_dictionary_load_from_file_and_merge() -> Result<()> {
    let yaml_content = r#"
name: extra
unterminated_span: reject
protected_attributes: ["aria-*"]
entries:
  - { term: "Taak", translation: "Job" }
  - { term: "Herinnering", translation: "Reminder" }
"#;
    let file = write_temp(yaml_content)?;
    let user = DictionaryConfig::load_from_file(file.path())?;
    assert!(user.backslash_escapes);

    let base = DictionaryConfig::load_default()?;
    let base_len = base.entries.len();
    let merged = merge_dictionaries(base, Some(user));

    assert_eq!(merged.name, "extra");
    assert_eq!(merged.unterminated_span, UnterminatedSpanPolicy::Reject);
    assert!(merged.is_protected_attribute("class"));
    assert!(merged.is_protected_attribute("aria-label"));
    assert_eq!(merged.entries.len(), base_len + 1);
    assert!(merged.entries.iter().any(|e| e.term == "Taak" && e.translation == "Job"));
    Ok(())
}

#[test]
fn test_dictionary_load_rejects_duplicates() -> Result<()> {
    let yaml_content = r#"
entries:
  - { term: "taak", translation: "task" }
  - { term: "taak", translation: "job" }
"#;
    let file = write_temp(yaml_content)?;
    assert!(DictionaryConfig::load_from_file(file.path()).is_err());
    Ok(())
}

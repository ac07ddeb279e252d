// markscrub/src/commands/rules.rs
//! `markscrub rules`: resolve and list the effective rule set.

use anyhow::{Context, Result};
use is_terminal::IsTerminal;
use log::info;
use std::collections::HashSet;
use std::io;
use std::path::Path;

use markscrub_core::config::{merge_rules, validate_rules, RuleSetConfig};
use markscrub_core::RulePipeline;

use crate::ui::summary::new_table;

/// Built-in rules, with the rule set at `rules_path` merged over them and
/// the `disable` names removed. The result is validated as a whole.
pub fn load_rule_set(rules_path: Option<&Path>, disable: &[String]) -> Result<RuleSetConfig> {
    let defaults = RuleSetConfig::load_default_rules().context("Failed to load built-in rules")?;
    let user = rules_path.map(RuleSetConfig::load_from_file).transpose()?;
    if user.is_some() {
        info!("Merging user rules over {} built-in rules.", defaults.rules.len());
    }

    let mut config = merge_rules(defaults, user);
    if !disable.is_empty() {
        config.set_disabled_rules(disable);
    }
    validate_rules(&config).context("Merged rule set is invalid")?;
    Ok(config)
}

pub fn run_rules(rules_path: Option<&Path>) -> Result<()> {
    let config = load_rule_set(rules_path, &[])?;
    let pipeline = RulePipeline::from_config(&config).context("Failed to compile the rule set")?;
    let active: HashSet<&str> = pipeline.rule_names().collect();
    let stdout = io::stdout();
    let enable_colors = stdout.is_terminal();

    let mut table = new_table(&["#", "Rule", "Category", "Pattern", "Enabled"], enable_colors);
    for (idx, rule) in config.rules.iter().enumerate() {
        table.add_row(vec![
            (idx + 1).to_string(),
            rule.name.clone(),
            rule.category.map(|c| c.to_string()).unwrap_or_default(),
            rule.pattern.clone().unwrap_or_default(),
            if active.contains(rule.name.as_str()) { "yes" } else { "no" }.to_string(),
        ]);
    }
    println!("{}", table);
    println!(
        "{} of {} rule(s) active, applied top to bottom.",
        pipeline.len(),
        config.rules.len()
    );
    Ok(())
}

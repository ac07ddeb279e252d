// markscrub/src/commands/dictionary.rs
//! `markscrub dictionary`: resolve and list the effective dictionary.

use anyhow::{Context, Result};
use is_terminal::IsTerminal;
use std::io;
use std::path::Path;

use markscrub_core::{merge_dictionaries, DictionaryConfig};

use crate::ui::summary::new_table;

/// Built-in dictionary with the one at `path` merged over it.
pub fn load_dictionary(path: Option<&Path>) -> Result<DictionaryConfig> {
    let base = DictionaryConfig::load_default().context("Failed to load built-in dictionary")?;
    let user = path.map(DictionaryConfig::load_from_file).transpose()?;
    let merged = merge_dictionaries(base, user);
    merged.validate().context("Merged dictionary is invalid")?;
    Ok(merged)
}

pub fn run_dictionary(path: Option<&Path>) -> Result<()> {
    let dictionary = load_dictionary(path)?;
    let enable_colors = io::stdout().is_terminal();

    let mut table = new_table(&["#", "Term", "Translation"], enable_colors);
    for (idx, entry) in dictionary.application_order().into_iter().enumerate() {
        table.add_row(vec![(idx + 1).to_string(), entry.term.clone(), entry.translation.clone()]);
    }
    println!("{}", table);
    println!(
        "{} entr{} ({} -> {}), longest term first.",
        dictionary.entries.len(),
        if dictionary.entries.len() == 1 { "y" } else { "ies" },
        dictionary.source_language.as_deref().unwrap_or("?"),
        dictionary.target_language.as_deref().unwrap_or("?"),
    );
    if !dictionary.protected_attributes.is_empty() {
        println!("Protected attributes: {}", dictionary.protected_attributes.join(", "));
    }
    Ok(())
}

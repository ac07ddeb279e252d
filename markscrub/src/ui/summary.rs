// markscrub/src/ui/summary.rs
//! Occurrence tables for rules and dictionary terms.

use comfy_table::presets::{ASCII_MARKDOWN, UTF8_FULL};
use comfy_table::{Cell, ContentArrangement, Table};
use std::io::{self, Write};

use markscrub_core::RewriteSummaryItem;

/// Builds an empty table with the given header, styled for a terminal or
/// for plain output.
pub fn new_table(header: &[&str], enable_colors: bool) -> Table {
    let mut table = Table::new();
    table
        .load_preset(if enable_colors { UTF8_FULL } else { ASCII_MARKDOWN })
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(header.iter().map(|h| Cell::new(*h)));
    table
}

/// Prints one row per item. `label` names the first column ("Rule" or "Term").
pub fn print_summary(
    label: &str,
    items: &[RewriteSummaryItem],
    writer: &mut dyn Write,
    enable_colors: bool,
) -> io::Result<()> {
    if items.is_empty() {
        return writeln!(writer, "Nothing was replaced.");
    }

    let mut table = new_table(&[label, "Occurrences"], enable_colors);
    for item in items {
        table.add_row(vec![Cell::new(&item.name), Cell::new(item.occurrences)]);
    }
    let total: usize = items.iter().map(|i| i.occurrences).sum();
    writeln!(writer, "{}", table)?;
    writeln!(writer, "{} replacement(s) by {} {}(s).", total, items.len(), label.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_lists_items_and_total() {
        let items = vec![
            RewriteSummaryItem { name: "svc_vercel".into(), occurrences: 2 },
            RewriteSummaryItem { name: "svc_neon".into(), occurrences: 1 },
        ];
        let mut out = Vec::new();
        print_summary("Rule", &items, &mut out, false).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("svc_vercel"));
        assert!(text.contains("svc_neon"));
        assert!(text.contains("3 replacement(s) by 2 rule(s)."));
    }

    #[test]
    fn test_empty_summary() {
        let mut out = Vec::new();
        print_summary("Term", &[], &mut out, false).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "Nothing was replaced.\n");
    }
}

// markscrub/src/ui/diff_viewer.rs
//! Unified diff between a document and its rewritten version.

use diffy::{create_patch, Line as DiffLine};
use owo_colors::OwoColorize;
use std::io::{self, Write};

/// Writes a unified diff of `original` against `rewritten`.
///
/// Removed lines are red and added lines green when `enable_colors` is set.
/// Prints a single note instead when nothing changed.
pub fn print_diff(
    original: &str,
    rewritten: &str,
    writer: &mut dyn Write,
    enable_colors: bool,
) -> io::Result<()> {
    if original == rewritten {
        return writeln!(writer, "No changes.");
    }

    let patch = create_patch(original, rewritten);
    let header = ["--- original", "+++ rewritten"];
    for line in header {
        if enable_colors {
            writeln!(writer, "{}", line.bold())?;
        } else {
            writeln!(writer, "{}", line)?;
        }
    }

    for hunk in patch.hunks() {
        let old = hunk.old_range();
        let new = hunk.new_range();
        let range = format!("@@ -{},{} +{},{} @@", old.start(), old.len(), new.start(), new.len());
        if enable_colors {
            writeln!(writer, "{}", range.cyan())?;
        } else {
            writeln!(writer, "{}", range)?;
        }

        for line in hunk.lines() {
            let (marker, text) = match line {
                DiffLine::Delete(s) => ('-', *s),
                DiffLine::Insert(s) => ('+', *s),
                DiffLine::Context(s) => (' ', *s),
            };
            let text = text.strip_suffix('\n').unwrap_or(text);
            match (marker, enable_colors) {
                ('-', true) => writeln!(writer, "{}", format!("-{}", text).red())?,
                ('+', true) => writeln!(writer, "{}", format!("+{}", text).green())?,
                _ => writeln!(writer, "{}{}", marker, text)?,
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_diff_marks_changed_lines() {
        let mut out = Vec::new();
        print_diff("a\nVercel\nc\n", "a\nhosting platform\nc\n", &mut out, false).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("-Vercel\n"));
        assert!(text.contains("+hosting platform\n"));
        assert!(text.contains(" a\n"));
        assert!(!text.contains('\u{1b}'));
    }

    #[test]
    fn test_identical_input_reports_no_changes() {
        let mut out = Vec::new();
        print_diff("same", "same", &mut out, true).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "No changes.\n");
    }
}

// File: markscrub-core/src/sanitizers/guards.rs
//! Post-match guards applied after a regex has matched.
//!
//! The `regex` crate has no look-around, so a rule such as "replace `Vercel`
//! unless it is followed by ` deployment`" matches `Vercel` and then asks
//! this module whether the text after the match vetoes it.
//!
//! License: MIT OR APACHE 2.0

/// Returns `true` if `text` begins with `prefix`, comparing characters
/// case-insensitively.
pub fn starts_with_ignore_case(text: &str, prefix: &str) -> bool {
    let mut text_chars = text.chars();
    for p in prefix.chars() {
        match text_chars.next() {
            Some(c) if c.to_lowercase().eq(p.to_lowercase()) => {}
            _ => return false,
        }
    }
    true
}

/// Checks whether a match ending at byte `end` of `haystack` is directly
/// followed by one of `suffixes`.
///
/// # Arguments
///
/// * `haystack` - The full text the match was found in.
/// * `end` - Byte offset one past the match.
/// * `suffixes` - Literal suffixes that veto the match.
/// * `case_insensitive` - Compare ignoring case, mirroring the rule's own flag.
pub fn is_vetoed_by_suffix(haystack: &str, end: usize, suffixes: &[String], case_insensitive: bool) -> bool {
    let Some(rest) = haystack.get(end..) else {
        return false;
    };
    suffixes.iter().any(|suffix| {
        if case_insensitive {
            starts_with_ignore_case(rest, suffix)
        } else {
            rest.starts_with(suffix.as_str())
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn suffixes(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_suffix_veto_exact_case() {
        let text = "Vercel deployment done";
        assert!(is_vetoed_by_suffix(text, 6, &suffixes(&[" deployment"]), false));
        assert!(!is_vetoed_by_suffix(text, 6, &suffixes(&[" cache"]), false));
    }

    #[test]
    fn test_suffix_veto_ignores_case_when_asked() {
        let text = "vercel DEPLOYMENT";
        assert!(!is_vetoed_by_suffix(text, 6, &suffixes(&[" deployment"]), false));
        assert!(is_vetoed_by_suffix(text, 6, &suffixes(&[" deployment"]), true));
    }

    #[test]
    fn test_suffix_veto_at_end_of_text() {
        assert!(!is_vetoed_by_suffix("Neon", 4, &suffixes(&[" database"]), true));
    }

    #[test]
    fn test_starts_with_ignore_case_shorter_text() {
        assert!(!starts_with_ignore_case(" data", " database"));
        assert!(starts_with_ignore_case("ÉCOLE libre", "école"));
    }
}

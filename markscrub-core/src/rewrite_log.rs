// markscrub-core/src/rewrite_log.rs
//! Debug logging helpers for rewrite events.
//!
//! The text a sanitization rule matches is, by definition, something that
//! should not leak. Debug logs therefore show a length marker instead of the
//! matched text unless `MARKSCRUB_ALLOW_DEBUG_MATCHES=true` is set.

use lazy_static::lazy_static;
use log::debug;

lazy_static! {
    /// Read once: whether matched text may appear in debug logs.
    static ref MATCH_DEBUG_ALLOWED: bool = {
        std::env::var("MARKSCRUB_ALLOW_DEBUG_MATCHES")
            .map(|s| s.eq_ignore_ascii_case("true"))
            .unwrap_or(false)
    };
}

pub fn redact_sensitive(s: &str) -> String {
    const MAX_LEN: usize = 8;
    if s.len() <= MAX_LEN {
        "[HIDDEN]".to_string()
    } else {
        format!("[HIDDEN: {} chars]", s.len())
    }
}

fn get_loggable_content(sensitive_content: &str) -> String {
    if *MATCH_DEBUG_ALLOWED {
        sensitive_content.to_string()
    } else {
        redact_sensitive(sensitive_content)
    }
}

pub fn log_rule_match_debug(module_path: &str, rule_name: &str, original: &str, replacement: &str) {
    debug!(
        "{} Rule '{}' rewrote '{}' -> '{}'",
        module_path,
        rule_name,
        get_loggable_content(original),
        replacement
    );
}

pub fn log_rule_veto_debug(module_path: &str, rule_name: &str, original: &str) {
    debug!(
        "{} Rule '{}' skipped match '{}' (vetoed by following text)",
        module_path,
        rule_name,
        get_loggable_content(original)
    );
}

pub fn log_span_translation_debug(module_path: &str, offset: usize, original: &str, translated: &str) {
    debug!(
        "{} Span at byte {} translated: '{}' -> '{}'",
        module_path, offset, original, translated
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_redact_sensitive_short_string() {
        assert_eq!(redact_sensitive("abc"), "[HIDDEN]".to_string());
    }

    #[test]
    fn test_redact_sensitive_long_string() {
        assert_eq!(redact_sensitive("server.js:1234"), "[HIDDEN: 14 chars]".to_string());
    }
}

// File: markscrub-core/src/headless.rs

//! `headless.rs`
//! Convenience wrappers for one-shot rewriting without building engines by
//! hand. Each call compiles its configuration, rewrites one string and
//! returns the result.

use anyhow::Result;

use crate::config::RuleSetConfig;
use crate::dictionary::DictionaryConfig;
use crate::engine::{RewriteMode, Rewriter};
use crate::engines::sanitize_engine::SanitizeEngine;
use crate::engines::translator::QuoteScopedTranslator;

/// Sanitizes `content` with the given rule set (pipeline + normalizer).
pub fn headless_sanitize_string(config: RuleSetConfig, content: &str) -> Result<String> {
    let engine = SanitizeEngine::new(config)?;
    Ok(engine.sanitize(content))
}

/// Translates the quoted spans of `content` with the given dictionary.
pub fn headless_translate_string(dictionary: &DictionaryConfig, content: &str) -> Result<String> {
    let translator = QuoteScopedTranslator::new(dictionary)?;
    Ok(translator.translate(content)?)
}

/// Rewrites `content` in the given mode using the built-in rule set or
/// dictionary.
pub fn headless_rewrite_with_defaults(mode: RewriteMode, content: &str) -> Result<String> {
    let rewriter: Box<dyn Rewriter> = match mode {
        RewriteMode::Sanitize => Box::new(SanitizeEngine::with_default_rules()?),
        RewriteMode::Translate => Box::new(QuoteScopedTranslator::new(&DictionaryConfig::load_default()?)?),
    };
    Ok(rewriter.rewrite(content)?.output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RewriteRule;

    #[test]
    fn test_headless_sanitize_string() -> Result<()> {
        let config = RuleSetConfig {
            rules: vec![RewriteRule::new("mailgun", r"\bMailgun\b", "email service")],
            ..RuleSetConfig::default()
        };
        let out = headless_sanitize_string(config, "Sent via  Mailgun ")?;
        assert_eq!(out, "Sent via email service");
        Ok(())
    }

    #[test]
    fn test_headless_translate_string() -> Result<()> {
        let dict = DictionaryConfig::from_pairs([("Opslaan", "Save")]);
        let out = headless_translate_string(&dict, r#"<button title="Opslaan">Opslaan</button>"#)?;
        assert_eq!(out, r#"<button title="Save">Opslaan</button>"#);
        Ok(())
    }

    #[test]
    fn test_headless_defaults_both_modes() -> Result<()> {
        let sanitized = headless_rewrite_with_defaults(RewriteMode::Sanitize, "Uses PostgreSQL")?;
        assert_eq!(sanitized, "Uses database");
        let translated = headless_rewrite_with_defaults(RewriteMode::Translate, "alert('Taak opgeslagen');")?;
        assert_eq!(translated, "alert('Task saved');");
        Ok(())
    }
}

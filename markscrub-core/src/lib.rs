// markscrub-core/src/lib.rs
//! # markscrub Core Library
//!
//! `markscrub-core` provides the platform-independent logic for rewriting
//! semi-structured markup documents in two modes:
//!
//! * **Sanitization**: an ordered pipeline of regex rules replaces
//!   technically sensitive details (API paths, schema identifiers, file and
//!   line references, internal function names, SQL fragments, vendor names)
//!   with neutral descriptions, followed by a normalization pass that tidies
//!   the whitespace and empty list items those replacements leave behind.
//! * **Scoped translation**: a dictionary of whole-word substitutions is
//!   applied only inside quoted literal spans, never to the markup around
//!   them.
//!
//! Both are pure `text -> text` functions. Configuration (rule sets and
//! dictionaries) is validated and compiled once, up front, and then passed
//! in as an immutable value; the library performs no I/O beyond loading
//! configuration files on request.
//!
//! ## Modules
//!
//! * `config`: `RewriteRule`s and `RuleSetConfig` (loading, merging, validation).
//! * `dictionary`: `TranslationEntry` and `DictionaryConfig`.
//! * `sanitizers`: rule compilation and post-match guards.
//! * `engine`: the `Rewriter` trait shared by both modes.
//! * `engines`: rule pipeline, normalizer, quote scanner, translator.
//! * `headless`: one-shot convenience wrappers.
//! * `rewrite_log`: debug logging that keeps matched text out of logs by default.
//! * `errors`: the `ScrubError` type.
//!
//! ## Usage Example
//!
//! ```rust
//! use markscrub_core::{DictionaryConfig, QuoteScopedTranslator, RuleSetConfig, SanitizeEngine};
//! use anyhow::Result;
//!
//! fn main() -> Result<()> {
//!     let engine = SanitizeEngine::new(RuleSetConfig::load_default_rules()?)?;
//!     let cleaned = engine.sanitize("<li>Fixed DELETE /api/taken/:id in server.js:1234</li>");
//!     assert_eq!(cleaned, "<li>Fixed API endpoint in server-side logica</li>");
//!
//!     let dictionary = DictionaryConfig::from_pairs([("Nieuwe taak", "New task"), ("taak", "task")]);
//!     let translator = QuoteScopedTranslator::new(&dictionary)?;
//!     let translated = translator.translate(r#"<button data-taak="1" title="Nieuwe taak">"#)?;
//!     assert_eq!(translated, r#"<button data-taak="1" title="New task">"#);
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! Fallible operations return `ScrubError` (or `anyhow::Error` for file
//! loading). Invalid patterns and dictionary entries are configuration
//! errors raised at construction time; rewriting itself only fails for an
//! unterminated quote under the `reject` policy.
//!
//! ---
//! License: MIT OR Apache-2.0

pub mod config;
pub mod dictionary;
pub mod engine;
pub mod engines;
pub mod errors;
pub mod headless;
pub mod rewrite_log;
pub mod sanitizers;

/// Re-exports the rule-set configuration types and helpers.
pub use config::{
    merge_rules,
    validate_rules,
    NormalizerConfig,
    RewriteRule,
    RewriteSummaryItem,
    RuleCategory,
    RuleSetConfig,
    MAX_PATTERN_LENGTH,
};

/// Re-exports dictionary configuration types.
pub use dictionary::{merge_dictionaries, DictionaryConfig, TranslationEntry, UnterminatedSpanPolicy};

/// Re-exports the custom error type for clear error reporting.
pub use errors::ScrubError;

/// Re-exports the `Rewriter` trait and its result types.
pub use engine::{RewriteMode, RewriteOutcome, Rewriter};

/// Re-exports the concrete engines and their free-function entry points.
pub use engines::normalizer::{normalize, Normalizer};
pub use engines::pipeline::{apply_rules, RulePipeline};
pub use engines::quote_scan::{scan, ScanState, Segment};
pub use engines::sanitize_engine::SanitizeEngine;
pub use engines::translator::{translate, QuoteScopedTranslator, TranslationReport};

/// Re-exports one-shot helpers.
pub use headless::{headless_rewrite_with_defaults, headless_sanitize_string, headless_translate_string};

pub use sanitizers::compiler::{compile_rules, CompiledRule, CompiledRules};

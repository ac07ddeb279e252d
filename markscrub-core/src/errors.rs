//! errors.rs - Custom error types for the markscrub-core library.
//!
//! Configuration problems (bad patterns, bad dictionary entries) are reported
//! when a rule set or dictionary is compiled, never while a document is being
//! rewritten. The only per-document failure is an unterminated quoted span
//! under the `reject` policy.
//!
//! License: MIT OR APACHE 2.0

use thiserror::Error;

/// All error types produced by `markscrub-core`.
///
/// Marked `#[non_exhaustive]` so new variants can be added without breaking
/// downstream matches.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ScrubError {
    #[error("Failed to compile rewrite rule '{0}': {1}")]
    RuleCompilationError(String, regex::Error),

    #[error("Rule '{0}': pattern length ({1}) exceeds maximum allowed ({2})")]
    PatternLengthExceeded(String, usize, usize),

    #[error("Rule set validation failed:\n{0}")]
    InvalidRuleSet(String),

    #[error("Dictionary validation failed:\n{0}")]
    InvalidDictionary(String),

    #[error("Unterminated {quote} quote opened at byte offset {offset}")]
    UnterminatedSpan { offset: usize, quote: char },

    #[error("An unexpected I/O error occurred: {0}")]
    IoError(#[from] std::io::Error),

    #[error("A fatal error occurred: {0}")]
    Fatal(String),
}

impl ScrubError {
    /// True for errors caused by rule or dictionary configuration rather
    /// than by the document being processed.
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            ScrubError::RuleCompilationError(..)
                | ScrubError::PatternLengthExceeded(..)
                | ScrubError::InvalidRuleSet(_)
                | ScrubError::InvalidDictionary(_)
                | ScrubError::Fatal(_)
        )
    }
}

// markscrub-core/src/engine.rs
//! Defines the core `Rewriter` trait and related data structures.
//!
//! Both rewriting modes (rule-based sanitization and quote-scoped
//! translation) sit behind this trait so the CLI and headless helpers can
//! drive either one without knowing which is which.
//!
//! License: MIT OR APACHE 2.0

use std::fmt;

use crate::config::RewriteSummaryItem;
use crate::errors::ScrubError;

/// Which transformation a rewriter performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RewriteMode {
    Sanitize,
    Translate,
}

impl fmt::Display for RewriteMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RewriteMode::Sanitize => f.write_str("sanitize"),
            RewriteMode::Translate => f.write_str("translate"),
        }
    }
}

/// The result of rewriting one document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewriteOutcome {
    pub output: String,
    /// Non-zero tallies only, in rule or application order.
    pub summary: Vec<RewriteSummaryItem>,
}

impl RewriteOutcome {
    pub fn total_occurrences(&self) -> usize {
        self.summary.iter().map(|item| item.occurrences).sum()
    }
}

/// A pure `text -> text` document transformation.
///
/// Implementations hold only immutable, pre-validated configuration, so a
/// single instance may be shared across threads working on independent
/// documents.
pub trait Rewriter: Send + Sync {
    /// Rewrites a whole document and reports what changed.
    ///
    /// # Arguments
    /// * `document` - The complete input text.
    fn rewrite(&self, document: &str) -> Result<RewriteOutcome, ScrubError>;

    /// The mode this rewriter implements.
    fn mode(&self) -> RewriteMode;
}

//! A `Rewriter` that sanitizes documents: rule pipeline, then normalizer.
//! License: MIT OR APACHE 2.0

use anyhow::{Context, Result};
use log::debug;

use crate::config::{RewriteSummaryItem, RuleSetConfig};
use crate::engine::{RewriteMode, RewriteOutcome, Rewriter};
use crate::engines::normalizer::Normalizer;
use crate::engines::pipeline::RulePipeline;
use crate::errors::ScrubError;

#[derive(Debug)]
pub struct SanitizeEngine {
    pipeline: RulePipeline,
    normalizer: Normalizer,
}

impl SanitizeEngine {
    pub fn new(config: RuleSetConfig) -> Result<Self> {
        let pipeline = RulePipeline::from_config(&config)
            .context("Failed to compile rewrite rules for SanitizeEngine")?;
        let normalizer = Normalizer::new(&config.normalizer)
            .context("Failed to build normalizer for SanitizeEngine")?;
        Ok(Self { pipeline, normalizer })
    }

    /// Engine over the built-in rule set.
    pub fn with_default_rules() -> Result<Self> {
        Self::new(RuleSetConfig::load_default_rules()?)
    }

    pub fn sanitize(&self, document: &str) -> String {
        self.normalizer.normalize(&self.pipeline.apply(document))
    }

    pub fn sanitize_with_summary(&self, document: &str) -> (String, Vec<RewriteSummaryItem>) {
        let (rewritten, summary) = self.pipeline.apply_with_summary(document);
        let normalized = self.normalizer.normalize(&rewritten);
        debug!(
            "Sanitized document: {} rule(s) fired, {} -> {} bytes.",
            summary.len(),
            document.len(),
            normalized.len()
        );
        (normalized, summary)
    }

    pub fn pipeline(&self) -> &RulePipeline {
        &self.pipeline
    }
}

impl Rewriter for SanitizeEngine {
    fn rewrite(&self, document: &str) -> Result<RewriteOutcome, ScrubError> {
        let (output, summary) = self.sanitize_with_summary(document);
        Ok(RewriteOutcome { output, summary })
    }

    fn mode(&self) -> RewriteMode {
        RewriteMode::Sanitize
    }
}

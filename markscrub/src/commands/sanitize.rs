// markscrub/src/commands/sanitize.rs
//! `markscrub sanitize`: rule pipeline plus normalizer over one document.

use anyhow::{Context, Result};
use is_terminal::IsTerminal;
use log::{debug, info};
use std::io::{self, Write};
use std::path::PathBuf;

use markscrub_core::{Rewriter, SanitizeEngine};

use crate::cli::SanitizeCommand;
use crate::commands::rules::load_rule_set;
use crate::ui::{diff_viewer, output_format, summary};
use crate::utils::output::{read_document, write_atomic};

/// Everything `run_sanitize` needs, detached from clap.
#[derive(Debug, Clone, Default)]
pub struct SanitizeOptions {
    pub input: PathBuf,
    /// Defaults to `input` (in-place rewrite).
    pub output: Option<PathBuf>,
    pub rules: Option<PathBuf>,
    pub disable: Vec<String>,
    pub diff: bool,
    pub dry_run: bool,
    pub summary: bool,
    pub quiet: bool,
}

impl SanitizeOptions {
    pub fn from_command(cmd: SanitizeCommand, quiet: bool) -> Self {
        Self {
            input: cmd.input,
            output: cmd.output,
            rules: cmd.rules,
            disable: cmd.disable,
            diff: cmd.diff,
            dry_run: cmd.dry_run,
            summary: cmd.summary,
            quiet,
        }
    }

    fn destination(&self) -> &PathBuf {
        self.output.as_ref().unwrap_or(&self.input)
    }
}

pub fn run_sanitize(opts: SanitizeOptions) -> Result<()> {
    info!("Starting sanitize of {}.", opts.input.display());

    let original = read_document(&opts.input)?;
    let config = load_rule_set(opts.rules.as_deref(), &opts.disable)?;
    let engine = SanitizeEngine::new(config).context("Failed to build the sanitize engine")?;
    debug!("Sanitize engine ready with {} rules.", engine.pipeline().len());

    let outcome = engine.rewrite(&original).context("Sanitization failed")?;
    let sanitized = &outcome.output;

    let stdout = io::stdout();
    let stdout_colors = stdout.is_terminal();
    let mut out = stdout.lock();
    if opts.diff {
        diff_viewer::print_diff(&original, sanitized, &mut out, stdout_colors)
            .context("Failed to print diff")?;
    } else if opts.dry_run {
        out.write_all(sanitized.as_bytes()).context("Failed to write to stdout")?;
    }
    out.flush()?;

    let stderr = io::stderr();
    let stderr_colors = stderr.is_terminal();
    let mut err = stderr.lock();

    if !opts.dry_run {
        let destination = opts.destination();
        write_atomic(destination, sanitized)?;
        if !opts.quiet {
            output_format::print_success_message(
                &mut err,
                &format!(
                    "Sanitized {} -> {}: {} bytes -> {} bytes, {} replacement(s)",
                    opts.input.display(),
                    destination.display(),
                    original.len(),
                    sanitized.len(),
                    outcome.total_occurrences()
                ),
                stderr_colors,
            )?;
        }
    } else if !opts.quiet {
        output_format::print_info_message(
            &mut err,
            &format!("Dry run: {} bytes -> {} bytes, nothing written.", original.len(), sanitized.len()),
            stderr_colors,
        )?;
    }

    if opts.summary && !opts.quiet {
        summary::print_summary("Rule", &outcome.summary, &mut err, stderr_colors)?;
    }

    info!("Sanitize completed.");
    Ok(())
}

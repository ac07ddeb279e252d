// markscrub/src/commands/translate.rs
//! `markscrub translate`: quote-scoped dictionary translation of one document.

use anyhow::{Context, Result};
use is_terminal::IsTerminal;
use log::info;
use std::io;
use std::path::PathBuf;

use markscrub_core::{QuoteScopedTranslator, UnterminatedSpanPolicy};

use crate::cli::TranslateCommand;
use crate::commands::dictionary::load_dictionary;
use crate::ui::{output_format, summary};
use crate::utils::output::{read_document, write_atomic};

#[derive(Debug, Clone, Default)]
pub struct TranslateOptions {
    pub input: PathBuf,
    pub output: PathBuf,
    pub dictionary: Option<PathBuf>,
    pub strict_quotes: bool,
    pub summary: bool,
    pub quiet: bool,
}

impl TranslateOptions {
    pub fn from_command(cmd: TranslateCommand, quiet: bool) -> Self {
        Self {
            input: cmd.input,
            output: cmd.output,
            dictionary: cmd.dictionary,
            strict_quotes: cmd.strict_quotes,
            summary: cmd.summary,
            quiet,
        }
    }
}

pub fn run_translate(opts: TranslateOptions) -> Result<()> {
    info!("Starting translate of {}.", opts.input.display());

    let document = read_document(&opts.input)?;
    let mut dictionary = load_dictionary(opts.dictionary.as_deref())?;
    if opts.strict_quotes {
        dictionary.unterminated_span = UnterminatedSpanPolicy::Reject;
    }
    let translator = QuoteScopedTranslator::new(&dictionary).context("Failed to build the translator")?;

    let report = translator
        .translate_with_report(&document)
        .with_context(|| format!("Failed to translate {}", opts.input.display()))?;
    write_atomic(&opts.output, &report.output)?;

    if opts.quiet {
        return Ok(());
    }

    let stderr = io::stderr();
    let colors = stderr.is_terminal();
    let mut err = stderr.lock();
    if let Some(offset) = report.unterminated_at {
        output_format::print_warn_message(
            &mut err,
            &format!("Quote opened at byte {} is never closed; the rest was left untranslated.", offset),
            colors,
        )?;
    }
    output_format::print_success_message(
        &mut err,
        &format!(
            "Translated {} -> {} ({} of {} quoted spans changed)",
            opts.input.display(),
            opts.output.display(),
            report.spans_changed,
            report.spans_scanned
        ),
        colors,
    )?;
    if opts.summary {
        summary::print_summary("Term", &report.term_counts, &mut err, colors)?;
    }
    Ok(())
}

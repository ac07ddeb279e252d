// markscrub/src/cli.rs
//! Command-line interface definition for `markscrub`: global flags and the
//! four subcommands.
//! License: MIT OR Apache-2.0

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Top-level CLI definition.
#[derive(Parser, Debug)]
#[command(
    name = "markscrub",
    version = env!("CARGO_PKG_VERSION"),
    about = "Scrub technical details out of markup documents and translate quoted UI text",
    long_about = "markscrub rewrites semi-structured markup documents. `sanitize` runs an ordered pipeline of regex rules that replace API paths, schema names, file and line references and vendor names with neutral wording, then tidies whitespace and empty list items. `translate` applies a dictionary to the text inside quoted string literals only, leaving the surrounding markup byte-for-byte intact.",
    arg_required_else_help = true
)]
pub struct Cli {
    /// Suppress informational messages and all logging.
    #[arg(long, short = 'q', global = true, conflicts_with = "debug")]
    pub quiet: bool,

    /// Enable debug logging (overrides RUST_LOG).
    #[arg(long, short = 'd', global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Sanitizes a document in place (or into --output).
    Sanitize(SanitizeCommand),

    /// Translates the quoted spans of INPUT into OUTPUT.
    Translate(TranslateCommand),

    /// Lists the effective rule set in application order.
    Rules(RulesCommand),

    /// Lists the effective dictionary in application order.
    Dictionary(DictionaryCommand),
}

#[derive(Args, Debug)]
pub struct SanitizeCommand {
    /// Document to sanitize.
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Write the result here instead of overwriting INPUT.
    #[arg(long, short = 'o', value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// YAML rule set merged over the built-in rules.
    #[arg(long, value_name = "FILE", env = "MARKSCRUB_RULES")]
    pub rules: Option<PathBuf>,

    /// Rule names to leave out (comma-separated).
    #[arg(long, short = 'x', value_delimiter = ',')]
    pub disable: Vec<String>,

    /// Print a unified diff of the changes to stdout.
    #[arg(long, short = 'D')]
    pub diff: bool,

    /// Do not write anything; print the result (or the diff) to stdout.
    #[arg(long = "dry-run", short = 'n')]
    pub dry_run: bool,

    /// Print how often each rule fired.
    #[arg(long, short = 's')]
    pub summary: bool,
}

#[derive(Args, Debug)]
pub struct TranslateCommand {
    /// Document to translate.
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Where to write the translated document.
    #[arg(value_name = "OUTPUT")]
    pub output: PathBuf,

    /// YAML dictionary merged over the built-in one.
    #[arg(long, value_name = "FILE", env = "MARKSCRUB_DICTIONARY")]
    pub dictionary: Option<PathBuf>,

    /// Fail on a quote that is never closed instead of leaving the rest untranslated.
    #[arg(long = "strict-quotes")]
    pub strict_quotes: bool,

    /// Print how often each term was replaced.
    #[arg(long, short = 's')]
    pub summary: bool,
}

#[derive(Args, Debug)]
pub struct RulesCommand {
    /// YAML rule set merged over the built-in rules.
    #[arg(long, value_name = "FILE", env = "MARKSCRUB_RULES")]
    pub rules: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct DictionaryCommand {
    /// YAML dictionary merged over the built-in one.
    #[arg(long, value_name = "FILE", env = "MARKSCRUB_DICTIONARY")]
    pub dictionary: Option<PathBuf>,
}

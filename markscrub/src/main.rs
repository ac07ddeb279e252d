// markscrub/src/main.rs
//! markscrub entry point.

use anyhow::Result;
use clap::Parser;
use log::LevelFilter;

use markscrub::cli::{Cli, Commands};
use markscrub::commands::{dictionary, rules, sanitize, translate};
use markscrub::logger;

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.quiet {
        Some(LevelFilter::Off)
    } else if cli.debug {
        Some(LevelFilter::Debug)
    } else {
        None
    };
    logger::init_logger(level);

    match cli.command {
        Commands::Sanitize(cmd) => sanitize::run_sanitize(sanitize::SanitizeOptions::from_command(cmd, cli.quiet)),
        Commands::Translate(cmd) => translate::run_translate(translate::TranslateOptions::from_command(cmd, cli.quiet)),
        Commands::Rules(cmd) => rules::run_rules(cmd.rules.as_deref()),
        Commands::Dictionary(cmd) => dictionary::run_dictionary(cmd.dictionary.as_deref()),
    }
}

// markscrub/src/logger.rs
//! Logger setup for the CLI.

use env_logger::{Builder, Env, Target};
use log::LevelFilter;

/// Initializes `env_logger` on stderr.
///
/// `RUST_LOG` is honoured unless `level_override` is given; with neither,
/// only warnings and errors are shown. Calling this twice is harmless.
pub fn init_logger(level_override: Option<LevelFilter>) {
    let mut builder = Builder::from_env(Env::default().default_filter_or("warn"));
    if let Some(level) = level_override {
        builder.filter_level(level);
    }
    builder.target(Target::Stderr).format_timestamp(None);
    let _ = builder.try_init();
}

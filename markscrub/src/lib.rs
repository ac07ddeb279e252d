// markscrub/src/lib.rs
//! # markscrub CLI
//!
//! Terminal front end for `markscrub-core`: argument parsing, logging setup,
//! reading and atomically writing documents, and rendering diffs and
//! summaries.

pub mod cli;
pub mod commands;
pub mod logger;
pub mod ui;
pub mod utils;

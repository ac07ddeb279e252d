// markscrub/src/ui/output_format.rs
//! Status lines written to stderr, coloured when the stream is a terminal.

use owo_colors::OwoColorize;
use std::io::{self, Write};

pub fn print_info_message(writer: &mut dyn Write, message: &str, enable_colors: bool) -> io::Result<()> {
    if enable_colors {
        writeln!(writer, "{}", message.cyan())
    } else {
        writeln!(writer, "{}", message)
    }
}

pub fn print_success_message(writer: &mut dyn Write, message: &str, enable_colors: bool) -> io::Result<()> {
    if enable_colors {
        writeln!(writer, "{}", message.green())
    } else {
        writeln!(writer, "{}", message)
    }
}

pub fn print_warn_message(writer: &mut dyn Write, message: &str, enable_colors: bool) -> io::Result<()> {
    if enable_colors {
        writeln!(writer, "{} {}", "Warning:".yellow().bold(), message)
    } else {
        writeln!(writer, "Warning: {}", message)
    }
}

//! Output formatting utilities
//!
//! This module provides colored output functions for the CLI application
//! following modern CLI conventions.

use owo_colors::OwoColorize;
use std::env;

/// Output level for controlling what gets displayed
#[derive(Debug, Clone, Copy)]
pub enum OutputLevel {
    /// Show all output (normal mode)
    Normal,
    /// Show only errors (quiet mode)
    Quiet,
    /// Show extra debug information (verbose mode)
    Verbose,
}

impl OutputLevel {
    /// Check if user-facing messages should be shown (excludes errors/hints which always show)
    pub fn show_user(&self) -> bool {
        matches!(self, Self::Normal | Self::Verbose)
    }
}

/// Check if colored output should be disabled
fn colors_disabled() -> bool {
    // Check multiple conditions for color disabling
    env::var("NO_COLOR").is_ok()
        || env::var("TERM").is_ok_and(|t| t == "dumb")
        || !atty::is(atty::Stream::Stderr) // Use stderr since we're using eprintln!
}

/// Generic helper to print colored messages, eliminating duplication
fn print_colored<T>(msg: &str, styled_msg: T, output_level: OutputLevel, always_show: bool)
where
    T: std::fmt::Display,
{
    if always_show || output_level.show_user() {
        if !colors_disabled() {
            eprintln!("{styled_msg}");
        } else {
            eprintln!("{msg}");
        }
    }
}

/// Print a note message with default formatting (no prefix)
pub fn note(msg: &str, output_level: OutputLevel) {
    if output_level.show_user() {
        eprintln!("{msg}");
    }
}

/// Print a success message with green color (no prefix)
pub fn success(msg: &str, output_level: OutputLevel) {
    print_colored(msg, msg.green(), output_level, false);
}

/// Print a warning message with "Warning:" prefix in yellow
pub fn warning(msg: &str, output_level: OutputLevel) {
    if output_level.show_user() {
        let warning_msg = format!("Warning: {msg}");
        if !colors_disabled() {
            eprintln!("{} {}", "Warning:".yellow().bold(), msg.yellow());
        } else {
            eprintln!("{warning_msg}");
        }
    }
}

/// Print a hint message with "Hint:" prefix in blue (always shown)
pub fn hint(msg: &str, _output_level: OutputLevel) {
    // Always show hints, even in quiet mode
    let hint_msg = format!("Hint: {msg}");
    if !colors_disabled() {
        eprintln!("{} {}", "Hint:".blue().bold(), msg.blue());
    } else {
        eprintln!("{hint_msg}");
    }
}

/// Format a command or option with colors
pub fn format_command(cmd: &str) -> String {
    if colors_disabled() {
        format!("`{cmd}`")
    } else {
        format!("`{}`", cmd.yellow().bold())
    }
}

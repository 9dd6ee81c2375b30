//! Terminal styling helpers
//!
//! Output goes through `anstream`, which strips the escapes again when the
//! stream is not a terminal.

use indicatif::ProgressStyle;
use owo_colors::OwoColorize;
use std::fmt::Display;

/// Check mark glyph
pub const CHECK: &str = "✓";

/// Semantic styles for CLI output
pub trait Stylize: Display + Sized {
    /// De-emphasized secondary text
    fn muted(&self) -> String {
        self.dimmed().to_string()
    }

    /// Headings and key nouns
    fn emphasis(&self) -> String {
        self.bold().to_string()
    }

    /// Identifiers (PR numbers, labels, branches)
    fn accent(&self) -> String {
        self.cyan().to_string()
    }

    /// Completed actions
    fn success(&self) -> String {
        self.green().to_string()
    }

    /// Non-fatal problems
    fn warn(&self) -> String {
        self.yellow().to_string()
    }

    /// Fatal problems
    fn error(&self) -> String {
        self.red().bold().to_string()
    }
}

impl<T: Display> Stylize for T {}

/// Green check mark
pub fn check() -> String {
    CHECK.success()
}

/// Arrow used in plan listings
pub fn arrow() -> String {
    "→".muted()
}

/// Spinner style for poll waits
pub fn spinner_style() -> ProgressStyle {
    ProgressStyle::with_template("{spinner:.cyan} {msg} {elapsed:.dim}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
}

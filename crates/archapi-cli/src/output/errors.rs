//! Error message formatting with actionable suggestions.

use std::error::Error;

use super::colors::{ColorSupport, Style};
use crate::commands::CliError;

/// Error formatter with suggestions
pub struct ErrorFormatter {
    colors: ColorSupport,
}

impl ErrorFormatter {
    /// Create a new error formatter
    pub fn new() -> Self {
        Self {
            colors: ColorSupport::detect(),
        }
    }

    pub fn with_colors(colors: ColorSupport) -> Self {
        Self { colors }
    }

    /// Format an error with its causes and a suggestion
    pub fn format_error(&self, error: &CliError) -> String {
        let mut output = String::new();

        output.push_str(&self.colors.paint(Style::Error, "error"));
        output.push_str(": ");
        output.push_str(&error.to_string());
        output.push('\n');

        // The top-level message already includes the direct cause
        let mut source = error.source().and_then(|s| s.source());
        while let Some(err) = source {
            output.push_str(&self.colors.paint(Style::Muted, "caused by"));
            output.push_str(": ");
            output.push_str(&err.to_string());
            output.push('\n');
            source = err.source();
        }

        if let Some(suggestion) = error.suggestion() {
            output.push_str(&self.colors.paint(Style::Muted, "help"));
            output.push_str(": ");
            output.push_str(suggestion);
            output.push('\n');
        }

        output
    }
}

impl Default for ErrorFormatter {
    fn default() -> Self {
        Self::new()
    }
}

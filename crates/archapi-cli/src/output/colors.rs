//! Terminal colors for CLI output.
//!
//! Respects the NO_COLOR environment variable and only colors when both
//! stdout and stderr are terminals.

use std::env;
use std::io::{self, IsTerminal};

/// What a piece of output text represents
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Style {
    /// Package name
    Name,
    Version,
    /// Package markers such as `[orphaned]`
    Flag,
    /// Secondary text: repo prefix, inactive mirrors, error labels
    Muted,
    Warning,
    Error,
}

impl Style {
    fn code(self) -> &'static str {
        match self {
            Style::Name => "1",
            Style::Version => "32",
            Style::Flag | Style::Error => "31",
            Style::Muted => "2",
            Style::Warning => "33",
        }
    }
}

/// Color support detection and formatting
#[derive(Debug, Clone, Copy)]
pub struct ColorSupport {
    enabled: bool,
}

impl ColorSupport {
    /// Detect color support automatically
    pub fn detect() -> Self {
        let enabled = env::var_os("NO_COLOR").is_none()
            && io::stderr().is_terminal()
            && io::stdout().is_terminal();
        Self { enabled }
    }

    /// Force disable colors
    pub fn disabled() -> Self {
        Self { enabled: false }
    }

    /// Wrap `text` in the escape sequence for `style` when colors are on
    pub fn paint(&self, style: Style, text: &str) -> String {
        if self.enabled {
            format!("\x1b[{}m{}\x1b[0m", style.code(), text)
        } else {
            text.to_string()
        }
    }
}

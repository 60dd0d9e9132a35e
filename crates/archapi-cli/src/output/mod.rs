//! Terminal output formatting.

pub mod colors;
pub mod errors;

use colors::{ColorSupport, Style};

/// Output handler for consistent terminal formatting
pub struct OutputHandler {
    colors: ColorSupport,
}

impl OutputHandler {
    /// Create a new output handler
    pub fn new() -> Self {
        Self {
            colors: ColorSupport::detect(),
        }
    }

    pub fn colors(&self) -> &ColorSupport {
        &self.colors
    }

    /// Print an info message to stderr, keeping stdout for results
    pub fn info(&self, message: &str) {
        eprintln!("{}", self.colors.paint(Style::Muted, message));
    }

    /// Print a warning message
    pub fn warn(&self, message: &str) {
        eprintln!("{} {}", self.colors.paint(Style::Warning, "⚠"), message);
    }
}

impl Default for OutputHandler {
    fn default() -> Self {
        Self::new()
    }
}

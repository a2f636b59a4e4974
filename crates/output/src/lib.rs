//! Console output helper for devkit CLIs
//!
//! Status lines are styled for the terminal and mirrored to the structured
//! logger so human-facing output and machine-facing logs stay in sync. The
//! logging adapter is a hard prerequisite: construction fails when it has
//! not been initialized.

use console::{style, StyledObject, Term};
use types::OutputError;

/// Styled status writer bound to stderr
#[derive(Debug)]
pub struct Console {
    term: Term,
    use_colors: bool,
}

impl Console {
    /// Create a console writer
    ///
    /// Fails with [`OutputError::LoggerNotInitialized`] when the logging
    /// adapter has not been set up; mirroring messages requires it.
    pub fn new() -> Result<Self, OutputError> {
        if !logging::is_initialized() {
            return Err(OutputError::LoggerNotInitialized);
        }

        let term = Term::stderr();
        let use_colors = term.features().colors_supported();
        Ok(Self { term, use_colors })
    }

    /// A completed action
    pub fn success(&self, message: &str) {
        tracing::info!("{}", message);
        self.line("✓", message, |s| s.green().bold());
    }

    /// Informational note
    pub fn info(&self, message: &str) {
        tracing::info!("{}", message);
        self.line("•", message, |s| s.cyan());
    }

    /// Recoverable problem
    pub fn warn(&self, message: &str) {
        tracing::warn!("{}", message);
        self.line("!", message, |s| s.yellow().bold());
    }

    /// Failure
    pub fn error(&self, message: &str) {
        tracing::error!("{}", message);
        self.line("✗", message, |s| s.red().bold());
    }

    /// Progress step
    pub fn step(&self, message: &str) {
        tracing::info!("{}", message);
        self.line("→", message, |s| s.dim());
    }

    fn line<F>(&self, marker: &'static str, message: &str, apply: F)
    where
        F: FnOnce(StyledObject<&'static str>) -> StyledObject<&'static str>,
    {
        let marker = if self.use_colors {
            apply(style(marker)).to_string()
        } else {
            marker.to_string()
        };
        let _ = self.term.write_line(&format!("{} {}", marker, message));
    }
}

//! Error types for the devkit tooling workspace

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for the devkit tools
#[derive(Error, Debug)]
pub enum DevkitError {
    /// Configuration related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Console output errors
    #[error("Output error: {0}")]
    Output(String),

    /// Commit indexing errors
    #[error("Index error: {0}")]
    Index(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Internal errors
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias for devkit operations
pub type Result<T> = std::result::Result<T, DevkitError>;

/// A single configuration validation issue
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigIssue {
    /// Dotted path of the field the issue concerns
    pub path: String,
    /// Human-readable message
    pub message: String,
}

impl ConfigIssue {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ConfigIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}

/// Configuration specific errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// One or more schema fields failed validation or coercion
    #[error("ConfigError: invalid configuration\n{}", format_issues(.0))]
    Invalid(Vec<ConfigIssue>),

    /// An env file exists but could not be parsed
    #[error("ConfigError: failed to parse env file {}: {message}", .path.display())]
    EnvFile { path: PathBuf, message: String },
}

fn format_issues(issues: &[ConfigIssue]) -> String {
    issues
        .iter()
        .map(|issue| format!("  - {}", issue))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Console output specific errors
#[derive(Error, Debug)]
pub enum OutputError {
    /// The logging adapter must be set up before a console is constructed
    #[error("logging has not been initialized; call logging::init first")]
    LoggerNotInitialized,
}

/// Commit indexing specific errors
#[derive(Error, Debug)]
pub enum IndexError {
    /// The git binary could not be spawned
    #[error("failed to run git: {0}")]
    GitSpawn(String),

    /// git exited with a failure status
    #[error("git {command} failed: {stderr}")]
    GitFailed { command: String, stderr: String },

    /// A line of git output did not match the expected record format
    #[error("malformed commit record: {0}")]
    MalformedRecord(String),

    /// A commit timestamp could not be parsed
    #[error("invalid commit timestamp {value}: {message}")]
    InvalidTimestamp { value: String, message: String },
}

// Conversion implementations for the umbrella error type

impl From<ConfigError> for DevkitError {
    fn from(err: ConfigError) -> Self {
        DevkitError::Config(err.to_string())
    }
}

impl From<OutputError> for DevkitError {
    fn from(err: OutputError) -> Self {
        DevkitError::Output(err.to_string())
    }
}

impl From<IndexError> for DevkitError {
    fn from(err: IndexError) -> Self {
        DevkitError::Index(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_config_message_has_fixed_prefix() {
        let err = ConfigError::Invalid(vec![
            ConfigIssue::new("port", "must be >= 1000"),
            ConfigIssue::new("log.level", "missing required value"),
        ]);

        let message = err.to_string();
        assert!(message.starts_with("ConfigError: invalid configuration"));
        assert!(message.contains("port: must be >= 1000"));
        assert!(message.contains("log.level: missing required value"));
    }

    #[test]
    fn config_error_converts_into_umbrella() {
        let err = ConfigError::Invalid(vec![ConfigIssue::new("port", "missing required value")]);
        let devkit: DevkitError = err.into();
        assert!(matches!(devkit, DevkitError::Config(_)));
    }
}

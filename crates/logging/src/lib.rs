//! Logging adapter for devkit tools
//!
//! Thin wrapper over `tracing`/`tracing-subscriber`: one `init` call with a
//! level and a line format, env-var fallbacks shared by all the tools, and
//! named component spans as child-logger scopes.

use std::sync::atomic::{AtomicBool, Ordering};

use anyhow::{Context, Result};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

static INITIALIZED: AtomicBool = AtomicBool::new(false);

/// Output format for log lines
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Json,
    Pretty,
}

impl LogFormat {
    /// Parse a format name; unknown values fall back to JSON
    pub fn parse(value: &str) -> Self {
        match value {
            "pretty" => LogFormat::Pretty,
            _ => LogFormat::Json,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogOptions {
    /// Filter directive, e.g. `info` or `gitdb=debug`
    pub level: String,
    /// Line format
    pub format: LogFormat,
}

impl Default for LogOptions {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Json,
        }
    }
}

impl LogOptions {
    /// Options from `RUST_LOG` / `LOG_FORMAT`, with defaults
    pub fn from_env() -> Self {
        let level = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
        let format = std::env::var("LOG_FORMAT").unwrap_or_else(|_| "json".to_string());
        Self {
            level,
            format: LogFormat::parse(&format),
        }
    }
}

/// Initialize the global tracing subscriber
pub fn init(options: &LogOptions) -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&options.level));

    let registry = tracing_subscriber::registry().with(env_filter);

    match options.format {
        LogFormat::Pretty => registry
            .with(tracing_subscriber::fmt::layer().pretty())
            .try_init()
            .context("Failed to initialize pretty logging")?,
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().json())
            .try_init()
            .context("Failed to initialize JSON logging")?,
    }

    INITIALIZED.store(true, Ordering::SeqCst);
    tracing::info!(level = %options.level, "Logging initialized");
    Ok(())
}

/// Initialize from environment variables
pub fn try_init_from_env() -> Result<()> {
    init(&LogOptions::from_env())
}

/// Whether `init` has completed in this process
pub fn is_initialized() -> bool {
    INITIALIZED.load(Ordering::SeqCst)
}

/// Named span for a tool component, the child-logger scope
pub fn component_span(name: &str) -> tracing::Span {
    tracing::info_span!("component", name = name)
}

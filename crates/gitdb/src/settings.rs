//! gitdb runtime settings
//!
//! Resolved through the devkit config loader; every field can come from the
//! environment or from `.env` files in an optional directory.

use std::path::{Path, PathBuf};

use config::{auto_env, env, ConfigError, ConfigLoader, ParsedConfig, Schema};

/// Typed view over the validated configuration
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub database_path: PathBuf,
    pub wal: bool,
    pub repo: PathBuf,
    pub log_level: String,
    pub log_format: String,
}

/// Configuration schema for gitdb
pub fn schema() -> Schema {
    Schema::object([
        (
            "database",
            Schema::object([
                (
                    "path",
                    env("GITDB_DB", Schema::string().default_value("gitdb.sqlite")),
                ),
                ("wal", env("GITDB_WAL", Schema::boolean().default_value(true))),
            ]),
        ),
        ("repo", env("GITDB_REPO", Schema::string().default_value("."))),
        (
            "log",
            Schema::object([
                (
                    "level",
                    env("GITDB_LOG_LEVEL", Schema::string().default_value("info")),
                ),
                // auto-derives LOG_FORMAT, the variable the logging adapter
                // also honors
                ("format", auto_env(Schema::string().default_value("json"))),
            ]),
        ),
    ])
}

/// Load settings, optionally reading `.env` files from `env_dir`
pub fn load(env_dir: Option<&Path>) -> Result<Settings, ConfigError> {
    let mut loader = ConfigLoader::new();
    if let Some(dir) = env_dir {
        loader = loader.env_dir(dir);
    }
    let parsed = loader.load(&schema())?;
    Ok(from_parsed(&parsed))
}

fn from_parsed(parsed: &ParsedConfig) -> Settings {
    // validation guarantees every field; fallbacks mirror the schema
    // defaults
    Settings {
        database_path: PathBuf::from(parsed.get_str("database.path").unwrap_or("gitdb.sqlite")),
        wal: parsed.get_bool("database.wal").unwrap_or(true),
        repo: PathBuf::from(parsed.get_str("repo").unwrap_or(".")),
        log_level: parsed.get_str("log.level").unwrap_or("info").to_string(),
        log_format: parsed.get_str("log.format").unwrap_or("json").to_string(),
    }
}

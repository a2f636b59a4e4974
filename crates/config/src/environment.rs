//! Raw environment assembly
//!
//! Builds the flat name-to-value mapping a load resolves against: a base
//! mapping (normally a snapshot of the process environment) overlaid with
//! optional `.env` and `.env.{mode}` files from a configurable directory.

use std::collections::BTreeMap;
use std::path::Path;

use types::ConfigError;

/// Variable consulted for the active mode when none is set explicitly
pub const MODE_VAR: &str = "APP_ENV";

/// Flat mapping of environment variable names to raw string values
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawEnvironment {
    vars: BTreeMap<String, String>,
}

impl RawEnvironment {
    /// Snapshot of the current process environment
    pub fn from_process() -> Self {
        Self {
            vars: std::env::vars().collect(),
        }
    }

    /// Build from an explicit set of variables
    pub fn from_vars<I, K, V>(vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            vars: vars
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Look up a variable
    pub fn get(&self, name: &str) -> Option<&str> {
        self.vars.get(name).map(String::as_str)
    }

    /// Active mode, if any
    pub(crate) fn mode(&self) -> Option<&str> {
        self.get(MODE_VAR)
    }

    /// Overlay `.env` and `.env.{mode}` from `dir`
    ///
    /// Later files override earlier ones, and file values override values
    /// already present in the mapping. Missing files are skipped.
    pub(crate) fn overlay_env_dir(
        &mut self,
        dir: &Path,
        mode: Option<&str>,
    ) -> Result<(), ConfigError> {
        self.overlay_file(&dir.join(".env"))?;
        if let Some(mode) = mode {
            self.overlay_file(&dir.join(format!(".env.{}", mode)))?;
        }
        Ok(())
    }

    fn overlay_file(&mut self, path: &Path) -> Result<(), ConfigError> {
        if !path.exists() {
            tracing::debug!("env file {} not found, skipping", path.display());
            return Ok(());
        }

        let entries = dotenv::from_path_iter(path).map_err(|e| ConfigError::EnvFile {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        for entry in entries {
            let (key, value) = entry.map_err(|e| ConfigError::EnvFile {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;
            self.vars.insert(key, value);
        }

        tracing::debug!("loaded env file {}", path.display());
        Ok(())
    }
}

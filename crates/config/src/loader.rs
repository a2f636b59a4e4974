//! Configuration loader
//!
//! Resolves each tagged schema field from the raw environment, assembles a
//! raw input mirroring the schema shape, and validates it in one collect-all
//! pass. Loading never mutates the schema or the process environment; each
//! call is independent and safe to run concurrently with others.

use std::path::PathBuf;

use serde_json::{Map, Value};
use types::ConfigError;

use crate::environment::RawEnvironment;
use crate::meta::{env_tag, EnvTag};
use crate::schema::{Schema, SchemaNode};
use crate::validation;

/// Parsed and coerced configuration matching the schema shape
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedConfig {
    root: Value,
}

impl ParsedConfig {
    /// Look up a value by dotted path
    pub fn get(&self, path: &str) -> Option<&Value> {
        let mut current = &self.root;
        for segment in path.split('.') {
            current = current.as_object()?.get(segment)?;
        }
        Some(current)
    }

    pub fn get_str(&self, path: &str) -> Option<&str> {
        self.get(path)?.as_str()
    }

    pub fn get_i64(&self, path: &str) -> Option<i64> {
        self.get(path)?.as_i64()
    }

    pub fn get_f64(&self, path: &str) -> Option<f64> {
        self.get(path)?.as_f64()
    }

    pub fn get_bool(&self, path: &str) -> Option<bool> {
        self.get(path)?.as_bool()
    }

    /// The underlying JSON value
    pub fn as_value(&self) -> &Value {
        &self.root
    }
}

/// Configuration loader that resolves schemas against env files and
/// environment variables
#[derive(Debug, Clone, Default)]
pub struct ConfigLoader {
    env_dir: Option<PathBuf>,
    mode: Option<String>,
    vars: Option<RawEnvironment>,
}

impl ConfigLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Directory to read `.env` and `.env.{mode}` files from
    pub fn env_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.env_dir = Some(dir.into());
        self
    }

    /// Override the active mode, normally taken from `APP_ENV`
    pub fn mode(mut self, mode: impl Into<String>) -> Self {
        self.mode = Some(mode.into());
        self
    }

    /// Use an explicit base environment instead of the process environment
    pub fn vars(mut self, vars: RawEnvironment) -> Self {
        self.vars = Some(vars);
        self
    }

    /// Load and validate a configuration for `schema`
    pub fn load(&self, schema: &Schema) -> Result<ParsedConfig, ConfigError> {
        let mut env = match &self.vars {
            Some(vars) => vars.clone(),
            None => RawEnvironment::from_process(),
        };

        if let Some(dir) = &self.env_dir {
            // the mode is read from the base mapping, before any file is
            // applied
            let mode = self
                .mode
                .clone()
                .or_else(|| env.mode().map(str::to_string));
            env.overlay_env_dir(dir, mode.as_deref())?;
        }

        let mut path = Vec::new();
        let raw = resolve(schema, &mut path, &env);
        let root = validation::validate(schema, raw.as_ref()).map_err(ConfigError::Invalid)?;

        tracing::debug!("configuration loaded");
        Ok(ParsedConfig { root })
    }
}

/// Load `schema` from the ambient process environment
pub fn define_config(schema: &Schema) -> Result<ParsedConfig, ConfigError> {
    ConfigLoader::new().load(schema)
}

/// Environment variable name derived from a field path
fn derived_name(path: &[String]) -> String {
    path.iter()
        .map(|segment| segment.to_ascii_uppercase())
        .collect::<Vec<_>>()
        .join("_")
}

fn resolve(schema: &Schema, path: &mut Vec<String>, env: &RawEnvironment) -> Option<Value> {
    match &schema.node {
        SchemaNode::Object(fields) => {
            let mut out = Map::new();
            for (name, child) in fields {
                path.push(name.clone());
                if let Some(value) = resolve(child, path, env) {
                    out.insert(name.clone(), value);
                }
                path.pop();
            }
            Some(Value::Object(out))
        }
        SchemaNode::Field(_) => {
            let value = match env_tag(schema) {
                EnvTag::Explicit(name) => env.get(name),
                EnvTag::Auto => env.get(&derived_name(path)),
                EnvTag::None => None,
            };
            value.map(|v| Value::String(v.to_string()))
        }
    }
}

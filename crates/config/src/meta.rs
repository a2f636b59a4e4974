//! Environment-variable tagging for schema fields
//!
//! `env` and `auto_env` annotate a schema node with the environment variable
//! its value is resolved from; `get_meta_value` reads annotations back. Tags
//! are ordinary metadata entries under the `env` key, so untagged schemas
//! behave exactly like schemas that never had metadata.

use crate::schema::Schema;

/// Metadata key holding the environment variable tag
pub const ENV_META_KEY: &str = "env";

/// Sentinel tag value: derive the variable name from the field path
pub const AUTO_ENV: &str = "auto";

/// Tag a schema with an explicit environment variable name
///
/// Returns an annotated copy; the input schema is never mutated.
pub fn env(name: &str, schema: Schema) -> Schema {
    schema.with_meta(ENV_META_KEY, name)
}

/// Tag a schema so its variable name is derived from the field path
///
/// The derived name upper-cases each path segment and joins them with `_`
/// (a field at `server.port` resolves from `SERVER_PORT`). Derivation is
/// deterministic, so repeated loads consult the same variable.
pub fn auto_env(schema: Schema) -> Schema {
    schema.with_meta(ENV_META_KEY, AUTO_ENV)
}

/// Read a metadata value from a schema node
///
/// Returns `None` when the key was never attached; safe to call on schemas
/// without any metadata.
pub fn get_meta_value<'a>(schema: &'a Schema, key: &str) -> Option<&'a str> {
    schema.meta.get(key).map(String::as_str)
}

/// How a field's value is resolved from the environment
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum EnvTag<'a> {
    /// Resolve under this exact variable name
    Explicit(&'a str),
    /// Resolve under the name derived from the field path
    Auto,
    /// Not environment-sourced
    None,
}

pub(crate) fn env_tag(schema: &Schema) -> EnvTag<'_> {
    match get_meta_value(schema, ENV_META_KEY) {
        Some(AUTO_ENV) => EnvTag::Auto,
        Some(name) => EnvTag::Explicit(name),
        None => EnvTag::None,
    }
}

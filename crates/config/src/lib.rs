//! Schema-driven configuration loading for devkit tools
//!
//! This crate resolves declarative schemas against the environment:
//! fields are tagged with the variable they load from (`env`/`auto_env`),
//! `.env` and `.env.{mode}` files are merged over the process environment,
//! and validation collects every issue before failing.

pub mod environment;
pub mod loader;
pub mod meta;
pub mod schema;
mod validation;

pub use environment::{RawEnvironment, MODE_VAR};
pub use loader::{define_config, ConfigLoader, ParsedConfig};
pub use meta::{auto_env, env, get_meta_value, AUTO_ENV, ENV_META_KEY};
pub use schema::{FieldKind, Schema, StringFormat};
pub use types::{ConfigError, ConfigIssue};

//! Configuration sources
//!
//! Harvests raw `(name, value)` pairs from TOML files and environment
//! variables and feeds them into a [`Configuration`](crate::Configuration).
//! The store itself never touches files or the environment.
//!
//! # Source Priority (lowest to highest)
//! 1. `default.toml` - Base default configuration
//! 2. `{environment}.toml` - Environment-specific configuration
//! 3. `local.toml` - Local development overrides (not committed to version control)
//! 4. `<PREFIX>_*` environment variables

pub mod environment;
pub mod error;
pub mod loader;
pub mod parameter;

pub use environment::Environment;
pub use error::SourceError;
pub use loader::{ParameterLoader, SourcedValue};
pub use parameter::SourcedParameter;

//! Parameter loader
//!
//! This module provides the `ParameterLoader` struct that harvests raw
//! `(name, value)` pairs from configuration files and environment variables
//! with proper precedence, and feeds them into a [`Configuration`].

use std::path::{Path, PathBuf};

use config::builder::DefaultState;
use config::{
    Config, ConfigBuilder, Environment as EnvSource, File, FileFormat, Source, Value, ValueKind,
};
use tracing::debug;

use crate::config::environment::Environment;
use crate::config::error::SourceError;
use crate::config::parameter::SourcedParameter;
use crate::configuration::Configuration;
use crate::parameter::Parameter;

/// Suffix of the variable naming the configuration directory
const CONFIG_DIR_SUFFIX: &str = "CONFIG_DIR";

/// Suffix of the variable naming a single configuration file
const CONFIG_FILE_SUFFIX: &str = "CONFIG_FILE";

/// Suffix of the variable naming the deployment environment
const ENVIRONMENT_SUFFIX: &str = "APP_ENV";

/// Default configuration directory
const DEFAULT_CONFIG_DIR: &str = "config";

/// Separator for nested configuration keys in environment variables
const ENV_SEPARATOR: &str = "__";

/// Separator joining array items into a list literal
const LIST_SEPARATOR: &str = ",";

/// Top-level keys the loader's own control variables map to
const RESERVED_KEYS: [&str; 3] = ["config_dir", "config_file", "app_env"];

/// Harvested parameter with its raw value
pub type SourcedValue = (SourcedParameter, String);

/// Loader that flattens layered configuration into raw parameter values
///
/// The loader supports the following sources (in order of priority):
/// 1. `default.toml` - Base default configuration (required)
/// 2. `{environment}.toml` - Environment-specific configuration (optional)
/// 3. `local.toml` - Local development overrides (optional)
/// 4. `<PREFIX>_*` environment variables (highest priority)
///
/// A single configuration file replaces the three layers when set.
#[derive(Debug, Clone)]
pub struct ParameterLoader {
    prefix: String,
    config_dir: Option<PathBuf>,
    config_file: Option<PathBuf>,
    environment: Environment,
    use_env: bool,
}

impl ParameterLoader {
    /// Create a loader for variables prefixed with `prefix`
    ///
    /// This reads environment variables to determine:
    /// - Configuration directory (`<PREFIX>_CONFIG_DIR`)
    /// - Specific configuration file (`<PREFIX>_CONFIG_FILE`)
    /// - Deployment environment (`<PREFIX>_APP_ENV`)
    pub fn new(prefix: impl Into<String>) -> Self {
        let prefix = prefix.into();
        let var = |suffix: &str| std::env::var(format!("{prefix}_{suffix}")).ok();

        Self {
            config_dir: var(CONFIG_DIR_SUFFIX).map(PathBuf::from),
            config_file: var(CONFIG_FILE_SUFFIX).map(PathBuf::from),
            environment: var(ENVIRONMENT_SUFFIX)
                .map(|raw| Environment::resolve(&raw))
                .unwrap_or_default(),
            use_env: true,
            prefix,
        }
    }

    /// Load layered files from `dir`
    pub fn with_config_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config_dir = Some(dir.into());
        self
    }

    /// Load only `file` instead of the layered files
    pub fn with_config_file(mut self, file: impl Into<PathBuf>) -> Self {
        self.config_file = Some(file.into());
        self
    }

    pub fn with_environment(mut self, environment: Environment) -> Self {
        self.environment = environment;
        self
    }

    /// Ignore `<PREFIX>_*` environment variable overrides
    pub fn without_env(mut self) -> Self {
        self.use_env = false;
        self
    }

    pub fn environment(&self) -> Environment {
        self.environment
    }

    /// Configuration directory used in layered mode
    pub fn config_dir(&self) -> PathBuf {
        self.config_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_DIR))
    }

    /// Harvest every leaf value as a dotted name and its textual form, sorted by name
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - both a configuration directory and file are set
    /// - a required file is not found
    /// - a file does not parse, or holds a table inside an array
    pub fn load(&self) -> Result<Vec<SourcedValue>, SourceError> {
        let config = self.build_config()?;
        let mut values = Vec::new();
        for (key, value) in config.collect()? {
            if self.use_env && RESERVED_KEYS.contains(&key.as_str()) {
                continue;
            }
            flatten(&key, &value, &mut values)?;
        }
        values.sort_by(|(a, _), (b, _)| a.name().cmp(b.name()));

        debug!(
            count = values.len(),
            environment = %self.environment,
            "Loaded configuration parameters"
        );
        Ok(values)
    }

    /// Load and configure every harvested value, returning how many were applied
    pub fn load_into(&self, configuration: &Configuration) -> Result<usize, SourceError> {
        let values = self.load()?;
        configuration.configure_all(
            values
                .iter()
                .map(|(parameter, value)| (parameter as &dyn Parameter, value.as_str())),
        )?;
        Ok(values.len())
    }

    /// Build the config::Config instance from all sources
    fn build_config(&self) -> Result<Config, SourceError> {
        let builder = Config::builder();

        let builder = match (&self.config_file, &self.config_dir) {
            (Some(_), Some(_)) => {
                return Err(SourceError::mutual_exclusivity(format!(
                    "{prefix}_CONFIG_DIR and {prefix}_CONFIG_FILE cannot both be set. \
                     Use {prefix}_CONFIG_DIR for layered configuration or \
                     {prefix}_CONFIG_FILE for a single configuration file.",
                    prefix = self.prefix
                )));
            }
            (Some(config_file), None) => Self::add_file_source(builder, config_file, true)?,
            (None, _) => self.build_layered_config(builder)?,
        };

        // FOO_SERVER__PORT -> server.port
        let builder = if self.use_env {
            builder.add_source(
                EnvSource::with_prefix(&self.prefix)
                    .prefix_separator("_")
                    .separator(ENV_SEPARATOR)
                    .ignore_empty(true),
            )
        } else {
            builder
        };

        builder.build().map_err(SourceError::from)
    }

    fn build_layered_config(
        &self,
        builder: ConfigBuilder<DefaultState>,
    ) -> Result<ConfigBuilder<DefaultState>, SourceError> {
        let config_dir = self.config_dir();
        let builder = Self::add_file_source(builder, &config_dir.join("default.toml"), true)?;
        let builder =
            Self::add_file_source(builder, &config_dir.join(self.environment.file_name()), false)?;
        Self::add_file_source(builder, &config_dir.join("local.toml"), false)
    }

    fn add_file_source(
        builder: ConfigBuilder<DefaultState>,
        path: &Path,
        required: bool,
    ) -> Result<ConfigBuilder<DefaultState>, SourceError> {
        if required && !path.exists() {
            return Err(SourceError::file_not_found(format!(
                "Required configuration file not found: {}",
                path.display()
            )));
        }

        Ok(builder.add_source(
            File::new(path.to_str().unwrap_or_default(), FileFormat::Toml).required(required),
        ))
    }
}

/// Append the leaves below `name` in dotted form
fn flatten(name: &str, value: &Value, out: &mut Vec<SourcedValue>) -> Result<(), SourceError> {
    let text = match &value.kind {
        ValueKind::Nil => return Ok(()),
        ValueKind::Table(table) => {
            for (key, child) in table {
                flatten(&format!("{name}.{key}"), child, out)?;
            }
            return Ok(());
        }
        ValueKind::Array(items) => items
            .iter()
            .map(|item| scalar(item).ok_or_else(|| SourceError::UnsupportedStructure(name.to_string())))
            .collect::<Result<Vec<_>, _>>()?
            .join(LIST_SEPARATOR),
        _ => scalar(value).ok_or_else(|| SourceError::UnsupportedStructure(name.to_string()))?,
    };

    let origin = value.origin().map(str::to_string);
    out.push((SourcedParameter::new(name, origin), text));
    Ok(())
}

/// Textual form of a scalar value
fn scalar(value: &Value) -> Option<String> {
    match &value.kind {
        ValueKind::String(s) => Some(s.clone()),
        ValueKind::Boolean(b) => Some(b.to_string()),
        ValueKind::I64(n) => Some(n.to_string()),
        ValueKind::I128(n) => Some(n.to_string()),
        ValueKind::U64(n) => Some(n.to_string()),
        ValueKind::U128(n) => Some(n.to_string()),
        ValueKind::Float(f) => Some(f.to_string()),
        ValueKind::Nil | ValueKind::Table(_) | ValueKind::Array(_) => None,
    }
}

//! Logger configuration, resolved through declared settings

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use tracing::Level;

use crate::configuration::Configuration;
use crate::conversion::from_fn;
use crate::error::{InvalidValue, SettingNotConfigured};
use crate::setting::Setting;

/// Accepted level names, lowest severity first
pub const LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// `log.level`: one of [`LEVELS`], case-insensitive
pub static LOG_LEVEL: LazyLock<Setting<String>> = LazyLock::new(|| {
    Setting::with_default("log.level", from_fn(parse_level_name), "info".to_string())
});

/// `log.format`: `full`, `compact` or `json`
pub static LOG_FORMAT: LazyLock<Setting<LogFormat>> = LazyLock::new(|| {
    Setting::with_default("log.format", from_fn(LogFormat::from_str), LogFormat::Full)
});

/// `log.colored`: ANSI colors when stdout is a terminal
pub static LOG_COLORED: LazyLock<Setting<bool>> =
    LazyLock::new(|| Setting::boolean_with_default("log.colored", true));

fn parse_level_name(value: &str) -> Result<String, InvalidValue> {
    let level = value.trim().to_lowercase();
    if LEVELS.contains(&level.as_str()) {
        Ok(level)
    } else {
        Err(InvalidValue::custom(
            value.trim(),
            format!("valid levels are: {}", LEVELS.join(", ")),
        ))
    }
}

/// Main logger configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggerConfig {
    pub level: String,
    pub format: LogFormat,
    pub colored: bool,
}

impl LoggerConfig {
    /// Resolve `log.level`, `log.format` and `log.colored` from `configuration`
    pub fn from_configuration(configuration: &Configuration) -> Result<Self, SettingNotConfigured> {
        Ok(Self {
            level: configuration.get(&LOG_LEVEL)?,
            format: configuration.get(&LOG_FORMAT)?,
            colored: configuration.get(&LOG_COLORED)?,
        })
    }

    /// Parse the log level string into a tracing::Level
    pub fn parse_level(&self) -> Result<Level, InvalidValue> {
        let level = parse_level_name(&self.level)?;
        level
            .parse()
            .map_err(|_| InvalidValue::custom(level, "not a tracing level"))
    }
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::default(),
            colored: true,
        }
    }
}

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human-readable format with all details
    #[default]
    Full,
    /// Compact single-line format
    Compact,
    /// JSON structured format
    Json,
}

impl LogFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogFormat::Full => "full",
            LogFormat::Compact => "compact",
            LogFormat::Json => "json",
        }
    }
}

impl FromStr for LogFormat {
    type Err = InvalidValue;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "full" => Ok(LogFormat::Full),
            "compact" => Ok(LogFormat::Compact),
            "json" => Ok(LogFormat::Json),
            _ => Err(InvalidValue::custom(
                s.trim(),
                "valid formats are: full, compact, json",
            )),
        }
    }
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

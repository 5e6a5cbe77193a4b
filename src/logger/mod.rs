//! Logger Module
//!
//! Console logging based on `tracing-subscriber`, configured through the
//! `log.*` settings:
//! - level filter (`RUST_LOG`-style directives are not used)
//! - Full, Compact or JSON output
//! - color control, honoured only when stdout is a terminal

pub mod config;
pub mod error;


pub use config::*;
pub use error::LoggerError;

use std::io::IsTerminal;

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::configuration::Configuration;

/// Initialize the global logger with the given configuration
///
/// Fails instead of panicking if a global subscriber is already installed.
pub fn init_logger(config: &LoggerConfig) -> anyhow::Result<()> {
    let level = config.parse_level().map_err(LoggerError::from)?;

    // Create filter from level string
    let filter = EnvFilter::try_new(level.as_str().to_lowercase())
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let use_ansi = config.colored && std::io::stdout().is_terminal();
    let registry = tracing_subscriber::registry().with(filter);

    let result = match config.format {
        LogFormat::Full => registry
            .with(fmt::layer().with_ansi(use_ansi).with_target(true).with_level(true))
            .try_init(),
        LogFormat::Compact => registry
            .with(
                fmt::layer()
                    .with_ansi(use_ansi)
                    .with_target(true)
                    .compact(),
            )
            .try_init(),
        LogFormat::Json => registry
            .with(fmt::layer().with_ansi(false).json())
            .try_init(),
    };

    result.map_err(|e| LoggerError::init(e.to_string()))?;
    Ok(())
}

/// Resolve the `log.*` settings from `configuration` and initialize the logger
pub fn init_from_configuration(configuration: &Configuration) -> anyhow::Result<()> {
    let config = LoggerConfig::from_configuration(configuration).map_err(LoggerError::from)?;
    init_logger(&config)
}

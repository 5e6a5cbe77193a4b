//! Error types for the logger

use thiserror::Error;

use crate::error::{InvalidValue, SettingNotConfigured};

/// Errors that can occur while setting up logging
#[derive(Debug, Error)]
pub enum LoggerError {
    #[error("Configuration error: {0}")]
    Config(#[from] SettingNotConfigured),

    #[error("Invalid log level: {0}")]
    Level(#[from] InvalidValue),

    #[error("Subscriber error: {message}")]
    Init { message: String },
}

impl LoggerError {
    pub fn init(message: impl Into<String>) -> Self {
        Self::Init {
            message: message.into(),
        }
    }
}

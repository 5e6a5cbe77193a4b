//! Source error types

use thiserror::Error;

use crate::error::InvalidArgument;

/// Failure to harvest or apply raw values from files and the environment
#[derive(Debug, Error)]
pub enum SourceError {
    /// Configuration file not found
    #[error("Configuration file not found: {0}")]
    FileNotFound(String),

    /// Mutual exclusivity error
    #[error("Mutual exclusivity error: {0}")]
    MutualExclusivityError(String),

    /// A value that has no flat textual form, such as a table inside an array
    #[error("Unsupported value structure at [{0}]")]
    UnsupportedStructure(String),

    /// Generic error from the config crate
    #[error("Configuration source error: {0}")]
    Other(#[from] config::ConfigError),

    /// A harvested value was rejected by the store
    #[error(transparent)]
    InvalidArgument(#[from] InvalidArgument),
}

impl SourceError {
    /// Create a new file not found error
    pub fn file_not_found<S: Into<String>>(path: S) -> Self {
        SourceError::FileNotFound(path.into())
    }

    /// Create a new mutual exclusivity error
    pub fn mutual_exclusivity<S: Into<String>>(message: S) -> Self {
        SourceError::MutualExclusivityError(message.into())
    }
}

//! Errors surfaced by the [`Configuration`](crate::Configuration) store

use thiserror::Error;

use crate::error::InvalidValue;
use crate::setting::{AnySetting, SettingId};

/// No value could be produced for a requested setting
#[derive(Debug, Clone, Error)]
pub enum SettingNotConfigured {
    /// Nothing was supplied and the setting has no default value
    #[error("The required setting [{name}] has not been configured.")]
    Missing {
        name: String,
        #[source]
        cause: InvalidValue,
    },

    /// A raw value was supplied before the setting was declared, and it does
    /// not parse against the declared setting
    #[error(
        "The setting [{name}] has been configured with an invalid value [{value}]. {cause} \
         Configuration was done through the use of the foreign parameter [{parameter}]."
    )]
    Invalid {
        name: String,
        value: String,
        #[source]
        cause: InvalidValue,
        parameter: String,
    },
}

impl SettingNotConfigured {
    /// Name of the setting that could not be resolved
    pub fn name(&self) -> &str {
        match self {
            Self::Missing { name, .. } | Self::Invalid { name, .. } => name,
        }
    }

    /// The underlying validation failure
    pub fn cause(&self) -> &InvalidValue {
        match self {
            Self::Missing { cause, .. } | Self::Invalid { cause, .. } => cause,
        }
    }
}

/// Two distinct setting declarations claimed the same name
#[derive(Debug, Clone, Error)]
#[error("Attempted to configure [{name}] by {attempted}, but it is already configured by {configured}.")]
pub struct ConflictingConfiguration {
    name: String,
    configured: String,
    attempted: String,
    configured_id: SettingId,
    attempted_id: SettingId,
}

impl ConflictingConfiguration {
    pub fn new(configured: &dyn AnySetting, attempted: &dyn AnySetting) -> Self {
        Self {
            name: configured.name().to_string(),
            configured: format!("{configured:?}"),
            attempted: format!("{attempted:?}"),
            configured_id: configured.id(),
            attempted_id: attempted.id(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Identity of the declaration that owns the name
    pub fn configured_setting(&self) -> SettingId {
        self.configured_id
    }

    /// Identity of the declaration that was rejected
    pub fn attempted_setting(&self) -> SettingId {
        self.attempted_id
    }
}

/// Anything `configure` can fail with, before it is turned into an
/// [`InvalidArgument`]
#[derive(Debug, Clone, Error)]
pub enum ConfigureFailure {
    #[error(transparent)]
    Invalid(#[from] InvalidValue),

    #[error(transparent)]
    Conflict(#[from] ConflictingConfiguration),
}

/// User facing rejection of a raw `(name, value)` pair.
///
/// The message is already localized for the store's locale.
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct InvalidArgument {
    message: String,
    #[source]
    source: ConfigureFailure,
}

impl InvalidArgument {
    pub fn new(message: impl Into<String>, source: ConfigureFailure) -> Self {
        Self {
            message: message.into(),
            source,
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn failure(&self) -> &ConfigureFailure {
        &self.source
    }
}

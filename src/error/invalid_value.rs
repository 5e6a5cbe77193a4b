//! Validation failures raised while interpreting a raw configuration value

use thiserror::Error;

use crate::numeric::Number;
use crate::setting::boolean::{FALSE_LITERALS, TRUE_LITERALS};

/// A raw value could not be interpreted for a setting.
///
/// Every variant carries enough context to render a precise message without
/// re-deriving any state; [`InvalidValue::value`] exposes the offending literal.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InvalidValue {
    /// The literal is not an integer/float in the detected radix
    #[error("[{value}] is not a valid numerical string.")]
    Number { value: String },

    /// A parsed number lies outside the type-width bounds or explicit limits
    #[error("{value} is not within the valid range [{lower},{upper}].")]
    Range {
        value: Number,
        lower: Number,
        upper: Number,
    },

    /// The literal is in neither accepted boolean set
    #[error(
        "[{value}] is not a valid boolean value, valid values are [{}] or [{}].",
        TRUE_LITERALS.join(", "),
        FALSE_LITERALS.join(", ")
    )]
    Boolean { value: String },

    /// A setting without default value was resolved with no input
    #[error("No configuration value supplied for configuration parameter [{name}].")]
    NoValue { name: String },

    /// Raised by user supplied conversions
    #[error("[{value}] is not a valid value: {reason}")]
    Custom { value: String, reason: String },
}

impl InvalidValue {
    pub fn number(value: impl Into<String>) -> Self {
        Self::Number {
            value: value.into(),
        }
    }

    pub fn boolean(value: impl Into<String>) -> Self {
        Self::Boolean {
            value: value.into(),
        }
    }

    pub fn no_value(name: impl Into<String>) -> Self {
        Self::NoValue { name: name.into() }
    }

    pub fn custom(value: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Custom {
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// The offending literal, if the failure was caused by one.
    pub fn value(&self) -> Option<String> {
        match self {
            Self::Number { value } | Self::Boolean { value } | Self::Custom { value, .. } => {
                Some(value.clone())
            }
            Self::Range { value, .. } => Some(value.to_string()),
            Self::NoValue { .. } => None,
        }
    }
}

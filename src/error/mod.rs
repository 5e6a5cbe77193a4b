//! Condition taxonomy of the settings engine

mod configuration_error;
mod invalid_value;
mod localize;

pub use configuration_error::{
    ConfigureFailure, ConflictingConfiguration, InvalidArgument, SettingNotConfigured,
};
pub use invalid_value::InvalidValue;
pub use localize::{Locale, Localize};

//! Typed-Config Library
//!
//! Typed, validated configuration settings. Raw `(name, value)` strings are
//! supplied to a [`Configuration`] store, possibly before the typed
//! [`Setting`] they belong to has been declared, and are parsed on demand.
//!
//! ```
//! use typed_config::{Configuration, NumericReader, Setting};
//!
//! let port = Setting::with_default("server.port", NumericReader::integer().as_u16(), 8080);
//! let configuration = Configuration::default();
//! configuration.configure(&port, "0x2328").unwrap();
//! assert_eq!(configuration.get(&port).unwrap(), 9000);
//! ```

pub mod config;
pub mod configuration;
pub mod conversion;
pub mod error;
pub mod logger;
pub mod numeric;
pub mod parameter;
pub mod setting;

pub use configuration::Configuration;
pub use conversion::{Conversion, ConversionExt, Converted, Identity, from_fn};
pub use error::{
    ConfigureFailure, ConflictingConfiguration, InvalidArgument, InvalidValue, Locale, Localize,
    SettingNotConfigured,
};
pub use numeric::{Number, NumericLimits, NumericReader};
pub use parameter::Parameter;
pub use setting::{AnySetting, DefaultValue, ListConversion, Setting, SettingId};

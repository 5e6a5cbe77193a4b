//! Typed setting declarations
//!
//! A [`Setting`] names a configuration parameter and knows how to turn a raw
//! string into a typed value. Declarations are immutable and cheap to clone;
//! clones share the declaration's [`SettingId`], which is what the
//! [`Configuration`](crate::Configuration) store keys resolved values by.

pub mod boolean;
mod default;
mod list;

use std::any::Any;
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

pub use boolean::BooleanConversion;
pub use default::DefaultValue;
pub use list::ListConversion;

use crate::conversion::{Conversion, Converted, Identity, StringConversion};
use crate::error::InvalidValue;
use crate::parameter::Parameter;

/// Bounds every setting value type satisfies
pub trait SettingValue: Clone + fmt::Debug + Send + Sync + 'static {}

impl<T: Clone + fmt::Debug + Send + Sync + 'static> SettingValue for T {}

/// Unique identity of a setting declaration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SettingId(u64);

impl SettingId {
    fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        Self(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for SettingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

struct Declaration<T> {
    id: SettingId,
    name: String,
    conversion: StringConversion<T>,
    default: DefaultValue<T>,
}

/// A named, typed, validated configuration parameter
pub struct Setting<T> {
    declaration: Arc<Declaration<T>>,
}

impl<T: SettingValue> Setting<T> {
    /// Setting without a default value
    pub fn new(name: impl Into<String>, conversion: impl Conversion<str, T> + 'static) -> Self {
        Self::with_default_value(name, conversion, DefaultValue::None)
    }

    pub fn with_default(
        name: impl Into<String>,
        conversion: impl Conversion<str, T> + 'static,
        default: T,
    ) -> Self {
        Self::with_default_value(name, conversion, DefaultValue::Fixed(default))
    }

    pub fn with_default_value(
        name: impl Into<String>,
        conversion: impl Conversion<str, T> + 'static,
        default: DefaultValue<T>,
    ) -> Self {
        Self {
            declaration: Arc::new(Declaration {
                id: SettingId::next(),
                name: name.into(),
                conversion: Arc::new(conversion),
                default,
            }),
        }
    }

    pub fn id(&self) -> SettingId {
        self.declaration.id
    }

    pub fn name(&self) -> &str {
        &self.declaration.name
    }

    pub fn default_value(&self) -> &DefaultValue<T> {
        &self.declaration.default
    }

    /// Interpret a raw value, or resolve the default when there is none.
    ///
    /// A conversion asking for the default (e.g. an empty list literal) is
    /// treated like absent input.
    pub fn parse(&self, value: Option<&str>) -> Result<T, InvalidValue> {
        let Some(value) = value else {
            return self.resolve_default();
        };
        match self.declaration.conversion.convert(value)? {
            Converted::Value(value) => Ok(value),
            Converted::UseDefault => self.resolve_default(),
        }
    }

    pub fn resolve_default(&self) -> Result<T, InvalidValue> {
        self.declaration.default.resolve(self.name())
    }

    /// Type-erased handle sharing this declaration
    pub fn erased(&self) -> Arc<dyn AnySetting> {
        Arc::new(self.clone())
    }
}

impl Setting<bool> {
    /// Boolean setting accepting `true/yes/on/enable(d)` and
    /// `false/no/off/disable(d)` in any letter case
    pub fn boolean(name: impl Into<String>) -> Self {
        Self::new(name, BooleanConversion)
    }

    pub fn boolean_with_default(name: impl Into<String>, default: bool) -> Self {
        Self::with_default(name, BooleanConversion, default)
    }
}

impl Setting<String> {
    pub fn string(name: impl Into<String>) -> Self {
        Self::new(name, Identity)
    }

    pub fn string_with_default(name: impl Into<String>, default: impl Into<String>) -> Self {
        Self::with_default(name, Identity, default.into())
    }
}

impl<T: SettingValue> Setting<Vec<T>> {
    /// Comma separated list of items
    pub fn list(name: impl Into<String>, item: impl Conversion<str, T> + 'static) -> Self {
        Self::new(name, ListConversion::comma_separated(item))
    }

    /// Comma separated list, falling back to `defaults` for empty input
    pub fn list_with_default(
        name: impl Into<String>,
        item: impl Conversion<str, T> + 'static,
        defaults: impl IntoIterator<Item = T>,
    ) -> Self {
        Self::with_default_value(
            name,
            ListConversion::comma_separated(item),
            DefaultValue::fixed_list(defaults),
        )
    }

    /// List whose items are separated by matches of the regular expression `pattern`
    pub fn list_separated_by(
        name: impl Into<String>,
        pattern: &str,
        item: impl Conversion<str, T> + 'static,
    ) -> Result<Self, regex::Error> {
        Ok(Self::new(name, ListConversion::separated_by(pattern, item)?))
    }

    pub fn list_separated_by_with_default(
        name: impl Into<String>,
        pattern: &str,
        item: impl Conversion<str, T> + 'static,
        defaults: impl IntoIterator<Item = T>,
    ) -> Result<Self, regex::Error> {
        Ok(Self::with_default_value(
            name,
            ListConversion::separated_by(pattern, item)?,
            DefaultValue::fixed_list(defaults),
        ))
    }
}

impl<T> Clone for Setting<T> {
    fn clone(&self) -> Self {
        Self {
            declaration: Arc::clone(&self.declaration),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Setting<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Setting{{{}", self.declaration.name)?;
        if let DefaultValue::Fixed(value) = &self.declaration.default {
            write!(f, " defaultValue={value:?}")?;
        }
        f.write_str("}")
    }
}

impl<T: SettingValue> Parameter for Setting<T> {
    fn name(&self) -> &str {
        &self.declaration.name
    }

    fn verify(&self, value: &str) -> Result<(), InvalidValue> {
        self.parse(Some(value)).map(drop)
    }

    fn describe(&self) -> String {
        format!("{self:?}")
    }

    fn as_setting(&self) -> Option<Arc<dyn AnySetting>> {
        Some(self.erased())
    }
}

/// Type-erased view of a [`Setting`], as held by the configuration store
pub trait AnySetting: fmt::Debug + Send + Sync {
    fn id(&self) -> SettingId;

    fn name(&self) -> &str;

    /// Parse a raw value into the setting's (boxed) value type
    fn parse_any(&self, value: &str) -> Result<Box<dyn Any + Send + Sync>, InvalidValue>;
}

impl<T: SettingValue> AnySetting for Setting<T> {
    fn id(&self) -> SettingId {
        self.declaration.id
    }

    fn name(&self) -> &str {
        &self.declaration.name
    }

    fn parse_any(&self, value: &str) -> Result<Box<dyn Any + Send + Sync>, InvalidValue> {
        let parsed = self.parse(Some(value))?;
        Ok(Box::new(parsed))
    }
}

//! Fallback resolution for settings that received no input

use std::fmt;

use crate::error::InvalidValue;

/// What a setting resolves to when nothing was supplied
#[derive(Clone, PartialEq)]
pub enum DefaultValue<T> {
    /// No fallback; resolving fails with [`InvalidValue::NoValue`]
    None,
    /// Always resolves to this value
    Fixed(T),
}

impl<T: Clone> DefaultValue<T> {
    pub fn fixed(value: T) -> Self {
        Self::Fixed(value)
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }

    /// Resolve the fallback on behalf of the setting called `name`.
    pub fn resolve(&self, name: &str) -> Result<T, InvalidValue> {
        match self {
            Self::None => Err(InvalidValue::no_value(name)),
            Self::Fixed(value) => Ok(value.clone()),
        }
    }
}

impl<T> DefaultValue<Vec<T>> {
    /// Fixed ordered list, kept exactly as given (no deduplication)
    pub fn fixed_list(values: impl IntoIterator<Item = T>) -> Self {
        Self::Fixed(values.into_iter().collect())
    }
}

impl<T> Default for DefaultValue<T> {
    fn default() -> Self {
        Self::None
    }
}

impl<T: fmt::Debug> fmt::Debug for DefaultValue<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => f.write_str("<NoDefaultValue>"),
            Self::Fixed(value) => write!(f, "<DefaultValue: {value:?}>"),
        }
    }
}

//! Message localization hook

use std::fmt;

use crate::error::{
    ConfigureFailure, ConflictingConfiguration, InvalidArgument, InvalidValue,
    SettingNotConfigured,
};

/// Language tag used when rendering condition messages
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Locale(String);

impl Locale {
    /// Environment variables consulted by [`Locale::from_env`], highest priority first
    pub const ENV_VARS: [&'static str; 3] = ["LC_ALL", "LC_MESSAGES", "LANG"];

    pub fn new(tag: impl Into<String>) -> Self {
        Self(tag.into())
    }

    /// Read the locale from the POSIX locale variables.
    ///
    /// The first non-empty variable decides; `C`/`POSIX` and unset variables
    /// fall back to `en`.
    pub fn from_env() -> Self {
        Self::ENV_VARS
            .iter()
            .filter_map(|key| std::env::var(key).ok())
            .find(|value| !value.trim().is_empty())
            .and_then(|value| Self::parse(&value))
            .unwrap_or_default()
    }

    /// Parse a POSIX locale string such as `de_DE.UTF-8@euro` into `de-DE`
    fn parse(raw: &str) -> Option<Self> {
        let tag = raw.split(['.', '@']).next()?.trim();
        match tag {
            "" | "C" | "POSIX" => None,
            tag => Some(Self(tag.replace('_', "-"))),
        }
    }

    pub fn tag(&self) -> &str {
        &self.0
    }

    /// Primary language subtag, e.g. `de` for `de-DE`
    pub fn language(&self) -> &str {
        self.0.split('-').next().unwrap_or(&self.0)
    }
}

impl Default for Locale {
    fn default() -> Self {
        Self("en".to_string())
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Render a condition for a locale.
///
/// The provided implementation returns the built-in message unmodified;
/// callers that need translations implement this for their own wrappers.
pub trait Localize: fmt::Display {
    fn localize(&self, _locale: &Locale) -> String {
        self.to_string()
    }
}

impl Localize for InvalidValue {}
impl Localize for SettingNotConfigured {}
impl Localize for ConflictingConfiguration {}
impl Localize for InvalidArgument {}

impl Localize for ConfigureFailure {
    fn localize(&self, locale: &Locale) -> String {
        match self {
            Self::Invalid(invalid) => invalid.localize(locale),
            Self::Conflict(conflict) => conflict.localize(locale),
        }
    }
}

//! Deployment environment selecting the layered override file

use std::fmt;
use std::str::FromStr;

use tracing::warn;

use crate::error::InvalidValue;

/// Deployment environment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Environment {
    #[default]
    Development,
    Test,
    Staging,
    Production,
}

/// Accepted spellings, compared ignoring ASCII case
const ALIASES: [(&str, Environment); 7] = [
    ("development", Environment::Development),
    ("dev", Environment::Development),
    ("test", Environment::Test),
    ("staging", Environment::Staging),
    ("stage", Environment::Staging),
    ("production", Environment::Production),
    ("prod", Environment::Production),
];

impl Environment {
    pub const ALL: [Environment; 4] = [
        Environment::Development,
        Environment::Test,
        Environment::Staging,
        Environment::Production,
    ];

    /// Canonical lowercase name, also the stem of the override file
    pub fn name(self) -> &'static str {
        match self {
            Environment::Development => "development",
            Environment::Test => "test",
            Environment::Staging => "staging",
            Environment::Production => "production",
        }
    }

    pub fn file_name(self) -> String {
        format!("{}.toml", self.name())
    }

    /// Environment named by a control variable's value.
    ///
    /// An unknown name is logged and replaced by the default environment.
    pub fn resolve(raw: &str) -> Self {
        raw.parse().unwrap_or_else(|error: InvalidValue| {
            let fallback = Self::default();
            warn!(%error, %fallback, "Unknown deployment environment");
            fallback
        })
    }
}

impl FromStr for Environment {
    type Err = InvalidValue;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        ALIASES
            .iter()
            .find(|(alias, _)| alias.eq_ignore_ascii_case(wanted))
            .map(|&(_, environment)| environment)
            .ok_or_else(|| {
                let names: Vec<_> = Self::ALL.iter().map(|e| e.name()).collect();
                InvalidValue::custom(wanted, format!("valid environments are: {}", names.join(", ")))
            })
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

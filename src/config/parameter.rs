//! Untyped parameters harvested from configuration sources

use std::fmt;

use crate::error::InvalidValue;
use crate::parameter::Parameter;

/// A dotted name found in a file or environment variable
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourcedParameter {
    name: String,
    origin: Option<String>,
}

impl SourcedParameter {
    pub fn new(name: impl Into<String>, origin: Option<String>) -> Self {
        Self {
            name: name.into(),
            origin,
        }
    }

    /// Where the value came from (a file path, or the environment), if known
    pub fn origin(&self) -> Option<&str> {
        self.origin.as_deref()
    }
}

impl Parameter for SourcedParameter {
    fn name(&self) -> &str {
        &self.name
    }

    fn verify(&self, value: &str) -> Result<(), InvalidValue> {
        if value.contains('\0') {
            return Err(InvalidValue::custom(
                value.escape_default().to_string(),
                "contains a NUL character",
            ));
        }
        Ok(())
    }

    fn describe(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for SourcedParameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.origin {
            Some(origin) => write!(f, "{} from {}", self.name, origin),
            None => f.write_str(&self.name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verify_rejects_nul() {
        let parameter = SourcedParameter::new("server.host", None);
        assert!(parameter.verify("localhost").is_ok());

        let err = parameter.verify("local\0host").unwrap_err();
        assert_eq!(
            err.to_string(),
            "[local\\u{0}host] is not a valid value: contains a NUL character"
        );
    }

    #[test]
    fn test_describe_names_origin() {
        let parameter = SourcedParameter::new("server.port", Some("config/default.toml".into()));
        assert_eq!(parameter.describe(), "server.port from config/default.toml");
        assert_eq!(SourcedParameter::new("x", None).describe(), "x");
    }
}

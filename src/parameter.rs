//! Untyped parameters
//!
//! A [`Parameter`] is what a loader knows about a raw value before the typed
//! [`Setting`](crate::Setting) it belongs to has been declared: a name to join
//! on and a light validation contract.

use std::sync::Arc;

use crate::error::InvalidValue;
use crate::setting::AnySetting;

pub trait Parameter {
    /// Join key against typed settings
    fn name(&self) -> &str;

    /// Reject raw values that can never be valid for this parameter
    fn verify(&self, value: &str) -> Result<(), InvalidValue>;

    /// Description used in diagnostics naming the originating parameter
    fn describe(&self) -> String {
        format!("Parameter{{{}}}", self.name())
    }

    /// The typed declaration behind this parameter, if it is one
    fn as_setting(&self) -> Option<Arc<dyn AnySetting>> {
        None
    }
}

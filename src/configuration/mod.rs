//! The configuration store
//!
//! [`Configuration`] reconciles raw `(name, value)` pairs with typed
//! [`Setting`] declarations, in either order:
//! - a value for a declared setting is parsed immediately by `configure`
//! - a value for an undeclared name is verified against its untyped
//!   [`Parameter`] and kept pending until `get` asks for the setting
//! - a failed pending value stays pending so a later `configure` can fix it
//!
//! All operations run under one mutex; they only parse strings and touch
//! in-memory maps, so critical sections are short.

use std::any::Any;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::{debug, trace, warn};

use crate::error::{
    ConfigureFailure, ConflictingConfiguration, InvalidArgument, Locale, Localize,
    SettingNotConfigured,
};
use crate::parameter::Parameter;
use crate::setting::{AnySetting, Setting, SettingId, SettingValue};

#[cfg(test)]
mod tests;

/// Raw value buffered for a name without a declared setting
#[derive(Debug, Clone)]
struct PendingValue {
    parameter: String,
    value: String,
}

#[derive(Default)]
struct State {
    /// Current owner declaration per name
    settings: HashMap<String, Arc<dyn AnySetting>>,
    /// Successfully parsed or set values, keyed by declaration identity
    resolved: HashMap<SettingId, Box<dyn Any + Send + Sync>>,
    pending: HashMap<String, PendingValue>,
}

impl State {
    fn configure(&mut self, parameter: &dyn Parameter, value: &str) -> Result<(), ConfigureFailure> {
        let name = parameter.name();
        let setting = parameter
            .as_setting()
            .or_else(|| self.settings.get(name).cloned());

        match setting {
            Some(setting) => {
                let parsed = setting.parse_any(value)?;
                self.install(setting, parsed)?;
                debug!(setting = name, "Configured setting from raw value");
            }
            None => {
                parameter.verify(value)?;
                self.pending.insert(
                    name.to_string(),
                    PendingValue {
                        parameter: parameter.describe(),
                        value: value.to_string(),
                    },
                );
                debug!(setting = name, "Buffered value for undeclared setting");
            }
        }
        Ok(())
    }

    /// Store `value` for `setting`, claiming its name if unowned.
    fn install(
        &mut self,
        setting: Arc<dyn AnySetting>,
        value: Box<dyn Any + Send + Sync>,
    ) -> Result<(), ConflictingConfiguration> {
        if let Some(owner) = self.settings.get(setting.name()) {
            if owner.id() != setting.id() {
                return Err(ConflictingConfiguration::new(owner.as_ref(), setting.as_ref()));
            }
        } else {
            self.settings
                .insert(setting.name().to_string(), Arc::clone(&setting));
        }

        self.pending.remove(setting.name());
        self.resolved.insert(setting.id(), value);
        Ok(())
    }
}

/// Store of typed configuration values
pub struct Configuration {
    locale: Locale,
    state: Mutex<State>,
}

impl Configuration {
    /// Empty store localizing messages for the process locale
    pub fn new() -> Self {
        Self::with_locale(Locale::from_env())
    }

    pub fn with_locale(locale: Locale) -> Self {
        Self {
            locale,
            state: Mutex::new(State::default()),
        }
    }

    pub fn locale(&self) -> &Locale {
        &self.locale
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        // conversions run before any map is touched, so a panic in one
        // leaves the state as it was before the call
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Supply a raw value for `parameter`.
    ///
    /// If a typed setting is known for the name (or `parameter` is one), the
    /// value is parsed and cached now; otherwise it is verified and buffered.
    ///
    /// # Errors
    ///
    /// Every validation failure or naming conflict is reported as an
    /// [`InvalidArgument`] with a message localized for this store's locale.
    pub fn configure(&self, parameter: &dyn Parameter, value: &str) -> Result<(), InvalidArgument> {
        self.lock()
            .configure(parameter, value)
            .map_err(|failure| {
                warn!(parameter = parameter.name(), error = %failure, "Rejected configuration value");
                InvalidArgument::new(failure.localize(&self.locale), failure)
            })
    }

    /// [`configure`](Self::configure) every pair, stopping at the first failure.
    pub fn configure_all<'a, I>(&self, pairs: I) -> Result<(), InvalidArgument>
    where
        I: IntoIterator<Item = (&'a dyn Parameter, &'a str)>,
    {
        pairs
            .into_iter()
            .try_for_each(|(parameter, value)| self.configure(parameter, value))
    }

    /// Resolve the value of `setting`.
    ///
    /// Order of precedence: a cached value for this exact declaration, a
    /// buffered raw value for its name, the setting's default.
    ///
    /// # Errors
    ///
    /// - [`SettingNotConfigured::Invalid`] if a buffered value does not parse;
    ///   the value stays buffered
    /// - [`SettingNotConfigured::Missing`] if there is no value and no default
    pub fn get<T: SettingValue>(&self, setting: &Setting<T>) -> Result<T, SettingNotConfigured> {
        let mut state = self.lock();
        let name = setting.name();

        if let Some(value) = state
            .resolved
            .get(&setting.id())
            .and_then(|value| value.downcast_ref::<T>())
        {
            trace!(setting = name, "Using cached setting value");
            return Ok(value.clone());
        }

        let buffered = state
            .pending
            .get(name)
            .cloned()
            .map(|pending| (setting.parse(Some(pending.value.as_str())), pending));

        state.settings.insert(name.to_string(), setting.erased());

        if let Some((parsed, pending)) = buffered {
            return match parsed {
                Ok(value) => {
                    state.pending.remove(name);
                    state.resolved.insert(setting.id(), Box::new(value.clone()));
                    debug!(setting = name, "Resolved buffered value");
                    Ok(value)
                }
                Err(cause) => {
                    warn!(setting = name, error = %cause, "Buffered value is invalid");
                    Err(SettingNotConfigured::Invalid {
                        name: name.to_string(),
                        value: cause.value().unwrap_or(pending.value),
                        cause,
                        parameter: pending.parameter,
                    })
                }
            };
        }

        trace!(setting = name, "Falling back to default value");
        setting
            .resolve_default()
            .map_err(|cause| SettingNotConfigured::Missing {
                name: name.to_string(),
                cause,
            })
    }

    /// Install a typed value directly, bypassing string parsing.
    ///
    /// # Errors
    ///
    /// [`ConflictingConfiguration`] if a different declaration owns the name.
    pub fn set<T: SettingValue>(&self, setting: &Setting<T>, value: T) -> Result<(), ConflictingConfiguration> {
        self.lock()
            .install(setting.erased(), Box::new(value))
            .inspect(|_| debug!(setting = setting.name(), "Installed typed value"))
            .inspect_err(|conflict| warn!(error = %conflict, "Rejected conflicting setting"))
    }

    /// Whether a raw value for `name` is buffered and not yet resolved
    pub fn is_pending(&self, name: &str) -> bool {
        self.lock().pending.contains_key(name)
    }

    /// Names with buffered, unresolved values, sorted
    pub fn pending_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.lock().pending.keys().cloned().collect();
        names.sort();
        names
    }
}

impl Default for Configuration {
    fn default() -> Self {
        Self::new()
    }
}

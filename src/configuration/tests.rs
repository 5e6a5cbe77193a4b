use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::thread;

use super::*;
use crate::conversion::{Identity, from_fn};
use crate::error::InvalidValue;
use crate::numeric::NumericReader;

/// Untyped parameter that accepts anything, like a loader that knows names only
struct ForeignParameter {
    name: String,
}

impl ForeignParameter {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
        }
    }
}

impl Parameter for ForeignParameter {
    fn name(&self) -> &str {
        &self.name
    }

    fn verify(&self, _value: &str) -> Result<(), InvalidValue> {
        Ok(())
    }

    fn describe(&self) -> String {
        format!("ForeignParameter({})", self.name)
    }
}

/// Untyped parameter that only admits digits
struct DigitsParameter;

impl Parameter for DigitsParameter {
    fn name(&self) -> &str {
        "digits"
    }

    fn verify(&self, value: &str) -> Result<(), InvalidValue> {
        if value.chars().all(|c| c.is_ascii_digit()) {
            Ok(())
        } else {
            Err(InvalidValue::custom(value, "expected digits"))
        }
    }
}

fn configuration(name: &str, value: &str) -> Configuration {
    let configuration = Configuration::with_locale(Locale::default());
    configuration
        .configure(&ForeignParameter::new(name), value)
        .unwrap();
    configuration
}

// ============================================================================
// Resolution order
// ============================================================================

#[test]
fn test_reads_configured_value() {
    let setting = Setting::string("string_parameter");
    assert_eq!(
        configuration("string_parameter", "hello world")
            .get(&setting)
            .unwrap(),
        "hello world"
    );
}

#[test]
fn test_uses_default_if_not_configured() {
    let setting = Setting::string_with_default("string_parameter_with_default", "default value");
    assert_eq!(Configuration::default().get(&setting).unwrap(), "default value");
}

#[test]
fn test_configured_value_overrides_default() {
    let setting = Setting::string_with_default("string_parameter_with_default", "default value");
    let configuration = configuration("string_parameter_with_default", "hello world");
    assert_eq!(configuration.get(&setting).unwrap(), "hello world");
}

#[test]
fn test_configure_after_declaration_overrides_default() {
    let configuration = Configuration::default();
    let setting = Setting::with_default("port", NumericReader::integer().as_u16(), 8080);
    assert_eq!(configuration.get(&setting).unwrap(), 8080);

    configuration
        .configure(&ForeignParameter::new("port"), "9090")
        .unwrap();
    assert_eq!(configuration.get(&setting).unwrap(), 9090);
}

#[test]
fn test_missing_setting_without_default() {
    let setting = Setting::string("string_parameter");
    let err = Configuration::default().get(&setting).unwrap_err();

    assert_eq!(
        err.to_string(),
        "The required setting [string_parameter] has not been configured."
    );
    assert_eq!(err.name(), "string_parameter");
    assert_eq!(err.cause(), &InvalidValue::no_value("string_parameter"));
}

#[test]
fn test_cached_value_survives_repeated_get() {
    let setting = Setting::new("int_parameter", NumericReader::integer().as_i32());
    let configuration = configuration("int_parameter", "0x2A");

    assert_eq!(configuration.get(&setting).unwrap(), 42);
    assert!(!configuration.is_pending("int_parameter"));
    assert_eq!(configuration.get(&setting).unwrap(), 42);
}

// ============================================================================
// Booleans
// ============================================================================

#[test]
fn test_parses_boolean_parameter() {
    let setting = Setting::boolean("boolean_parameter");
    for literal in [
        "true", "on", "yes", "enable", "enabled", "True", "TRUE", "On", "ON", "YES", "Yes",
        "Enable", "ENABLE", "Enabled", "ENABLED",
    ] {
        assert!(
            configuration("boolean_parameter", literal)
                .get(&setting)
                .unwrap(),
            "{literal}"
        );
    }
    for literal in [
        "false", "off", "no", "disable", "disabled", "False", "FALSE", "Off", "OFF", "No", "NO",
        "Disable", "DISABLE", "Disabled", "DISABLED",
    ] {
        assert!(
            !configuration("boolean_parameter", literal)
                .get(&setting)
                .unwrap(),
            "{literal}"
        );
    }
}

#[test]
fn test_junk_boolean_names_foreign_parameter() {
    let setting = Setting::boolean("boolean_parameter");
    let configuration = configuration("boolean_parameter", "junk");

    // the failed literal stays buffered, so every lookup reports it again
    for _ in 0..3 {
        let err = configuration.get(&setting).unwrap_err();
        assert!(matches!(err, SettingNotConfigured::Invalid { .. }));
        assert!(
            err.to_string().starts_with(
                "The setting [boolean_parameter] has been configured with an invalid value [junk]. \
                 [junk] is not a valid boolean value, valid values are [true, yes, on, enable, enabled] \
                 or [false, no, off, disable, disabled]. Configuration was done through the use of the \
                 foreign parameter [ForeignParameter("
            ),
            "{err}"
        );
        assert!(configuration.is_pending("boolean_parameter"));
    }
}

#[test]
fn test_boolean_defaults() {
    let boolean_parameter = Setting::boolean("boolean_parameter");
    let boolean_parameter_false = Setting::boolean_with_default("boolean_parameter_false", false);
    let boolean_parameter_true = Setting::boolean_with_default("boolean_parameter_false", true);
    let configuration = Configuration::default();

    let err = configuration.get(&boolean_parameter).unwrap_err();
    assert_eq!(
        err.to_string(),
        "The required setting [boolean_parameter] has not been configured."
    );

    // lookups re-register the owner, so same-named settings do not conflict here
    assert!(configuration.get(&boolean_parameter_true).unwrap());
    assert!(!configuration.get(&boolean_parameter_false).unwrap());
}

// ============================================================================
// Pending values
// ============================================================================

#[test]
fn test_invalid_pending_value_can_be_corrected() {
    let setting = Setting::new("byte_parameter", NumericReader::integer().as_i8());
    let configuration = configuration("byte_parameter", "0xFF");

    let err = configuration.get(&setting).unwrap_err();
    match &err {
        SettingNotConfigured::Invalid {
            value, parameter, ..
        } => {
            assert_eq!(value, "255");
            assert_eq!(parameter, "ForeignParameter(byte_parameter)");
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(
        err.cause().to_string(),
        "255 is not within the valid range [-128,127]."
    );

    configuration
        .configure(&ForeignParameter::new("byte_parameter"), "0x7F")
        .unwrap();
    assert_eq!(configuration.get(&setting).unwrap(), 127);
    assert!(configuration.pending_names().is_empty());
}

#[test]
fn test_foreign_verification_rejects_before_buffering() {
    let configuration = Configuration::default();
    let err = configuration.configure(&DigitsParameter, "12a").unwrap_err();

    assert_eq!(err.message(), "[12a] is not a valid value: expected digits");
    assert!(matches!(err.failure(), ConfigureFailure::Invalid(_)));
    assert!(!configuration.is_pending("digits"));

    configuration.configure(&DigitsParameter, "12").unwrap();
    assert_eq!(configuration.pending_names(), vec!["digits".to_string()]);
}

#[test]
fn test_pending_names_are_sorted() {
    let configuration = Configuration::default();
    let pairs = [("zeta", "1"), ("alpha", "2"), ("mid", "3")];
    let parameters: Vec<ForeignParameter> = pairs
        .iter()
        .map(|(name, _)| ForeignParameter::new(name))
        .collect();

    configuration
        .configure_all(
            parameters
                .iter()
                .zip(pairs.iter())
                .map(|(parameter, (_, value))| (parameter as &dyn Parameter, *value)),
        )
        .unwrap();

    assert_eq!(
        configuration.pending_names(),
        vec!["alpha".to_string(), "mid".to_string(), "zeta".to_string()]
    );
}

#[test]
fn test_configure_all_stops_at_first_failure() {
    let configuration = Configuration::default();
    let first = ForeignParameter::new("first");
    let last = ForeignParameter::new("last");
    let pairs: [(&dyn Parameter, &str); 3] =
        [(&first, "1"), (&DigitsParameter, "x"), (&last, "3")];

    assert!(configuration.configure_all(pairs).is_err());
    assert!(configuration.is_pending("first"));
    assert!(!configuration.is_pending("last"));
}

// ============================================================================
// Typed configuration and conflicts
// ============================================================================

#[test]
fn test_set_conflicts_with_other_declaration() {
    let configuration = Configuration::default();
    let first = Setting::string("name");
    let second = Setting::string("name");

    configuration.set(&first, "one".to_string()).unwrap();
    let conflict = configuration.set(&second, "two".to_string()).unwrap_err();

    assert_eq!(conflict.name(), "name");
    assert_eq!(conflict.configured_setting(), first.id());
    assert_eq!(conflict.attempted_setting(), second.id());
    assert_eq!(
        conflict.to_string(),
        "Attempted to configure [name] by Setting{name}, but it is already configured by Setting{name}."
    );
    assert_eq!(configuration.get(&first).unwrap(), "one");
}

#[test]
fn test_set_same_declaration_overwrites() {
    let configuration = Configuration::default();
    let setting = Setting::new("long_parameter", NumericReader::integer().as_i64());

    configuration.set(&setting, 1).unwrap();
    configuration.set(&setting.clone(), 2).unwrap();
    assert_eq!(configuration.get(&setting).unwrap(), 2);
}

#[test]
fn test_set_clears_stale_pending_value() {
    let configuration = configuration("double_parameter", "not a number");
    let setting = Setting::new("double_parameter", NumericReader::floating_point().as_f64());

    configuration.set(&setting, 2.5).unwrap();
    assert!(!configuration.is_pending("double_parameter"));
    assert_eq!(configuration.get(&setting).unwrap(), 2.5);
}

#[test]
fn test_configure_with_setting_parses_immediately() {
    let configuration = Configuration::default();
    let setting = Setting::new("short_parameter", NumericReader::integer().as_i16());

    configuration.configure(&setting, "0o52").unwrap();
    assert!(!configuration.is_pending("short_parameter"));
    assert_eq!(configuration.get(&setting).unwrap(), 42);

    let err = configuration.configure(&setting, "0xFFFF").unwrap_err();
    assert_eq!(
        err.message(),
        "65535 is not within the valid range [-32768,32767]."
    );
    assert_eq!(configuration.get(&setting).unwrap(), 42);
}

#[test]
fn test_configure_known_name_parses_against_owner() {
    let configuration = Configuration::default();
    let setting = Setting::with_default("float_parameter", NumericReader::floating_point().as_f32(), 1.5);
    assert_eq!(configuration.get(&setting).unwrap(), 1.5);

    let err = configuration
        .configure(&ForeignParameter::new("float_parameter"), "fast")
        .unwrap_err();
    assert_eq!(err.message(), "[fast] is not a valid numerical string.");
    assert!(!configuration.is_pending("float_parameter"));

    configuration
        .configure(&ForeignParameter::new("float_parameter"), "0.25")
        .unwrap();
    assert_eq!(configuration.get(&setting).unwrap(), 0.25);
}

#[test]
fn test_configure_with_competing_setting_is_invalid_argument() {
    let configuration = Configuration::default();
    let owner = Setting::boolean("flag");
    let intruder = Setting::boolean_with_default("flag", true);

    configuration.set(&owner, false).unwrap();
    let err = configuration.configure(&intruder, "yes").unwrap_err();

    assert!(matches!(err.failure(), ConfigureFailure::Conflict(_)));
    assert_eq!(
        err.message(),
        "Attempted to configure [flag] by Setting{flag defaultValue=true}, \
         but it is already configured by Setting{flag}."
    );
    assert!(!configuration.get(&owner).unwrap());
}

// ============================================================================
// Lists and numerics
// ============================================================================

#[test]
fn test_list_settings() {
    let plain = Setting::<Vec<String>>::list("string_list_parameter", Identity);
    let with_default = Setting::list_with_default(
        "string_list_parameter_with_default_list",
        Identity,
        ["one", "two", "three"].map(String::from),
    );
    let configuration = Configuration::default();
    configuration
        .configure(&ForeignParameter::new("string_list_parameter"), "a,b,a")
        .unwrap();
    configuration
        .configure(
            &ForeignParameter::new("string_list_parameter_with_default_list"),
            "  ",
        )
        .unwrap();

    assert_eq!(
        configuration.get(&plain).unwrap(),
        ["a", "b", "a"].map(String::from)
    );
    assert_eq!(
        configuration.get(&with_default).unwrap(),
        ["one", "two", "three"].map(String::from)
    );
}

#[test]
fn test_plus_separated_list_with_default() {
    let setting = Setting::list_separated_by_with_default(
        "plus_separated_list_parameter_with_default_list",
        r"\+",
        NumericReader::integer().as_i32(),
        [1, 2, 3],
    )
    .unwrap();

    assert_eq!(Configuration::default().get(&setting).unwrap(), vec![1, 2, 3]);

    let configured = configuration(setting.name(), "4+0x5+6");
    assert_eq!(configured.get(&setting).unwrap(), vec![4, 5, 6]);
}

#[test]
fn test_numeric_defaults() {
    let configuration = Configuration::default();
    let byte = Setting::with_default("byte_parameter_with_default", NumericReader::integer().as_i8(), 42);
    let long = Setting::with_default("long_parameter_with_default", NumericReader::integer().as_i64(), 42);
    let double = Setting::with_default(
        "double_parameter_with_default",
        NumericReader::floating_point().as_f64(),
        2.5,
    );

    assert_eq!(configuration.get(&byte).unwrap(), 42);
    assert_eq!(configuration.get(&long).unwrap(), 42);
    assert_eq!(configuration.get(&double).unwrap(), 2.5);
}

#[test]
fn test_limited_numeric_setting() {
    let setting = Setting::new(
        "workers",
        NumericReader::integer().upper_limit(1000).as_i64(),
    );
    let err = configuration("workers", "1001").get(&setting).unwrap_err();
    assert_eq!(
        err.cause().to_string(),
        "1001 is not within the valid range [-9223372036854775808,1000]."
    );
}

#[test]
fn test_panicking_conversion_keeps_value_pending() {
    let configuration = configuration("retries", "3");
    let broken = Setting::new(
        "retries",
        from_fn(|_: &str| -> Result<i32, InvalidValue> { panic!("conversion bug") }),
    );

    let outcome = panic::catch_unwind(AssertUnwindSafe(|| configuration.get(&broken)));
    assert!(outcome.is_err());
    assert!(configuration.is_pending("retries"));
    assert_eq!(configuration.pending_names(), vec!["retries".to_string()]);

    let retries = Setting::new("retries", NumericReader::integer().as_i32());
    assert_eq!(configuration.get(&retries).unwrap(), 3);
    assert!(!configuration.is_pending("retries"));
}

// ============================================================================
// Concurrency
// ============================================================================

#[test]
fn test_concurrent_resolution_is_consistent() {
    let configuration = Arc::new(configuration("threads", "8"));
    let setting = Setting::new("threads", NumericReader::integer().as_u32());

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let configuration = Arc::clone(&configuration);
            let setting = setting.clone();
            thread::spawn(move || configuration.get(&setting).unwrap())
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), 8);
    }
}

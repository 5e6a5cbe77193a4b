//! Boolean literal parsing

use crate::conversion::{Conversion, Converted};
use crate::error::InvalidValue;

/// Literals accepted as `true`, matched case-insensitively
pub const TRUE_LITERALS: [&str; 5] = ["true", "yes", "on", "enable", "enabled"];

/// Literals accepted as `false`, matched case-insensitively
pub const FALSE_LITERALS: [&str; 5] = ["false", "no", "off", "disable", "disabled"];

/// Conversion behind [`Setting::boolean`](crate::Setting::boolean)
#[derive(Debug, Clone, Copy, Default)]
pub struct BooleanConversion;

impl Conversion<str, bool> for BooleanConversion {
    fn convert(&self, source: &str) -> Result<Converted<bool>, InvalidValue> {
        parse_bool(source).map(Converted::Value)
    }
}

pub fn parse_bool(literal: &str) -> Result<bool, InvalidValue> {
    let literal = literal.trim();
    let matches = |candidates: &[&str]| {
        candidates
            .iter()
            .any(|candidate| candidate.eq_ignore_ascii_case(literal))
    };

    if matches(&TRUE_LITERALS) {
        Ok(true)
    } else if matches(&FALSE_LITERALS) {
        Ok(false)
    } else {
        Err(InvalidValue::boolean(literal))
    }
}

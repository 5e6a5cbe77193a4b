//! Explicit lower/upper limits on numeric settings

use crate::error::InvalidValue;
use crate::numeric::number::{Narrow, Number};

/// Optional exclusive bounds attached to a numeric reader.
///
/// A value is admitted only if it is strictly greater than `lower` and
/// strictly less than `upper`; the limit values themselves are rejected.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct NumericLimits {
    lower: Option<Number>,
    upper: Option<Number>,
}

impl NumericLimits {
    pub fn new(lower: Option<Number>, upper: Option<Number>) -> Self {
        Self { lower, upper }
    }

    pub fn unbounded() -> Self {
        Self::default()
    }

    pub fn with_lower(mut self, lower: impl Into<Number>) -> Self {
        self.lower = Some(lower.into());
        self
    }

    pub fn with_upper(mut self, upper: impl Into<Number>) -> Self {
        self.upper = Some(upper.into());
        self
    }

    pub fn lower(&self) -> Option<Number> {
        self.lower
    }

    pub fn upper(&self) -> Option<Number> {
        self.upper
    }

    pub fn is_unbounded(&self) -> bool {
        self.lower.is_none() && self.upper.is_none()
    }

    pub fn admits(&self, value: Number) -> bool {
        self.lower.is_none_or(|lower| value > lower) && self.upper.is_none_or(|upper| value < upper)
    }

    /// Bounds reported for a target type: the explicit limit where one is
    /// configured, the type's natural bound otherwise.
    pub fn effective_bounds<N: Narrow>(&self) -> (Number, Number) {
        (self.lower.unwrap_or(N::MIN), self.upper.unwrap_or(N::MAX))
    }

    /// Narrow `value` to `N`, then enforce the explicit limits.
    pub fn check<N: Narrow>(&self, value: Number) -> Result<N, InvalidValue> {
        let out_of_range = || {
            let (lower, upper) = self.effective_bounds::<N>();
            InvalidValue::Range {
                value,
                lower,
                upper,
            }
        };

        let narrowed = N::narrow(value).ok_or_else(out_of_range)?;
        if self.admits(value) {
            Ok(narrowed)
        } else {
            Err(out_of_range())
        }
    }
}

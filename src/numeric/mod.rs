//! Numeric settings
//!
//! Reading happens in two stages joined with [`Combined`]:
//! - a [`NumericReader`] turns the literal into a generic [`Number`]
//!   (integers honour `0x`, `0o` and `0b` radix prefixes)
//! - a [`Narrowing`] converts that number to a fixed-width target and
//!   enforces the reader's [`NumericLimits`]
//!
//! ```ignore
//! let port = Setting::with_default(
//!     "server.port",
//!     NumericReader::integer().lower_limit(0).as_u16(),
//!     8080,
//! );
//! ```

mod limits;
mod number;

use std::marker::PhantomData;

pub use limits::NumericLimits;
pub use number::{Narrow, Number};

use crate::conversion::{Combined, Conversion, Converted};
use crate::error::InvalidValue;

/// Conversion from a raw literal to a narrowed, limit-checked number
pub type NumberConversion<N> = Combined<NumericReader, Narrowing<N>, Number>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Notation {
    Integer,
    FloatingPoint,
}

/// Builder and first stage of a numeric conversion
#[derive(Debug, Clone, Copy)]
pub struct NumericReader {
    notation: Notation,
    limits: NumericLimits,
}

impl NumericReader {
    /// Read integer literals, in base 10 or with a radix prefix
    pub fn integer() -> Self {
        Self {
            notation: Notation::Integer,
            limits: NumericLimits::unbounded(),
        }
    }

    /// Read base-10 floating-point literals
    pub fn floating_point() -> Self {
        Self {
            notation: Notation::FloatingPoint,
            limits: NumericLimits::unbounded(),
        }
    }

    pub fn lower_limit(mut self, limit: impl Into<Number>) -> Self {
        self.limits = self.limits.with_lower(limit);
        self
    }

    pub fn upper_limit(mut self, limit: impl Into<Number>) -> Self {
        self.limits = self.limits.with_upper(limit);
        self
    }

    pub fn limits(&self) -> NumericLimits {
        self.limits
    }

    /// Parse a literal without narrowing or limit checks.
    pub fn read(&self, literal: &str) -> Result<Number, InvalidValue> {
        let literal = literal.trim();
        match self.notation {
            Notation::Integer => read_integer(literal),
            Notation::FloatingPoint => literal
                .parse::<f64>()
                .map(Number::Float)
                .map_err(|_| InvalidValue::number(literal)),
        }
    }

    /// Conversion to any fixed-width target
    pub fn as_number<N: Narrow>(self) -> NumberConversion<N> {
        let narrowing = Narrowing::new(self.limits);
        Combined::new(self, narrowing)
    }

    pub fn as_i8(self) -> NumberConversion<i8> {
        self.as_number()
    }

    pub fn as_i16(self) -> NumberConversion<i16> {
        self.as_number()
    }

    pub fn as_i32(self) -> NumberConversion<i32> {
        self.as_number()
    }

    pub fn as_i64(self) -> NumberConversion<i64> {
        self.as_number()
    }

    pub fn as_u8(self) -> NumberConversion<u8> {
        self.as_number()
    }

    pub fn as_u16(self) -> NumberConversion<u16> {
        self.as_number()
    }

    pub fn as_u32(self) -> NumberConversion<u32> {
        self.as_number()
    }

    pub fn as_f32(self) -> NumberConversion<f32> {
        self.as_number()
    }

    pub fn as_f64(self) -> NumberConversion<f64> {
        self.as_number()
    }
}

impl Conversion<str, Number> for NumericReader {
    fn convert(&self, source: &str) -> Result<Converted<Number>, InvalidValue> {
        self.read(source).map(Converted::Value)
    }
}

fn read_integer(literal: &str) -> Result<Number, InvalidValue> {
    let (digits, radix) = split_radix(literal);
    i64::from_str_radix(digits, radix)
        .map(Number::Integer)
        .map_err(|_| InvalidValue::number(digits))
}

/// Split a `0x`/`0o`/`0b` prefix off a literal; anything else is decimal.
fn split_radix(literal: &str) -> (&str, u32) {
    let mut chars = literal.chars();
    let radix = match (chars.next(), chars.next()) {
        (Some('0'), Some('x' | 'X')) => 16,
        (Some('0'), Some('o' | 'O')) => 8,
        (Some('0'), Some('b' | 'B')) => 2,
        _ => return (literal, 10),
    };
    (&literal[2..], radix)
}

/// Second stage of a numeric conversion
pub struct Narrowing<N> {
    limits: NumericLimits,
    target: PhantomData<fn() -> N>,
}

impl<N> Narrowing<N> {
    pub fn new(limits: NumericLimits) -> Self {
        Self {
            limits,
            target: PhantomData,
        }
    }
}

impl<N> Clone for Narrowing<N> {
    fn clone(&self) -> Self {
        Self::new(self.limits)
    }
}

impl<N: Narrow> Conversion<Number, N> for Narrowing<N> {
    fn convert(&self, source: &Number) -> Result<Converted<N>, InvalidValue> {
        self.limits.check::<N>(*source).map(Converted::Value)
    }
}

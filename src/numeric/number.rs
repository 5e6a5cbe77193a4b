//! Generic numbers and narrowing to fixed-width targets

use std::cmp::Ordering;
use std::fmt;

/// A number as read from a literal, before narrowing.
///
/// Comparisons between an integer and a float promote both sides to `f64`.
#[derive(Debug, Clone, Copy)]
pub enum Number {
    Integer(i64),
    Float(f64),
}

impl Number {
    pub fn is_floating_point(self) -> bool {
        matches!(self, Number::Float(_))
    }

    pub fn as_f64(self) -> f64 {
        match self {
            Number::Integer(value) => value as f64,
            Number::Float(value) => value,
        }
    }
}

impl PartialEq for Number {
    fn eq(&self, other: &Self) -> bool {
        self.partial_cmp(other) == Some(Ordering::Equal)
    }
}

impl PartialOrd for Number {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match (*self, *other) {
            (Number::Integer(lhs), Number::Integer(rhs)) => Some(lhs.cmp(&rhs)),
            (lhs, rhs) => lhs.as_f64().partial_cmp(&rhs.as_f64()),
        }
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Number::Integer(value) => write!(f, "{value}"),
            Number::Float(value) => write_float(f, value),
        }
    }
}

/// Plain notation for magnitudes in `[1e-3, 1e7)`, `d.dddE±n` otherwise.
/// The mantissa always carries a fractional digit.
fn write_float(f: &mut fmt::Formatter<'_>, value: f64) -> fmt::Result {
    if value.is_nan() {
        return f.write_str("NaN");
    }
    if value.is_infinite() {
        return f.write_str(if value > 0.0 { "Infinity" } else { "-Infinity" });
    }

    let magnitude = value.abs();
    if magnitude == 0.0 || (1e-3..1e7).contains(&magnitude) {
        let plain = value.to_string();
        return if plain.contains('.') {
            f.write_str(&plain)
        } else {
            write!(f, "{plain}.0")
        };
    }

    let scientific = format!("{value:e}");
    let (mantissa, exponent) = scientific.split_once('e').unwrap_or((scientific.as_str(), "0"));
    if mantissa.contains('.') {
        write!(f, "{mantissa}E{exponent}")
    } else {
        write!(f, "{mantissa}.0E{exponent}")
    }
}

macro_rules! number_from {
    ($variant:ident: $($ty:ty),*) => {$(
        impl From<$ty> for Number {
            fn from(value: $ty) -> Self {
                Number::$variant(value.into())
            }
        }
    )*};
}

number_from!(Integer: i8, i16, i32, i64, u8, u16, u32);
number_from!(Float: f32, f64);

/// A fixed-width numeric target a [`Number`] can be narrowed to.
pub trait Narrow: Copy + fmt::Debug + Send + Sync + 'static {
    /// Smallest representable value, reported when narrowing fails
    const MIN: Number;
    /// Largest representable value, reported when narrowing fails
    const MAX: Number;

    /// Convert `number` if it round-trips exactly into this type.
    fn narrow(number: Number) -> Option<Self>;
}

macro_rules! narrow_integer {
    ($($ty:ty),*) => {$(
        impl Narrow for $ty {
            const MIN: Number = Number::Integer(<$ty>::MIN as i64);
            const MAX: Number = Number::Integer(<$ty>::MAX as i64);

            fn narrow(number: Number) -> Option<Self> {
                match number {
                    Number::Integer(value) => <$ty>::try_from(value).ok(),
                    Number::Float(value) => {
                        // MAX + 1 is exact in f64 for every width, unlike MAX for i64
                        let in_range =
                            value >= <$ty>::MIN as f64 && value < <$ty>::MAX as f64 + 1.0;
                        (in_range && value.fract() == 0.0).then(|| value as $ty)
                    }
                }
            }
        }
    )*};
}

narrow_integer!(i8, i16, i32, i64, u8, u16, u32);

impl Narrow for f32 {
    const MIN: Number = Number::Float(f64::NEG_INFINITY);
    const MAX: Number = Number::Float(f64::INFINITY);

    fn narrow(number: Number) -> Option<Self> {
        Some(number.as_f64() as f32)
    }
}

impl Narrow for f64 {
    const MIN: Number = Number::Float(f64::NEG_INFINITY);
    const MAX: Number = Number::Float(f64::INFINITY);

    fn narrow(number: Number) -> Option<Self> {
        Some(number.as_f64())
    }
}

//! Composable, fallible value conversions
//!
//! A [`Conversion`] turns a borrowed source into a target value. Besides
//! success and failure it can ask the caller to fall back to the setting's
//! default ([`Converted::UseDefault`]), which is how list settings treat empty
//! input.

use std::marker::PhantomData;
use std::sync::Arc;

use crate::error::InvalidValue;

/// Successful outcome of a conversion
#[derive(Debug, Clone, PartialEq)]
pub enum Converted<T> {
    /// The source was interpreted as this value
    Value(T),
    /// The source carries no value; resolve the default instead
    UseDefault,
}

impl<T> Converted<T> {
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Converted<U> {
        match self {
            Self::Value(value) => Converted::Value(f(value)),
            Self::UseDefault => Converted::UseDefault,
        }
    }

    pub fn into_value(self) -> Option<T> {
        match self {
            Self::Value(value) => Some(value),
            Self::UseDefault => None,
        }
    }
}

/// A pure `SOURCE -> TARGET` function that may reject its input.
pub trait Conversion<S: ?Sized, T>: Send + Sync {
    fn convert(&self, source: &S) -> Result<Converted<T>, InvalidValue>;
}

/// Shared, type-erased conversion from raw strings
pub type StringConversion<T> = Arc<dyn Conversion<str, T>>;

impl<S, T, C> Conversion<S, T> for Arc<C>
where
    S: ?Sized,
    C: Conversion<S, T> + ?Sized,
{
    fn convert(&self, source: &S) -> Result<Converted<T>, InvalidValue> {
        (**self).convert(source)
    }
}

/// Two conversions chained through an intermediate type `I`.
///
/// Whichever stage fails determines the error; a `UseDefault` from the first
/// stage skips the second.
pub struct Combined<A, B, I> {
    first: A,
    second: B,
    intermediate: PhantomData<fn() -> I>,
}

impl<A, B, I> Combined<A, B, I> {
    pub fn new(first: A, second: B) -> Self {
        Self {
            first,
            second,
            intermediate: PhantomData,
        }
    }
}

impl<A: Clone, B: Clone, I> Clone for Combined<A, B, I> {
    fn clone(&self) -> Self {
        Self::new(self.first.clone(), self.second.clone())
    }
}

impl<S, I, T, A, B> Conversion<S, T> for Combined<A, B, I>
where
    S: ?Sized,
    A: Conversion<S, I>,
    B: Conversion<I, T>,
{
    fn convert(&self, source: &S) -> Result<Converted<T>, InvalidValue> {
        match self.first.convert(source)? {
            Converted::Value(intermediate) => self.second.convert(&intermediate),
            Converted::UseDefault => Ok(Converted::UseDefault),
        }
    }
}

/// Conversion that hands its input back unchanged
#[derive(Debug, Clone, Copy, Default)]
pub struct Identity;

impl<T: Clone> Conversion<T, T> for Identity {
    fn convert(&self, source: &T) -> Result<Converted<T>, InvalidValue> {
        Ok(Converted::Value(source.clone()))
    }
}

impl Conversion<str, String> for Identity {
    fn convert(&self, source: &str) -> Result<Converted<String>, InvalidValue> {
        Ok(Converted::Value(source.to_string()))
    }
}

/// Adapter turning a plain function into a [`Conversion`]
#[derive(Clone)]
pub struct FnConversion<F>(F);

/// Wrap `f` as a conversion that never requests the default.
pub fn from_fn<S, T, F>(f: F) -> FnConversion<F>
where
    S: ?Sized,
    F: Fn(&S) -> Result<T, InvalidValue> + Send + Sync,
{
    FnConversion(f)
}

impl<S, T, F> Conversion<S, T> for FnConversion<F>
where
    S: ?Sized,
    F: Fn(&S) -> Result<T, InvalidValue> + Send + Sync,
{
    fn convert(&self, source: &S) -> Result<Converted<T>, InvalidValue> {
        (self.0)(source).map(Converted::Value)
    }
}

/// Combinators available on every conversion
pub trait ConversionExt<S: ?Sized, I>: Conversion<S, I> + Sized {
    /// Feed the output of `self` into `next`
    fn and_then<T, B>(self, next: B) -> Combined<Self, B, I>
    where
        B: Conversion<I, T>,
    {
        Combined::new(self, next)
    }

    fn shared(self) -> Arc<dyn Conversion<S, I>>
    where
        Self: 'static,
    {
        Arc::new(self)
    }
}

impl<S: ?Sized, I, C: Conversion<S, I>> ConversionExt<S, I> for C {}

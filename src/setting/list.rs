//! List settings: split a literal and convert every part

use std::fmt;
use std::sync::Arc;

use regex::Regex;

use crate::conversion::{Conversion, Converted, StringConversion};
use crate::error::InvalidValue;

#[derive(Clone)]
enum Separator {
    Comma,
    Pattern(Regex),
}

/// Conversion from a separated literal to a `Vec` of items.
///
/// Empty (or whitespace-only) input requests the setting's default instead of
/// producing an empty list.
pub struct ListConversion<T> {
    separator: Separator,
    item: StringConversion<T>,
}

impl<T> ListConversion<T> {
    /// Comma separated items
    pub fn comma_separated(item: impl Conversion<str, T> + 'static) -> Self {
        Self {
            separator: Separator::Comma,
            item: Arc::new(item),
        }
    }

    /// Items separated by matches of a regular expression
    pub fn separated_by(
        pattern: &str,
        item: impl Conversion<str, T> + 'static,
    ) -> Result<Self, regex::Error> {
        Ok(Self {
            separator: Separator::Pattern(Regex::new(pattern)?),
            item: Arc::new(item),
        })
    }

    fn split<'a>(&self, literal: &'a str) -> Vec<&'a str> {
        let mut parts: Vec<&str> = match &self.separator {
            Separator::Comma => literal.split(',').collect(),
            Separator::Pattern(pattern) => pattern.split(literal).collect(),
        };
        // a trailing separator does not add an item
        while parts.last().is_some_and(|part| part.is_empty()) {
            parts.pop();
        }
        parts
    }
}

impl<T> Clone for ListConversion<T> {
    fn clone(&self) -> Self {
        Self {
            separator: self.separator.clone(),
            item: Arc::clone(&self.item),
        }
    }
}

impl<T> fmt::Debug for ListConversion<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let separator = match &self.separator {
            Separator::Comma => ",",
            Separator::Pattern(pattern) => pattern.as_str(),
        };
        f.debug_struct("ListConversion")
            .field("separator", &separator)
            .finish_non_exhaustive()
    }
}

impl<T> Conversion<str, Vec<T>> for ListConversion<T> {
    fn convert(&self, source: &str) -> Result<Converted<Vec<T>>, InvalidValue> {
        let source = source.trim();
        if source.is_empty() {
            return Ok(Converted::UseDefault);
        }

        let parts = self.split(source);
        let mut items = Vec::with_capacity(parts.len());
        for part in parts {
            match self.item.convert(part)? {
                Converted::Value(item) => items.push(item),
                // an item without value makes the whole list fall back
                Converted::UseDefault => return Ok(Converted::UseDefault),
            }
        }
        Ok(Converted::Value(items))
    }
}

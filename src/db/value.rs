//! Catalog cell values.
//!
//! Backends convert every cell into a [`CatalogValue`] while the row is still
//! in hand. Array cells in particular are copied out eagerly: some drivers
//! hand back array handles tied to the row cursor, and those are gone once the
//! cursor moves on.

use std::fmt::Debug;

/// Trait for values that can be extracted to Rust types.
pub trait DatabaseValue: Clone + Debug {
    /// Extract as String if the value is string-like.
    fn as_string(&self) -> Option<String>;

    /// Extract as i64 if the value is an integer.
    fn as_i64(&self) -> Option<i64>;

    /// Extract as bool if the value is boolean.
    fn as_bool(&self) -> Option<bool>;

    /// Materialize an array-like value into a plain ordered sequence of
    /// integers.
    ///
    /// Returns `None` if the value is null or cannot be read as an integer
    /// array.
    fn materialize_ordinals(&self) -> Option<Vec<i64>>;

    /// Get type name for error messages.
    fn type_name(&self) -> &'static str;

    fn as_i64_or(&self, default: i64) -> i64 {
        self.as_i64().unwrap_or(default)
    }

    fn as_string_or(&self, default: &str) -> String {
        self.as_string().unwrap_or_else(|| default.to_string())
    }
}

/// A single cell returned by a catalog query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogValue {
    Null,
    Bool(bool),
    Int(i64),
    Str(String),
    IntArray(Vec<i64>),
}

impl CatalogValue {
    pub fn str(value: impl Into<String>) -> Self {
        Self::Str(value.into())
    }
}

impl From<i64> for CatalogValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<&str> for CatalogValue {
    fn from(value: &str) -> Self {
        Self::Str(value.to_string())
    }
}

impl From<String> for CatalogValue {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<Vec<i64>> for CatalogValue {
    fn from(value: Vec<i64>) -> Self {
        Self::IntArray(value)
    }
}

impl DatabaseValue for CatalogValue {
    fn as_string(&self) -> Option<String> {
        match self {
            CatalogValue::Str(s) => Some(s.clone()),
            _ => None,
        }
    }

    fn as_i64(&self) -> Option<i64> {
        match self {
            CatalogValue::Int(i) => Some(*i),
            _ => None,
        }
    }

    fn as_bool(&self) -> Option<bool> {
        match self {
            CatalogValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    fn materialize_ordinals(&self) -> Option<Vec<i64>> {
        match self {
            CatalogValue::IntArray(values) => Some(values.clone()),
            CatalogValue::Str(literal) => parse_int_array_literal(literal),
            _ => None,
        }
    }

    fn type_name(&self) -> &'static str {
        match self {
            CatalogValue::Null => "null",
            CatalogValue::Bool(_) => "bool",
            CatalogValue::Int(_) => "integer",
            CatalogValue::Str(_) => "string",
            CatalogValue::IntArray(_) => "integer array",
        }
    }
}

/// Parse the text form of an integer array.
///
/// Accepts the array literal form (`{1,2,3}`) and the space separated vector
/// form (`1 2 3`) that text-protocol drivers return.
pub fn parse_int_array_literal(literal: &str) -> Option<Vec<i64>> {
    let trimmed = literal.trim();
    let inner = match trimmed.strip_prefix('{') {
        Some(rest) => rest.strip_suffix('}')?,
        None => trimmed,
    };

    inner
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|item| !item.is_empty())
        .map(|item| item.parse::<i64>().ok())
        .collect()
}

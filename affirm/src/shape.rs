//! Parameter shapes and the optional-parameter filter.
//!
//! Each API operation declares which optional fields it forwards and the
//! primitive [`Kind`] each field must have, as a static [`ParameterShape`].
//! [`filter_optional`] checks caller-supplied data against that shape and
//! keeps only the declared, truthy entries.
//!
//! # Falsy values
//!
//! Values that are "falsy" (empty string, zero, `false`, `null`, empty array
//! or object) are removed even when they are valid for their field. A refund
//! with `amount: 0` is therefore sent without an `amount` at all.

use std::fmt;

use serde_json::{Map, Value};

use crate::error::ShapeError;

/// Primitive kind a parameter value must have.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    /// A JSON string.
    String,
    /// A JSON integer. Floats are rejected.
    Integer,
    /// A JSON boolean.
    Boolean,
}

impl Kind {
    /// Returns the lowercase name of this kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Integer => "integer",
            Self::Boolean => "boolean",
        }
    }

    /// Returns `true` if `value` is of this kind.
    #[must_use]
    pub fn matches(self, value: &Value) -> bool {
        match self {
            Self::String => value.is_string(),
            Self::Integer => value.is_i64() || value.is_u64(),
            Self::Boolean => value.is_boolean(),
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Declared parameter names and their kinds, in declaration order.
pub type ParameterShape = [(&'static str, Kind)];

/// Parameters supplied by the caller for a single operation.
pub type OptionalData = Map<String, Value>;

/// Returns the name of a value's JSON kind, as used in error messages.
#[must_use]
pub fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(n) if n.is_f64() => "float",
        Value::Number(_) => "integer",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Returns `false` for empty strings, zero, `false`, `null` and empty
/// collections.
#[must_use]
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

fn expect_kind(key: &str, kind: Kind, value: &Value) -> Result<(), ShapeError> {
    if kind.matches(value) {
        Ok(())
    } else {
        Err(ShapeError::KindMismatch {
            key: key.to_owned(),
            expected: kind,
            actual: kind_of(value),
        })
    }
}

/// Checks the kind of every declared key that is present in `input`.
///
/// Declared keys missing from `input` and keys not declared at all are
/// ignored.
///
/// # Errors
///
/// Returns [`ShapeError::KindMismatch`] for the first present key whose value
/// has the wrong kind.
pub fn check(shape: &ParameterShape, input: &OptionalData) -> Result<(), ShapeError> {
    shape
        .iter()
        .filter_map(|&(key, kind)| input.get(key).map(|value| (key, kind, value)))
        .try_for_each(|(key, kind, value)| expect_kind(key, kind, value))
}

/// Checks that every declared key is present in `input` with the right kind.
///
/// # Errors
///
/// Returns [`ShapeError::MissingKey`] or [`ShapeError::KindMismatch`] for the
/// first key that fails.
pub fn require(shape: &ParameterShape, input: &OptionalData) -> Result<(), ShapeError> {
    for &(key, kind) in shape {
        let value = input.get(key).ok_or_else(|| ShapeError::MissingKey {
            key: key.to_owned(),
        })?;
        expect_kind(key, kind, value)?;
    }
    Ok(())
}

/// Validates `input` against `shape` and returns its declared, truthy subset.
///
/// Undeclared keys are dropped silently. The result is empty when nothing
/// survives, in which case callers send no body or query string.
///
/// # Errors
///
/// Returns [`ShapeError::KindMismatch`] if a declared key is present with a
/// value of the wrong kind.
pub fn filter_optional(
    shape: &ParameterShape,
    input: &OptionalData,
) -> Result<OptionalData, ShapeError> {
    check(shape, input)?;
    Ok(shape
        .iter()
        .filter_map(|&(key, _)| {
            input
                .get(key)
                .filter(|value| is_truthy(value))
                .map(|value| (key.to_owned(), value.clone()))
        })
        .collect())
}

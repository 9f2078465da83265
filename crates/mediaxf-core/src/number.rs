//! Numeric values and their canonical text form.
//!
//! Qualifier values are rendered with the shortest decimal representation
//! that round-trips: `0.5` renders as `0.5`, `2.0` renders as `2`, and no
//! trailing zeros are ever added.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{TransformError, TransformResult};

/// A numeric qualifier value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Number {
    Int(i64),
    Float(f64),
}

impl Number {
    /// Parse a number from user text such as `"24"` or `"29.97"`.
    ///
    /// Non-numeric text and non-finite values are rejected.
    pub fn parse(text: &str) -> TransformResult<Self> {
        let trimmed = text.trim();
        if let Ok(int) = trimmed.parse::<i64>() {
            return Ok(Number::Int(int));
        }
        trimmed
            .parse::<f64>()
            .map_err(|_| TransformError::type_error(format!("expected a number, got '{}'", text)))
            .and_then(Number::try_from)
    }

    pub fn as_f64(self) -> f64 {
        match self {
            Number::Int(v) => v as f64,
            Number::Float(v) => v,
        }
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::Int(v) => write!(f, "{}", v),
            // f64's Display is already the shortest round-trip form and
            // prints integral values without a decimal point.
            Number::Float(v) => write!(f, "{}", v),
        }
    }
}

macro_rules! number_from_int {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Number {
                fn from(value: $ty) -> Self {
                    Number::Int(i64::from(value))
                }
            }
        )*
    };
}

number_from_int!(i8, i16, i32, i64, u8, u16, u32);

/// Floats are checked: NaN and infinities have no canonical text form.
impl TryFrom<f64> for Number {
    type Error = TransformError;

    fn try_from(value: f64) -> TransformResult<Self> {
        if value.is_finite() {
            Ok(Number::Float(value))
        } else {
            Err(TransformError::type_error(format!(
                "expected a finite number, got {}",
                value
            )))
        }
    }
}

/// Values that can be assigned to a numeric bound.
///
/// Integers convert infallibly. Floats must be finite, and text is parsed;
/// anything else is rejected with a [`TransformError::Type`].
pub trait NumericInput {
    fn into_number(self) -> TransformResult<Number>;
}

macro_rules! numeric_input {
    ($($ty:ty),*) => {
        $(
            impl NumericInput for $ty {
                fn into_number(self) -> TransformResult<Number> {
                    Ok(Number::from(self))
                }
            }
        )*
    };
}

numeric_input!(i8, i16, i32, i64, u8, u16, u32);

impl NumericInput for f64 {
    fn into_number(self) -> TransformResult<Number> {
        Number::try_from(self)
    }
}

impl NumericInput for Number {
    fn into_number(self) -> TransformResult<Number> {
        Ok(self)
    }
}

impl NumericInput for &str {
    fn into_number(self) -> TransformResult<Number> {
        Number::parse(self)
    }
}

impl NumericInput for String {
    fn into_number(self) -> TransformResult<Number> {
        Number::parse(&self)
    }
}

/// A loosely typed value as it arrives from a dynamic caller (JSON, JS).
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RawValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl RawValue {
    /// Convert to an optional numeric bound. `Null` means "not set".
    pub fn into_bound(self) -> TransformResult<Option<Number>> {
        match self {
            RawValue::Null => Ok(None),
            RawValue::Int(v) => Ok(Some(Number::Int(v))),
            RawValue::Float(v) => Number::try_from(v).map(Some),
            RawValue::Text(text) => Number::parse(&text).map(Some),
            RawValue::Bool(b) => Err(TransformError::type_error(format!(
                "expected a number, got boolean {}",
                b
            ))),
        }
    }
}

impl From<i64> for RawValue {
    fn from(value: i64) -> Self {
        RawValue::Int(value)
    }
}

impl From<i32> for RawValue {
    fn from(value: i32) -> Self {
        RawValue::Int(i64::from(value))
    }
}

impl From<f64> for RawValue {
    fn from(value: f64) -> Self {
        RawValue::Float(value)
    }
}

impl From<&str> for RawValue {
    fn from(value: &str) -> Self {
        RawValue::Text(value.to_string())
    }
}

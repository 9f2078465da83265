//! Min/max range values and the frame-rate parameter built on them.
//!
//! A range renders as:
//!
//! | min | max | output |
//! |-----|-----|--------|
//! | set | set | `min:max` |
//! | set | –   | `min` |
//! | –   | set | `:max` |
//! | –   | –   | *(unset)* |
//!
//! Bounds are rendered exactly as given; `min > max` is not corrected.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{TransformError, TransformResult};
use crate::number::{Number, NumericInput, RawValue};

/// A range with optional numeric lower and upper bounds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct MinMaxRange {
    #[serde(skip_serializing_if = "Option::is_none")]
    min: Option<Number>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max: Option<Number>,
}

impl MinMaxRange {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the lower bound.
    ///
    /// # Errors
    /// Returns [`TransformError::Type`] when the value is not numeric.
    pub fn min(mut self, value: impl NumericInput) -> TransformResult<Self> {
        self.min = Some(value.into_number()?);
        Ok(self)
    }

    /// Set the upper bound.
    ///
    /// # Errors
    /// Returns [`TransformError::Type`] when the value is not numeric.
    pub fn max(mut self, value: impl NumericInput) -> TransformResult<Self> {
        self.max = Some(value.into_number()?);
        Ok(self)
    }

    pub fn min_value(&self) -> Option<Number> {
        self.min
    }

    pub fn max_value(&self) -> Option<Number> {
        self.max
    }

    /// A range with neither bound contributes nothing to the output.
    pub fn is_empty(&self) -> bool {
        self.min.is_none() && self.max.is_none()
    }

    /// Build a range from loosely shaped input.
    ///
    /// All accepted shapes are normalized into `(min, max)` here, before any
    /// bound is assigned.
    pub fn from_params(params: impl Into<RangeParams>) -> TransformResult<Self> {
        let (min, max) = params.into().normalize()?;
        Ok(Self {
            min: min.into_bound()?,
            max: max.into_bound()?,
        })
    }
}

impl fmt::Display for MinMaxRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.min, self.max) {
            (Some(min), Some(max)) => write!(f, "{}:{}", min, max),
            (Some(min), None) => write!(f, "{}", min),
            (None, Some(max)) => write!(f, ":{}", max),
            (None, None) => Ok(()),
        }
    }
}

/// The accepted call shapes for range constructors.
///
/// Deserializes from a scalar (`24`), a positional list (`[24, 30]`) or a
/// map (`{"min": 24, "max": 30}`).
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RangeParams {
    Positional(Vec<RawValue>),
    Named(BTreeMap<String, RawValue>),
    Scalar(RawValue),
}

impl RangeParams {
    fn normalize(self) -> TransformResult<(RawValue, RawValue)> {
        match self {
            RangeParams::Scalar(min) => Ok((min, RawValue::Null)),
            RangeParams::Positional(values) => {
                if values.len() > 2 {
                    return Err(TransformError::type_error(format!(
                        "a range takes at most 2 positional values, got {}",
                        values.len()
                    )));
                }
                let mut values = values.into_iter();
                let min = values.next().unwrap_or(RawValue::Null);
                let max = values.next().unwrap_or(RawValue::Null);
                Ok((min, max))
            }
            RangeParams::Named(mut map) => {
                let min = map.remove("min").unwrap_or(RawValue::Null);
                let max = map.remove("max").unwrap_or(RawValue::Null);
                if let Some(unknown) = map.keys().next() {
                    return Err(TransformError::type_error(format!(
                        "unknown range key '{}'",
                        unknown
                    )));
                }
                Ok((min, max))
            }
        }
    }
}

impl From<RawValue> for RangeParams {
    fn from(value: RawValue) -> Self {
        RangeParams::Scalar(value)
    }
}

impl From<Vec<RawValue>> for RangeParams {
    fn from(values: Vec<RawValue>) -> Self {
        RangeParams::Positional(values)
    }
}

impl<A: Into<RawValue>, B: Into<RawValue>> From<(A, B)> for RangeParams {
    fn from((min, max): (A, B)) -> Self {
        RangeParams::Positional(vec![min.into(), max.into()])
    }
}

impl From<BTreeMap<String, RawValue>> for RangeParams {
    fn from(map: BTreeMap<String, RawValue>) -> Self {
        RangeParams::Named(map)
    }
}

/// Frame-rate bounds for video delivery, rendered under the `fps` key.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Fps {
    range: MinMaxRange,
}

impl Fps {
    pub const KEY: &'static str = "fps";

    pub fn new() -> Self {
        Self::default()
    }

    /// Set the minimum frame rate in frames per second.
    pub fn min(mut self, value: impl NumericInput) -> TransformResult<Self> {
        self.range = self.range.min(value)?;
        Ok(self)
    }

    /// Set the maximum frame rate in frames per second.
    pub fn max(mut self, value: impl NumericInput) -> TransformResult<Self> {
        self.range = self.range.max(value)?;
        Ok(self)
    }

    pub fn from_params(params: impl Into<RangeParams>) -> TransformResult<Self> {
        Ok(Self {
            range: MinMaxRange::from_params(params)?,
        })
    }

    pub fn range(&self) -> &MinMaxRange {
        &self.range
    }
}

impl fmt::Display for Fps {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.range.is_empty() {
            return Ok(());
        }
        write!(f, "{}_{}", Self::KEY, self.range)
    }
}

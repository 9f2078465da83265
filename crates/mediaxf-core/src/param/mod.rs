//! Qualifier value objects.
//!
//! A [`Qualifier`] is one key-prefixed token of the canonical output, such
//! as `w_100`. Its value decides the token template:
//!
//! - scalar: `key_value` (`w_100`, `ar_0.5`, `b_red`)
//! - range: `key_min:max` (`fps_24:30`)
//! - flags: `fl_name`, several joined with `.` (`fl_ignore_aspect_ratio`)
//! - composite: `key_namespace:value` (`cu_v1:17`)
//!
//! A qualifier whose value is empty is *unset* and renders nothing.

mod range;

use std::collections::BTreeSet;
use std::fmt;

use serde::{Serialize, Serializer};

use crate::number::Number;

pub use range::{Fps, MinMaxRange, RangeParams};

/// Canonical short keys.
pub mod keys {
    pub const ASPECT_RATIO: &str = "ar";
    pub const BACKGROUND: &str = "b";
    pub const CROP: &str = "c";
    pub const DPR: &str = "dpr";
    pub const FLAG: &str = "fl";
    pub const GRAVITY: &str = "g";
    pub const HEIGHT: &str = "h";
    pub const WIDTH: &str = "w";
    pub const X: &str = "x";
    pub const Y: &str = "y";
    pub const ZOOM: &str = "z";
}

/// Flag names.
pub mod flags {
    pub const IGNORE_ASPECT_RATIO: &str = "ignore_aspect_ratio";
}

/// The value carried by a qualifier.
#[derive(Debug, Clone, PartialEq)]
pub enum QualifierValue {
    Number(Number),
    Text(String),
    Range(MinMaxRange),
    Flags(BTreeSet<String>),
    Composite { namespace: String, value: String },
}

impl QualifierValue {
    /// Whether this value contributes anything to the output.
    pub fn is_set(&self) -> bool {
        match self {
            QualifierValue::Number(_) => true,
            QualifierValue::Text(text) => !text.is_empty(),
            QualifierValue::Range(range) => !range.is_empty(),
            QualifierValue::Flags(flags) => !flags.is_empty(),
            QualifierValue::Composite { .. } => true,
        }
    }
}

impl fmt::Display for QualifierValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QualifierValue::Number(n) => write!(f, "{}", n),
            QualifierValue::Text(text) => f.write_str(text),
            QualifierValue::Range(range) => write!(f, "{}", range),
            QualifierValue::Flags(flags) => {
                for (i, flag) in flags.iter().enumerate() {
                    if i > 0 {
                        f.write_str(".")?;
                    }
                    f.write_str(flag)?;
                }
                Ok(())
            }
            QualifierValue::Composite { namespace, value } => write!(f, "{}:{}", namespace, value),
        }
    }
}

impl Serialize for QualifierValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            QualifierValue::Number(n) => n.serialize(serializer),
            QualifierValue::Text(text) => serializer.serialize_str(text),
            QualifierValue::Range(range) => range.serialize(serializer),
            QualifierValue::Flags(flags) => serializer.collect_seq(flags),
            QualifierValue::Composite { .. } => serializer.collect_str(self),
        }
    }
}

impl From<Number> for QualifierValue {
    fn from(value: Number) -> Self {
        QualifierValue::Number(value)
    }
}

impl From<MinMaxRange> for QualifierValue {
    fn from(value: MinMaxRange) -> Self {
        QualifierValue::Range(value)
    }
}

impl From<String> for QualifierValue {
    fn from(value: String) -> Self {
        QualifierValue::Text(value)
    }
}

impl From<&str> for QualifierValue {
    fn from(value: &str) -> Self {
        QualifierValue::Text(value.to_string())
    }
}

/// A single keyed parameter of a transformation action.
#[derive(Debug, Clone, PartialEq)]
pub struct Qualifier {
    key: String,
    value: QualifierValue,
}

impl Qualifier {
    pub fn new(key: impl Into<String>, value: impl Into<QualifierValue>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    pub fn number(key: impl Into<String>, value: impl Into<Number>) -> Self {
        Self::new(key, QualifierValue::Number(value.into()))
    }

    /// A composite qualifier rendered as `key_namespace:value`.
    ///
    /// This is the escape hatch for qualifiers the typed model does not
    /// cover, e.g. `Qualifier::generic("cu", "v1", 17)` renders `cu_v1:17`.
    pub fn generic(
        key: impl Into<String>,
        namespace: impl Into<String>,
        value: impl fmt::Display,
    ) -> Self {
        Self::new(
            key,
            QualifierValue::Composite {
                namespace: namespace.into(),
                value: value.to_string(),
            },
        )
    }

    /// A flag qualifier holding a single flag name.
    pub fn flag(name: impl Into<String>) -> Self {
        let mut flags = BTreeSet::new();
        flags.insert(name.into());
        Self::new(keys::FLAG, QualifierValue::Flags(flags))
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn value(&self) -> &QualifierValue {
        &self.value
    }

    pub(crate) fn value_mut(&mut self) -> &mut QualifierValue {
        &mut self.value
    }

    pub fn is_set(&self) -> bool {
        self.value.is_set()
    }

    /// Render the `key_value` token, or `None` when the qualifier is unset.
    pub fn token(&self) -> Option<String> {
        self.is_set().then(|| format!("{}_{}", self.key, self.value))
    }
}

impl fmt::Display for Qualifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_set() {
            write!(f, "{}_{}", self.key, self.value)?;
        }
        Ok(())
    }
}

impl From<Fps> for Qualifier {
    fn from(fps: Fps) -> Self {
        Qualifier::new(Fps::KEY, *fps.range())
    }
}

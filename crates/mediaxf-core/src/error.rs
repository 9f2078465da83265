//! Error types for building transformation descriptors.
//!
//! Every check in this crate runs eagerly, at the call that introduced the
//! problem. Nothing is deferred to serialization time, so rendering a
//! descriptor to its canonical string never fails.

use thiserror::Error;

/// Errors raised while assembling transformation parameters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransformError {
    /// A parameter is incompatible with the action's crop mode.
    #[error("{message} for {mode}")]
    Validation { mode: String, message: String },

    /// An operator alias is not a member of the targeted family.
    #[error("Unknown {family} operator: '{alias}'")]
    Lookup { family: &'static str, alias: String },

    /// A value or input shape has the wrong type.
    #[error("Invalid value: {0}")]
    Type(String),
}

impl TransformError {
    /// Shorthand for the "`<feature>` is not supported for `<mode>`" validation error.
    pub fn unsupported(feature: &str, mode: impl Into<String>) -> Self {
        TransformError::Validation {
            mode: mode.into(),
            message: format!("{} is not supported", feature),
        }
    }

    pub fn type_error(message: impl Into<String>) -> Self {
        TransformError::Type(message.into())
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, TransformError::Validation { .. })
    }

    pub fn is_lookup(&self) -> bool {
        matches!(self, TransformError::Lookup { .. })
    }

    pub fn is_type(&self) -> bool {
        matches!(self, TransformError::Type(_))
    }
}

/// Result alias used throughout the crate.
pub type TransformResult<T> = Result<T, TransformError>;

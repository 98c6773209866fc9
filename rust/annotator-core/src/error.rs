//! Engine errors: record decoding and config parsing.
//!
//! Only the JSON boundary can fail. Everything past `AnnotationRecord::from_value`
//! and `EngineConfig::from_value` works on well-formed data and degrades to
//! "no match" instead of erroring.

use thiserror::Error;

/// Result type for engine operations that can fail.
pub type Result<T> = std::result::Result<T, EngineError>;

/// Why a JSON value could not be decoded into a record shape or a config.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum EngineError {
    /// The value is not a JSON object.
    #[error("Expected a JSON object, got {0}")]
    NotAnObject(&'static str),

    /// A field required by the shape is absent.
    #[error("Missing field: {0}")]
    MissingField(&'static str),

    /// A field is present but has the wrong type or an out-of-range value.
    #[error("Invalid field {field}: {reason}")]
    InvalidField {
        field: &'static str,
        reason: String,
    },

    /// Configuration could not be parsed.
    #[error("Invalid config: {0}")]
    Config(String),
}

impl EngineError {
    /// Create an invalid field error.
    #[must_use]
    pub fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidField {
            field,
            reason: reason.into(),
        }
    }

    /// Short JSON type name, for `NotAnObject`.
    pub(crate) fn kind_of(value: &serde_json::Value) -> &'static str {
        match value {
            serde_json::Value::Null => "null",
            serde_json::Value::Bool(_) => "boolean",
            serde_json::Value::Number(_) => "number",
            serde_json::Value::String(_) => "string",
            serde_json::Value::Array(_) => "array",
            serde_json::Value::Object(_) => "object",
        }
    }
}

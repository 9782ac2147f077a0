//! Content error types.
//!
//! These represent exercise content records that cannot be normalized into
//! [`ExerciseContent`](crate::model::ExerciseContent) at all. Anything the
//! engine can still score (missing blanks, missing answers, count mismatch)
//! is reported as an [`EvaluationNotice`](crate::model::EvaluationNotice)
//! instead of an error.

use thiserror::Error;

/// Errors raised while normalizing a raw content record.
#[derive(Debug, Error)]
pub enum ContentError {
    /// The record is neither a JSON object nor a string encoding one.
    #[error("content record must be an object, got {0}")]
    NotAnObject(&'static str),

    /// The record is a string that does not decode as JSON.
    #[error("content record is not valid JSON: {0}")]
    InvalidJson(String),

    /// A recognized field has a shape the engine cannot read.
    #[error("invalid `{field}` field: {reason}")]
    InvalidField { field: String, reason: String },
}

impl ContentError {
    pub(crate) fn invalid_field(field: &str, reason: impl Into<String>) -> Self {
        ContentError::InvalidField {
            field: field.to_string(),
            reason: reason.into(),
        }
    }
}

/// Short name of a JSON value's type, used in error messages.
pub(crate) fn value_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}

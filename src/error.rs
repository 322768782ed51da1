// src/error.rs
//! Application error types with structured error handling.
//!
//! Two layers of failure live here. [`ElementError`] is the normalizer's
//! rejection vocabulary: it is returned, never thrown, and callers are
//! expected to recover from it by dropping the offending entry.
//! [`AppError`] covers everything around the normalizer: reading page
//! documents, parsing JSON, resolving configuration and delivering output.

use crate::constants::DIAGNOSTIC_PREVIEW_LENGTH;
use serde_json::Value;
use thiserror::Error;

/// Why a candidate value could not be coerced into a page element.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ElementError {
    /// The candidate was not a JSON object (null, array or scalar).
    #[error("Invalid element shape: expected an object, got {kind} ({preview})")]
    InvalidElementShape { kind: &'static str, preview: String },
}

impl ElementError {
    /// Builds an `InvalidElementShape` rejection describing `value`.
    pub fn invalid_shape(value: &Value) -> Self {
        Self::InvalidElementShape {
            kind: json_kind(value),
            preview: preview_value(value),
        }
    }
}

/// Main application error type.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Missing configuration: {0}")]
    MissingConfiguration(String),

    #[error("Filesystem IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parse error for {path}: {source}")]
    JsonParseError {
        path: std::path::PathBuf,
        source: serde_json::Error,
    },

    #[error("Malformed page document: {0}")]
    MalformedDocument(String),

    #[error("JSON parse error for page document read from stdin: {source}")]
    StdinParseError { source: serde_json::Error },

    #[error("Output delivery to {target} failed: {source}")]
    DeliveryFailed {
        target: String,
        source: std::io::Error,
    },

    #[error("Internal error: {message}")]
    InternalError {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error(transparent)]
    Element(#[from] ElementError),

    #[error(transparent)]
    ValidationError(#[from] crate::types::ValidationError),
}

// Allow converting from anyhow::Error, preserving error chain
impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::InternalError {
            message: err.to_string(),
            source: Some(err.into()),
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::MalformedDocument(err.to_string())
    }
}

/// Names the JSON kind of a value for diagnostics.
pub fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Renders a value compactly, truncated for log output.
pub fn preview_value(value: &Value) -> String {
    let rendered = value.to_string();
    if rendered.chars().count() > DIAGNOSTIC_PREVIEW_LENGTH {
        let truncated: String = rendered.chars().take(DIAGNOSTIC_PREVIEW_LENGTH).collect();
        format!("{}...", truncated)
    } else {
        rendered
    }
}

/// Result type alias for convenience
pub type Result<T, E = AppError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_rejection_names_the_offending_kind() {
        let err = ElementError::invalid_shape(&json!([1, 2, 3]));
        assert_eq!(
            err,
            ElementError::InvalidElementShape {
                kind: "array",
                preview: "[1,2,3]".to_string(),
            }
        );
        assert!(err.to_string().contains("got array"));
    }

    #[test]
    fn test_long_values_are_truncated_in_previews() {
        let long = Value::String("x".repeat(DIAGNOSTIC_PREVIEW_LENGTH * 2));
        let preview = preview_value(&long);
        assert!(preview.ends_with("..."));
        assert_eq!(preview.chars().count(), DIAGNOSTIC_PREVIEW_LENGTH + 3);
    }

    #[test]
    fn test_element_errors_convert_into_app_errors() {
        let app: AppError = ElementError::invalid_shape(&Value::Null).into();
        assert!(matches!(app, AppError::Element(_)));
        assert!(app.to_string().contains("got null"));
    }

    #[test]
    fn test_anyhow_errors_keep_their_context() {
        use anyhow::Context;

        let failed: anyhow::Result<()> =
            Err(anyhow::anyhow!("disk full")).context("failed to render default props");
        let app: AppError = failed.unwrap_err().into();

        match &app {
            AppError::InternalError { message, source } => {
                assert_eq!(message, "failed to render default props");
                assert!(source.is_some());
            }
            other => panic!("expected InternalError, got {:?}", other),
        }
    }
}

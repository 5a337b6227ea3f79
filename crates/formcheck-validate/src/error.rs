//! Error records and error types.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// A single field validation error.
///
/// This is the neutral record the engine emits. Adapters that feed a web
/// framework's own error list rename or prefix `key` as they see fit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    /// The field key the error belongs to
    pub key: String,
    /// Human-readable (possibly localized) error message
    pub message: String,
}

impl FieldError {
    /// Create a new field error.
    pub fn new(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

// Inner object of the `{"error": {...}}` envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct EnvelopeBody {
    #[serde(rename = "type")]
    error_type: String,
    message: String,
    fields: Vec<FieldError>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Envelope {
    error: EnvelopeBody,
}

/// All errors collected by a finished validation pass.
///
/// Serializes to:
///
/// ```json
/// {
///   "error": {
///     "type": "validation_error",
///     "message": "Validation failed",
///     "fields": [{"key": "email", "message": "Must be a valid email address"}]
///   }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldErrors {
    /// Field errors in the order they were recorded
    pub fields: Vec<FieldError>,
    /// Summary message (default: "Validation failed")
    pub message: String,
}

impl FieldErrors {
    /// Create a new collection from recorded field errors.
    pub fn new(fields: Vec<FieldError>) -> Self {
        Self {
            fields,
            message: "Validation failed".to_string(),
        }
    }

    /// Create a collection with a custom summary message.
    pub fn with_message(fields: Vec<FieldError>, message: impl Into<String>) -> Self {
        Self {
            fields,
            message: message.into(),
        }
    }

    /// `true` when no field failed.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Number of recorded field errors, duplicates per key included.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Get the first error recorded for `key`.
    pub fn get(&self, key: &str) -> Option<&FieldError> {
        self.fields.iter().find(|e| e.key == key)
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} field error(s)", self.message, self.fields.len())
    }
}

impl std::error::Error for FieldErrors {}

impl Serialize for FieldErrors {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let envelope = Envelope {
            error: EnvelopeBody {
                error_type: "validation_error".to_string(),
                message: self.message.clone(),
                fields: self.fields.clone(),
            },
        };
        envelope.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for FieldErrors {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let Envelope { error } = Envelope::deserialize(deserializer)?;
        Ok(Self {
            fields: error.fields,
            message: error.message,
        })
    }
}

/// Programming errors raised while evaluating a check.
///
/// These are never recorded as field errors.
#[derive(Debug, Error)]
pub enum CheckError {
    /// The check cannot evaluate a value of this shape.
    #[error("check `{check}` cannot evaluate a {found} value")]
    UnsupportedValue {
        /// Name of the check
        check: &'static str,
        /// Shape of the value that was passed
        found: &'static str,
    },

    /// A `Match` pattern failed to compile.
    #[error("invalid pattern `{pattern}`: {source}")]
    InvalidPattern {
        /// The pattern as written by the caller
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_error_displays_message() {
        let error = FieldError::new("email", "Must be a valid email address");
        assert_eq!(error.key, "email");
        assert_eq!(error.to_string(), "Must be a valid email address");
    }

    #[test]
    fn field_errors_serialization() {
        let errors = FieldErrors::new(vec![FieldError::new("email", "Invalid email")]);

        let json = serde_json::to_value(&errors).unwrap();

        assert_eq!(json["error"]["type"], "validation_error");
        assert_eq!(json["error"]["message"], "Validation failed");
        assert_eq!(json["error"]["fields"][0]["key"], "email");
        assert_eq!(json["error"]["fields"][0]["message"], "Invalid email");
    }

    #[test]
    fn field_errors_deserialize_envelope() {
        let errors = FieldErrors::with_message(
            vec![FieldError::new("age", "Minimum is 18")],
            "Rejected",
        );
        let json = serde_json::to_string(&errors).unwrap();
        let parsed: FieldErrors = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, errors);
    }

    #[test]
    fn field_errors_display() {
        let errors = FieldErrors::new(vec![
            FieldError::new("email", "Invalid email"),
            FieldError::new("age", "Out of range"),
        ]);

        assert_eq!(errors.to_string(), "Validation failed: 2 field error(s)");
        assert_eq!(errors.get("age").unwrap().message, "Out of range");
        assert!(errors.get("name").is_none());
    }

    #[test]
    fn unsupported_value_message() {
        let err = CheckError::UnsupportedValue {
            check: "min",
            found: "text",
        };
        assert_eq!(err.to_string(), "check `min` cannot evaluate a text value");
    }
}

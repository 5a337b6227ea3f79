//! Presence and size checks.

use super::{unsupported, Check};
use crate::error::CheckError;
use crate::message::{format_message, MessageArg};
use crate::value::Value;
use serde::{Deserialize, Serialize};

/// Requires a value to be present, and non-empty if it is text or a
/// collection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Required;

impl Check for Required {
    fn name(&self) -> &'static str {
        "required"
    }

    fn evaluate(&self, value: &Value<'_>) -> Result<bool, CheckError> {
        Ok(match value {
            Value::Absent => false,
            Value::Text(s) => !s.is_empty(),
            Value::Collection(n) => *n > 0,
            Value::Bool(_) | Value::Number(_) | Value::Period { .. } => true,
        })
    }

    fn message_key(&self) -> (&'static str, Vec<MessageArg>) {
        ("validation.required", Vec::new())
    }

    fn default_message(&self) -> String {
        "Required".to_string()
    }
}

fn on_size(
    check: &'static str,
    value: &Value<'_>,
    predicate: impl FnOnce(usize) -> bool,
) -> Result<bool, CheckError> {
    match (value, value.size()) {
        (_, Some(len)) => Ok(predicate(len)),
        (Value::Absent, None) => Ok(false),
        (other, None) => Err(unsupported(check, other)),
    }
}

/// Requires text or a collection to have at least `min` elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MinSize {
    /// Inclusive lower bound on length
    pub min: usize,
}

impl MinSize {
    /// Create a minimum size check.
    pub fn new(min: usize) -> Self {
        Self { min }
    }
}

impl Check for MinSize {
    fn name(&self) -> &'static str {
        "min_size"
    }

    fn evaluate(&self, value: &Value<'_>) -> Result<bool, CheckError> {
        on_size("min_size", value, |len| len >= self.min)
    }

    fn message_key(&self) -> (&'static str, Vec<MessageArg>) {
        ("validation.min_size", vec![self.min.into()])
    }

    fn default_message(&self) -> String {
        format_message("Minimum size is {0}", &self.message_key().1)
    }
}

/// Requires text or a collection to have at most `max` elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaxSize {
    /// Inclusive upper bound on length
    pub max: usize,
}

impl MaxSize {
    /// Create a maximum size check.
    pub fn new(max: usize) -> Self {
        Self { max }
    }
}

impl Check for MaxSize {
    fn name(&self) -> &'static str {
        "max_size"
    }

    fn evaluate(&self, value: &Value<'_>) -> Result<bool, CheckError> {
        on_size("max_size", value, |len| len <= self.max)
    }

    fn message_key(&self) -> (&'static str, Vec<MessageArg>) {
        ("validation.max_size", vec![self.max.into()])
    }

    fn default_message(&self) -> String {
        format_message("Maximum size is {0}", &self.message_key().1)
    }
}

/// Requires text or a collection to have exactly `n` elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Length {
    /// Required length
    pub n: usize,
}

impl Length {
    /// Create an exact length check.
    pub fn new(n: usize) -> Self {
        Self { n }
    }
}

impl Check for Length {
    fn name(&self) -> &'static str {
        "length"
    }

    fn evaluate(&self, value: &Value<'_>) -> Result<bool, CheckError> {
        on_size("length", value, |len| len == self.n)
    }

    fn message_key(&self) -> (&'static str, Vec<MessageArg>) {
        ("validation.length", vec![self.n.into()])
    }

    fn default_message(&self) -> String {
        format_message("Required length is {0}", &self.message_key().1)
    }
}

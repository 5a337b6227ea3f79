//! Numeric bound checks.

use super::{unsupported, Check};
use crate::error::CheckError;
use crate::message::{format_message, number_arg, MessageArg};
use crate::value::Value;
use serde::{Deserialize, Serialize};

fn on_number(
    check: &'static str,
    value: &Value<'_>,
    predicate: impl FnOnce(f64) -> bool,
) -> Result<bool, CheckError> {
    match value {
        Value::Number(n) => Ok(predicate(*n)),
        Value::Absent => Ok(false),
        other => Err(unsupported(check, other)),
    }
}

/// Requires a number to be at least `min`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Min {
    /// Inclusive lower bound
    pub min: f64,
}

impl Min {
    /// Create a minimum check.
    pub fn new(min: impl Into<f64>) -> Self {
        Self { min: min.into() }
    }
}

impl Check for Min {
    fn name(&self) -> &'static str {
        "min"
    }

    fn evaluate(&self, value: &Value<'_>) -> Result<bool, CheckError> {
        on_number("min", value, |n| n >= self.min)
    }

    fn message_key(&self) -> (&'static str, Vec<MessageArg>) {
        ("validation.min", vec![number_arg(self.min)])
    }

    fn default_message(&self) -> String {
        format_message("Minimum is {0}", &self.message_key().1)
    }
}

/// Requires a number to be at most `max`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Max {
    /// Inclusive upper bound
    pub max: f64,
}

impl Max {
    /// Create a maximum check.
    pub fn new(max: impl Into<f64>) -> Self {
        Self { max: max.into() }
    }
}

impl Check for Max {
    fn name(&self) -> &'static str {
        "max"
    }

    fn evaluate(&self, value: &Value<'_>) -> Result<bool, CheckError> {
        on_number("max", value, |n| n <= self.max)
    }

    fn message_key(&self) -> (&'static str, Vec<MessageArg>) {
        ("validation.max", vec![number_arg(self.max)])
    }

    fn default_message(&self) -> String {
        format_message("Maximum is {0}", &self.message_key().1)
    }
}

/// Requires a number to lie within `min..=max`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Range {
    /// Lower bound
    pub min: Min,
    /// Upper bound
    pub max: Max,
}

impl Range {
    /// Create a range check, inclusive at both ends.
    pub fn new(min: impl Into<f64>, max: impl Into<f64>) -> Self {
        Self {
            min: Min::new(min),
            max: Max::new(max),
        }
    }
}

impl Check for Range {
    fn name(&self) -> &'static str {
        "range"
    }

    fn evaluate(&self, value: &Value<'_>) -> Result<bool, CheckError> {
        match value {
            Value::Number(_) | Value::Absent => {
                Ok(self.min.evaluate(value)? && self.max.evaluate(value)?)
            }
            other => Err(unsupported("range", other)),
        }
    }

    fn message_key(&self) -> (&'static str, Vec<MessageArg>) {
        (
            "validation.range",
            vec![number_arg(self.min.min), number_arg(self.max.max)],
        )
    }

    fn default_message(&self) -> String {
        format_message("Range is {0} to {1}", &self.message_key().1)
    }
}

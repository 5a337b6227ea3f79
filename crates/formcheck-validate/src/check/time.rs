//! Cross-field start/end ordering.

use super::{unsupported, Check};
use crate::error::CheckError;
use crate::message::MessageArg;
use crate::value::Value;
use serde::{Deserialize, Serialize};

/// Requires the start of a [`Value::Period`] to be no later than its end.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeStartEnd;

impl Check for TimeStartEnd {
    fn name(&self) -> &'static str {
        "time_start_end"
    }

    fn evaluate(&self, value: &Value<'_>) -> Result<bool, CheckError> {
        match value {
            Value::Period { start, end } => Ok(start <= end),
            Value::Absent => Ok(false),
            other => Err(unsupported("time_start_end", other)),
        }
    }

    fn message_key(&self) -> (&'static str, Vec<MessageArg>) {
        ("validation.time_start_end", Vec::new())
    }

    fn default_message(&self) -> String {
        "Start time must not be later than end time".to_string()
    }
}

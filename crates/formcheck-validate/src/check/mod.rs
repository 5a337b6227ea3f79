//! Checks: single named constraints evaluated against a [`Value`].
//!
//! Every check is immutable plain data. One instance can be shared between
//! threads and reused across any number of validation passes.
//!
//! ## Value handling
//!
//! - [`Value::Absent`] never satisfies a check other than [`Required`]
//!   (which reports it as missing).
//! - A value of a shape the check cannot evaluate (text given to [`Min`],
//!   a number given to [`Email`]) is a programming error:
//!   [`Check::evaluate`] returns [`CheckError::UnsupportedValue`] and
//!   [`Check::is_satisfied`] panics.
//! - Text length counts Unicode scalar values; collection length counts
//!   elements.

mod ip;
mod numeric;
mod size;
mod text;
mod time;

pub use ip::{IpAddr, IpFamily};
pub use numeric::{Max, Min, Range};
pub use size::{Length, MaxSize, MinSize, Required};
pub use text::{Domain, Email, FilePath, MacAddr, Match, PathMode, PureText, TextMode, Url};
pub use time::TimeStartEnd;

use crate::error::CheckError;
use crate::message::MessageArg;
use crate::value::Value;
use std::fmt::Debug;

/// A single named constraint.
///
/// ## Example
///
/// ```rust
/// use formcheck_validate::check::Check;
/// use formcheck_validate::{CheckError, MessageArg, Value};
///
/// #[derive(Debug)]
/// struct Even;
///
/// impl Check for Even {
///     fn name(&self) -> &'static str {
///         "even"
///     }
///
///     fn evaluate(&self, value: &Value<'_>) -> Result<bool, CheckError> {
///         match value {
///             Value::Number(n) => Ok(n % 2.0 == 0.0),
///             Value::Absent => Ok(false),
///             other => Err(CheckError::UnsupportedValue { check: "even", found: other.kind() }),
///         }
///     }
///
///     fn message_key(&self) -> (&'static str, Vec<MessageArg>) {
///         ("validation.even", Vec::new())
///     }
///
///     fn default_message(&self) -> String {
///         "Must be even".to_string()
///     }
/// }
///
/// assert!(Even.is_satisfied(&Value::from(4)));
/// ```
pub trait Check: Debug + Send + Sync {
    /// Short name used in misuse reports.
    fn name(&self) -> &'static str;

    /// Decide whether `value` satisfies the constraint.
    fn evaluate(&self, value: &Value<'_>) -> Result<bool, CheckError>;

    /// Translation key and positional arguments for the failure message.
    fn message_key(&self) -> (&'static str, Vec<MessageArg>);

    /// Untranslated failure message.
    fn default_message(&self) -> String;

    /// Whether `value` satisfies the constraint.
    ///
    /// # Panics
    ///
    /// Panics if the check cannot evaluate a value of this shape.
    fn is_satisfied(&self, value: &Value<'_>) -> bool {
        match self.evaluate(value) {
            Ok(satisfied) => satisfied,
            Err(err) => panic!("{err}"),
        }
    }
}

impl<C: Check + ?Sized> Check for &C {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn evaluate(&self, value: &Value<'_>) -> Result<bool, CheckError> {
        (**self).evaluate(value)
    }

    fn message_key(&self) -> (&'static str, Vec<MessageArg>) {
        (**self).message_key()
    }

    fn default_message(&self) -> String {
        (**self).default_message()
    }
}

impl<C: Check + ?Sized> Check for Box<C> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn evaluate(&self, value: &Value<'_>) -> Result<bool, CheckError> {
        (**self).evaluate(value)
    }

    fn message_key(&self) -> (&'static str, Vec<MessageArg>) {
        (**self).message_key()
    }

    fn default_message(&self) -> String {
        (**self).default_message()
    }
}

fn unsupported(check: &'static str, value: &Value<'_>) -> CheckError {
    CheckError::UnsupportedValue {
        check,
        found: value.kind(),
    }
}

/// Evaluate a text-only predicate.
fn on_text(
    check: &'static str,
    value: &Value<'_>,
    predicate: impl FnOnce(&str) -> bool,
) -> Result<bool, CheckError> {
    match value {
        Value::Text(s) => Ok(predicate(s)),
        Value::Absent => Ok(false),
        other => Err(unsupported(check, other)),
    }
}

//! The chainable handle returned by every validation call.

use crate::context::Validation;
use crate::error::FieldError;
use crate::message::MessageArg;

/// Outcome of one validation call.
///
/// A failed result refers to the error it recorded by its index in the
/// context, so [`key`](ValidationResult::key) and
/// [`message`](ValidationResult::message) rewrite that error in place. Both
/// are no-ops on a successful result.
///
/// ```rust
/// use formcheck_validate::Validation;
///
/// let mut v = Validation::new();
/// v.required("user_name", "")
///     .key("name")
///     .message("Please tell us your name", &[]);
///
/// assert_eq!(v.errors()[0].key, "name");
/// assert_eq!(v.errors()[0].message, "Please tell us your name");
/// ```
#[derive(Debug)]
pub struct ValidationResult<'v> {
    ok: bool,
    index: Option<usize>,
    validation: &'v mut Validation,
}

impl<'v> ValidationResult<'v> {
    pub(crate) fn passed(validation: &'v mut Validation) -> Self {
        Self {
            ok: true,
            index: None,
            validation,
        }
    }

    pub(crate) fn failed(validation: &'v mut Validation, index: usize) -> Self {
        Self {
            ok: false,
            index: Some(index),
            validation,
        }
    }

    /// Whether the value passed.
    pub fn is_ok(&self) -> bool {
        self.ok
    }

    /// The error this call recorded, if it failed.
    pub fn error(&self) -> Option<&FieldError> {
        self.index.and_then(|i| self.validation.errors.get(i))
    }

    /// Position of the recorded error in [`Validation::errors`].
    pub fn error_index(&self) -> Option<usize> {
        self.index
    }

    /// The locale messages are rendered in.
    pub fn locale(&self) -> &str {
        self.validation.locale()
    }

    /// Replace the recorded error's key.
    pub fn key(self, key: impl Into<String>) -> Self {
        if let Some(i) = self.index {
            self.validation.errors[i].key = key.into();
        }
        self
    }

    /// Replace the recorded error's message.
    ///
    /// `template` is translated when the context's translator knows it;
    /// otherwise it is formatted with `args`, or used verbatim when there
    /// are no args.
    pub fn message(self, template: &str, args: &[MessageArg]) -> Self {
        if let Some(i) = self.index {
            let message = self.validation.render(template, args);
            self.validation.errors[i].message = message;
        }
        self
    }
}

//! The per-pass validation context.

use crate::bulk::StructValidator;
use crate::check::{
    Check, Domain, Email, FilePath, IpAddr, IpFamily, Length, MacAddr, Match, Max, MaxSize, Min,
    MinSize, PathMode, PureText, Range, Required, TextMode, TimeStartEnd, Url,
};
use crate::error::{CheckError, FieldError, FieldErrors};
use crate::message::{format_message, MessageArg};
use crate::result::ValidationResult;
use crate::translate::{is_missing, Translator};
use crate::value::Value;
use chrono::{DateTime, TimeZone};
use std::collections::BTreeMap;
use std::sync::Arc;

/// Locale used when none is configured.
pub const DEFAULT_LOCALE: &str = "en";

/// Accumulates field errors for one validation pass.
///
/// A `Validation` is created per pass (one request, one record), collects
/// errors as checks fail, and is read out with [`has_errors`] /
/// [`error_map`] once the pass is over. Errors are only ever appended;
/// [`clear`] is the one way to drop them.
///
/// ## Example
///
/// ```rust
/// use formcheck_validate::Validation;
///
/// let mut v = Validation::new();
/// v.required("name", "");
/// v.min_size("username", "ab", 3).key("user.name");
/// v.email("email", "not-an-email").message("Please enter an email", &[]);
///
/// assert!(v.has_errors());
/// let map = v.error_map();
/// assert_eq!(map["name"].message, "Required");
/// assert_eq!(map["user.name"].message, "Minimum size is 3");
/// assert_eq!(map["email"].message, "Please enter an email");
/// ```
///
/// [`has_errors`]: Validation::has_errors
/// [`error_map`]: Validation::error_map
/// [`clear`]: Validation::clear
pub struct Validation {
    pub(crate) errors: Vec<FieldError>,
    locale: String,
    translator: Option<Arc<dyn Translator>>,
    pub(crate) struct_validator: Option<Arc<dyn StructValidator>>,
}

impl Default for Validation {
    fn default() -> Self {
        Self {
            errors: Vec::new(),
            locale: DEFAULT_LOCALE.to_string(),
            translator: None,
            struct_validator: None,
        }
    }
}

impl Validation {
    /// Create a context with the default locale and no translator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a builder for constructing a context.
    pub fn builder() -> ValidationBuilder {
        ValidationBuilder::new()
    }

    /// The active locale.
    pub fn locale(&self) -> &str {
        &self.locale
    }

    /// Change the locale used for messages recorded from now on.
    pub fn set_locale(&mut self, locale: impl Into<String>) {
        self.locale = locale.into();
    }

    /// The configured translator, if any.
    pub fn translator(&self) -> Option<&Arc<dyn Translator>> {
        self.translator.as_ref()
    }

    /// All recorded errors, oldest first.
    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    /// Number of recorded errors.
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// True if no error has been recorded.
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// True if at least one error has been recorded.
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Drop every recorded error. Locale, translator and struct validator
    /// are kept.
    pub fn clear(&mut self) {
        self.errors.clear();
    }

    /// Errors by key. If several errors share a key, the first one wins
    /// (typically the first check is the more basic one).
    pub fn error_map(&self) -> BTreeMap<&str, &FieldError> {
        let mut map = BTreeMap::new();
        for error in &self.errors {
            map.entry(error.key.as_str()).or_insert(error);
        }
        map
    }

    /// Consume the context and return its errors.
    pub fn into_errors(self) -> Vec<FieldError> {
        self.errors
    }

    /// `Ok(())` if nothing failed, otherwise every recorded error.
    pub fn into_result(self) -> Result<(), FieldErrors> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(FieldErrors::new(self.errors))
        }
    }

    /// Record an error detected by caller-side logic.
    ///
    /// `template` goes through the same path as [`ValidationResult::message`]:
    /// translated when possible, otherwise formatted with `args`.
    pub fn error(
        &mut self,
        field: impl Into<String>,
        template: &str,
        args: &[MessageArg],
    ) -> ValidationResult<'_> {
        let index = self.push(field.into(), String::new());
        ValidationResult::failed(self, index).message(template, args)
    }

    /// Evaluate one check against `value`.
    ///
    /// On failure the message is translated when a translator knows the
    /// check's key, otherwise the check's default message is used.
    ///
    /// # Panics
    ///
    /// Panics if `check` cannot evaluate a value of this shape. Use
    /// [`try_apply`](Validation::try_apply) to get the error instead.
    pub fn apply<'a, C: Check + ?Sized>(
        &mut self,
        field: impl Into<String>,
        value: impl Into<Value<'a>>,
        check: &C,
    ) -> ValidationResult<'_> {
        let value = value.into();
        match check.evaluate(&value) {
            Ok(satisfied) => self.record(field.into(), satisfied, check),
            Err(err) => panic!("{err}"),
        }
    }

    /// Like [`apply`](Validation::apply), but reports misuse as an error and
    /// records nothing in that case.
    pub fn try_apply<'a, C: Check + ?Sized>(
        &mut self,
        field: impl Into<String>,
        value: impl Into<Value<'a>>,
        check: &C,
    ) -> Result<ValidationResult<'_>, CheckError> {
        let satisfied = check.evaluate(&value.into())?;
        Ok(self.record(field.into(), satisfied, check))
    }

    /// Apply checks in order and return the result of the first one that
    /// fails, or of the last one if all pass. Checks after a failure are not
    /// evaluated.
    ///
    /// # Panics
    ///
    /// Panics if a check cannot evaluate a value of this shape.
    pub fn check<'a>(
        &mut self,
        field: impl Into<String>,
        value: impl Into<Value<'a>>,
        checks: &[&dyn Check],
    ) -> ValidationResult<'_> {
        match self.run_checks(field.into(), value.into(), checks) {
            Ok(index) => self.result_for(index),
            Err(err) => panic!("{err}"),
        }
    }

    /// Like [`check`](Validation::check), but reports misuse as an error.
    pub fn try_check<'a>(
        &mut self,
        field: impl Into<String>,
        value: impl Into<Value<'a>>,
        checks: &[&dyn Check],
    ) -> Result<ValidationResult<'_>, CheckError> {
        let index = self.run_checks(field.into(), value.into(), checks)?;
        Ok(self.result_for(index))
    }

    fn run_checks(
        &mut self,
        field: String,
        value: Value<'_>,
        checks: &[&dyn Check],
    ) -> Result<Option<usize>, CheckError> {
        for check in checks {
            if !check.evaluate(&value)? {
                return Ok(Some(self.record_failure(field, *check)));
            }
        }
        Ok(None)
    }

    fn result_for(&mut self, index: Option<usize>) -> ValidationResult<'_> {
        match index {
            Some(index) => ValidationResult::failed(self, index),
            None => ValidationResult::passed(self),
        }
    }

    fn record<C: Check + ?Sized>(
        &mut self,
        field: String,
        satisfied: bool,
        check: &C,
    ) -> ValidationResult<'_> {
        if satisfied {
            ValidationResult::passed(self)
        } else {
            let index = self.record_failure(field, check);
            ValidationResult::failed(self, index)
        }
    }

    fn record_failure<C: Check + ?Sized>(&mut self, field: String, check: &C) -> usize {
        let (key, args) = check.message_key();
        let message = self
            .localize(key, &args)
            .unwrap_or_else(|| check.default_message());
        tracing::debug!(field = %field, check = check.name(), "validation check failed");
        self.push(field, message)
    }

    pub(crate) fn push(&mut self, key: String, message: String) -> usize {
        self.errors.push(FieldError { key, message });
        self.errors.len() - 1
    }

    /// Translate `key`, or `None` when there is no translator or it has no
    /// entry for the key.
    pub(crate) fn localize(&self, key: &str, args: &[MessageArg]) -> Option<String> {
        let translator = self.translator.as_ref()?;
        let translated = translator.translate(&self.locale, key, args);
        if is_missing(&translated) {
            tracing::trace!(locale = %self.locale, key, "no translation, using default message");
            None
        } else {
            Some(translated)
        }
    }

    /// Translate `template`, falling back to formatting it with `args`.
    pub(crate) fn render(&self, template: &str, args: &[MessageArg]) -> String {
        self.localize(template, args).unwrap_or_else(|| {
            if args.is_empty() {
                template.to_string()
            } else {
                format_message(template, args)
            }
        })
    }

    // Convenience entry points, one per built-in check.

    /// Present, and non-empty if text or a collection.
    pub fn required<'a>(
        &mut self,
        field: impl Into<String>,
        value: impl Into<Value<'a>>,
    ) -> ValidationResult<'_> {
        self.apply(field, value, &Required)
    }

    /// `n >= min`.
    pub fn min(&mut self, field: impl Into<String>, n: i64, min: i64) -> ValidationResult<'_> {
        self.min_float(field, n as f64, min as f64)
    }

    /// `n >= min`.
    pub fn min_float(&mut self, field: impl Into<String>, n: f64, min: f64) -> ValidationResult<'_> {
        self.apply(field, n, &Min { min })
    }

    /// `n <= max`.
    pub fn max(&mut self, field: impl Into<String>, n: i64, max: i64) -> ValidationResult<'_> {
        self.max_float(field, n as f64, max as f64)
    }

    /// `n <= max`.
    pub fn max_float(&mut self, field: impl Into<String>, n: f64, max: f64) -> ValidationResult<'_> {
        self.apply(field, n, &Max { max })
    }

    /// `min <= n <= max`.
    pub fn range(
        &mut self,
        field: impl Into<String>,
        n: i64,
        min: i64,
        max: i64,
    ) -> ValidationResult<'_> {
        self.range_float(field, n as f64, min as f64, max as f64)
    }

    /// `min <= n <= max`.
    pub fn range_float(
        &mut self,
        field: impl Into<String>,
        n: f64,
        min: f64,
        max: f64,
    ) -> ValidationResult<'_> {
        self.apply(field, n, &Range::new(min, max))
    }

    /// Text or collection length `>= min`.
    ///
    /// # Panics
    ///
    /// Panics if `value` is neither text nor a collection.
    pub fn min_size<'a>(
        &mut self,
        field: impl Into<String>,
        value: impl Into<Value<'a>>,
        min: usize,
    ) -> ValidationResult<'_> {
        self.apply(field, value, &MinSize { min })
    }

    /// Text or collection length `<= max`.
    ///
    /// # Panics
    ///
    /// Panics if `value` is neither text nor a collection.
    pub fn max_size<'a>(
        &mut self,
        field: impl Into<String>,
        value: impl Into<Value<'a>>,
        max: usize,
    ) -> ValidationResult<'_> {
        self.apply(field, value, &MaxSize { max })
    }

    /// Text or collection length `== n`.
    ///
    /// # Panics
    ///
    /// Panics if `value` is neither text nor a collection.
    pub fn length<'a>(
        &mut self,
        field: impl Into<String>,
        value: impl Into<Value<'a>>,
        n: usize,
    ) -> ValidationResult<'_> {
        self.apply(field, value, &Length { n })
    }

    /// The whole string matches `pattern`.
    pub fn matches(
        &mut self,
        field: impl Into<String>,
        s: &str,
        pattern: &Match,
    ) -> ValidationResult<'_> {
        self.apply(field, s, pattern)
    }

    /// An email address.
    pub fn email(&mut self, field: impl Into<String>, s: &str) -> ValidationResult<'_> {
        self.apply(field, s, &Email)
    }

    /// An IP address in one of `families` (any form if empty).
    pub fn ip_addr(
        &mut self,
        field: impl Into<String>,
        s: &str,
        families: &[IpFamily],
    ) -> ValidationResult<'_> {
        self.apply(field, s, &IpAddr::new(families.iter().copied()))
    }

    /// A MAC address.
    pub fn mac_addr(&mut self, field: impl Into<String>, s: &str) -> ValidationResult<'_> {
        self.apply(field, s, &MacAddr)
    }

    /// A domain name.
    pub fn domain(&mut self, field: impl Into<String>, s: &str) -> ValidationResult<'_> {
        self.apply(field, s, &Domain)
    }

    /// A URL.
    pub fn url(&mut self, field: impl Into<String>, s: &str) -> ValidationResult<'_> {
        self.apply(field, s, &Url)
    }

    /// Plain text under `mode`.
    pub fn pure_text(
        &mut self,
        field: impl Into<String>,
        s: &str,
        mode: TextMode,
    ) -> ValidationResult<'_> {
        self.apply(field, s, &PureText { mode })
    }

    /// A sanitary file name or relative path under `mode`.
    pub fn file_path(
        &mut self,
        field: impl Into<String>,
        s: &str,
        mode: PathMode,
    ) -> ValidationResult<'_> {
        self.apply(field, s, &FilePath { mode })
    }

    /// `start` is no later than `end`.
    pub fn time_start_end<Tz: TimeZone>(
        &mut self,
        field: impl Into<String>,
        start: &DateTime<Tz>,
        end: &DateTime<Tz>,
    ) -> ValidationResult<'_> {
        self.apply(field, Value::period(start, end), &TimeStartEnd)
    }
}

impl std::fmt::Debug for Validation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Validation")
            .field("errors", &self.errors)
            .field("locale", &self.locale)
            .field("has_translator", &self.translator.is_some())
            .field("has_struct_validator", &self.struct_validator.is_some())
            .finish()
    }
}

/// Builder for constructing a [`Validation`].
#[derive(Default)]
pub struct ValidationBuilder {
    locale: Option<String>,
    translator: Option<Arc<dyn Translator>>,
    struct_validator: Option<Arc<dyn StructValidator>>,
}

impl ValidationBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the locale.
    pub fn locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = Some(locale.into());
        self
    }

    /// Set the translator.
    pub fn translator(mut self, translator: impl Translator + 'static) -> Self {
        self.translator = Some(Arc::new(translator));
        self
    }

    /// Set the translator from an Arc.
    pub fn translator_arc(mut self, translator: Arc<dyn Translator>) -> Self {
        self.translator = Some(translator);
        self
    }

    /// Set the struct validator used by [`Validation::validate_struct`].
    pub fn struct_validator(mut self, validator: impl StructValidator + 'static) -> Self {
        self.struct_validator = Some(Arc::new(validator));
        self
    }

    /// Set the struct validator from an Arc.
    pub fn struct_validator_arc(mut self, validator: Arc<dyn StructValidator>) -> Self {
        self.struct_validator = Some(validator);
        self
    }

    /// Build the context.
    pub fn build(self) -> Validation {
        Validation {
            errors: Vec::new(),
            locale: self.locale.unwrap_or_else(|| DEFAULT_LOCALE.to_string()),
            translator: self.translator,
            struct_validator: self.struct_validator,
        }
    }
}

//! Adapter for `#[derive(validator::Validate)]` records.
//!
//! The `validator` crate reports failures as a tree of
//! [`ValidationErrors`]: fields, nested structs and lists of structs. This
//! module flattens that tree into dotted / indexed keys (`address.city`,
//! `items[0].name`) and turns each failing field into a [`FieldError`]
//! through the same translation path single-field checks use.
//!
//! [`FieldError`]: crate::FieldError

use crate::check::{Check, Email, Length, Max, MaxSize, Min, MinSize, Range, Required, Url};
use crate::context::Validation;
use crate::message::MessageArg;
use validator::{ValidationError, ValidationErrors, ValidationErrorsKind};

/// Runs the derive-generated rules of a record.
///
/// The default is [`DeriveValidator`]; a different implementation can be
/// installed with [`ValidationBuilder::struct_validator`] to add
/// cross-record rules or to stub validation in tests.
///
/// [`ValidationBuilder::struct_validator`]: crate::ValidationBuilder::struct_validator
pub trait StructValidator: Send + Sync {
    /// Validate `record`, returning every failure.
    fn validate_struct(&self, record: &dyn validator::Validate) -> Result<(), ValidationErrors>;
}

/// Calls the record's own `validator::Validate::validate`.
#[derive(Debug, Clone, Copy, Default)]
pub struct DeriveValidator;

impl StructValidator for DeriveValidator {
    fn validate_struct(&self, record: &dyn validator::Validate) -> Result<(), ValidationErrors> {
        validator::Validate::validate(record)
    }
}

static DEFAULT_STRUCT_VALIDATOR: DeriveValidator = DeriveValidator;

impl Validation {
    /// Validate a whole record and record one error per failing field.
    ///
    /// Failing fields are appended in key order, comparing field names as
    /// text and list positions as numbers (`items[2]` before `items[10]`).
    /// When a field breaks
    /// several rules only the first is reported. A rule's explicit
    /// `message` is used as a template (translated when possible);
    /// otherwise the message is derived from the rule code and params.
    ///
    /// ```rust
    /// use formcheck_validate::Validation;
    /// use validator::Validate;
    ///
    /// #[derive(Validate)]
    /// struct Signup {
    ///     #[validate(email)]
    ///     email: String,
    ///     #[validate(range(min = 18, max = 120))]
    ///     age: u32,
    /// }
    ///
    /// let mut v = Validation::new();
    /// v.validate_struct(&Signup { email: "nope".into(), age: 7 });
    ///
    /// assert_eq!(v.errors()[0].key, "age");
    /// assert_eq!(v.errors()[0].message, "Range is 18 to 120");
    /// assert_eq!(v.errors()[1].key, "email");
    /// ```
    pub fn validate_struct<T: validator::Validate>(&mut self, record: &T) -> &mut Self {
        let outcome = match &self.struct_validator {
            Some(custom) => custom.validate_struct(record),
            None => DEFAULT_STRUCT_VALIDATOR.validate_struct(record),
        };
        if let Err(errors) = outcome {
            self.record_bulk(&errors);
        }
        self
    }

    fn record_bulk(&mut self, errors: &ValidationErrors) {
        let mut failures = Vec::new();
        flatten("", errors, &mut failures);
        failures.sort_by(|a, b| path_segments(&a.0).cmp(&path_segments(&b.0)));
        tracing::trace!(fields = failures.len(), "adapting struct validation errors");

        for (key, error) in failures {
            let description = describe(error);
            let message = match &error.message {
                Some(explicit) => self.render(explicit, &description.args),
                None => self
                    .localize(&description.key, &description.args)
                    .unwrap_or(description.default),
            };
            tracing::debug!(field = %key, code = %error.code, "validation check failed");
            self.push(key, message);
        }
    }
}

/// Collect the first error of every failing field, keyed by its path.
fn flatten<'e>(
    prefix: &str,
    errors: &'e ValidationErrors,
    out: &mut Vec<(String, &'e ValidationError)>,
) {
    for (field, kind) in errors.errors() {
        let path = if prefix.is_empty() {
            field.to_string()
        } else {
            format!("{prefix}.{field}")
        };
        match kind {
            ValidationErrorsKind::Field(list) => {
                if let Some(first) = list.first() {
                    out.push((path, first));
                }
            }
            ValidationErrorsKind::Struct(nested) => flatten(&path, nested, out),
            ValidationErrorsKind::List(items) => {
                for (index, nested) in items {
                    flatten(&format!("{path}[{index}]"), nested, out);
                }
            }
        }
    }
}

#[derive(Debug, PartialEq, Eq, PartialOrd, Ord)]
enum Segment<'k> {
    Name(&'k str),
    Index(usize),
}

/// Split `items[10].name` into `items`, `10`, `name`.
fn path_segments(key: &str) -> Vec<Segment<'_>> {
    let mut segments = Vec::new();
    for part in key.split('.') {
        let name_end = part.find('[').unwrap_or(part.len());
        segments.push(Segment::Name(&part[..name_end]));
        for index in part[name_end..].split(['[', ']']).filter(|s| !s.is_empty()) {
            segments.push(match index.parse() {
                Ok(n) => Segment::Index(n),
                Err(_) => Segment::Name(index),
            });
        }
    }
    segments
}

struct Description {
    key: String,
    args: Vec<MessageArg>,
    default: String,
}

impl Description {
    fn from_check(check: &impl Check) -> Self {
        let (key, args) = check.message_key();
        Self {
            key: key.to_string(),
            args,
            default: check.default_message(),
        }
    }
}

/// Map a `validator` error onto a message key, args and default message.
fn describe(error: &ValidationError) -> Description {
    let number = |name: &str| error.params.get(name).and_then(|v| v.as_f64());
    let size = |name: &str| error.params.get(name).and_then(|v| v.as_u64()).map(|n| n as usize);

    match error.code.as_ref() {
        "required" => Description::from_check(&Required),
        "length" => match (size("min"), size("max"), size("equal")) {
            (_, _, Some(n)) => Description::from_check(&Length::new(n)),
            (Some(min), Some(max), None) => Description {
                key: "validation.size_range".to_string(),
                args: vec![min.into(), max.into()],
                default: format!("Size must be between {min} and {max}"),
            },
            (Some(min), None, None) => Description::from_check(&MinSize::new(min)),
            (None, Some(max), None) => Description::from_check(&MaxSize::new(max)),
            (None, None, None) => generic("length"),
        },
        "range" => match (number("min"), number("max")) {
            (Some(min), Some(max)) => Description::from_check(&Range::new(min, max)),
            (Some(min), None) => Description::from_check(&Min::new(min)),
            (None, Some(max)) => Description::from_check(&Max::new(max)),
            (None, None) => generic("range"),
        },
        "email" => Description::from_check(&Email),
        "url" => Description::from_check(&Url),
        "regex" => Description {
            key: "validation.pattern".to_string(),
            args: Vec::new(),
            default: "Invalid format".to_string(),
        },
        other => generic(other),
    }
}

fn generic(code: &str) -> Description {
    Description {
        key: format!("validation.{code}"),
        args: Vec::new(),
        default: "Invalid value".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::{format_message, number_arg};
    use crate::translate::missing_translation;
    use serde_json::json;
    use std::borrow::Cow;
    use validator::Validate;

    #[derive(Debug, Validate)]
    struct Address {
        #[validate(length(min = 2))]
        city: String,
    }

    #[derive(Debug, Validate)]
    struct Item {
        #[validate(length(min = 1, max = 10))]
        name: String,
    }

    #[derive(Debug, Validate)]
    struct Order {
        #[validate(email)]
        email: String,
        #[validate(length(min = 3))]
        username: String,
        #[validate(range(min = 18))]
        age: u32,
        #[validate(required)]
        note: Option<String>,
        #[validate(nested)]
        address: Address,
        #[validate(nested)]
        items: Vec<Item>,
    }

    fn valid_order() -> Order {
        Order {
            email: "buyer@example.com".into(),
            username: "alice".into(),
            age: 30,
            note: Some("gift".into()),
            address: Address { city: "Oslo".into() },
            items: vec![Item { name: "book".into() }],
        }
    }

    #[test]
    fn valid_record_leaves_context_unchanged() {
        let mut v = Validation::new();
        v.validate_struct(&valid_order());
        assert!(!v.has_errors());
    }

    #[test]
    fn failing_fields_in_sorted_key_order() {
        let mut order = valid_order();
        order.email = "nope".into();
        order.username = "ab".into();
        order.age = 12;
        order.note = None;

        let mut v = Validation::new();
        v.validate_struct(&order);

        let pairs: Vec<(&str, &str)> = v
            .errors()
            .iter()
            .map(|e| (e.key.as_str(), e.message.as_str()))
            .collect();
        assert_eq!(
            pairs,
            [
                ("age", "Minimum is 18"),
                ("email", "Must be a valid email address"),
                ("note", "Required"),
                ("username", "Minimum size is 3"),
            ]
        );
    }

    #[test]
    fn nested_errors_are_flattened() {
        let mut order = valid_order();
        order.address.city = "X".into();
        order.items = vec![Item { name: "ok".into() }, Item { name: String::new() }];

        let mut v = Validation::new();
        v.validate_struct(&order);

        let map = v.error_map();
        assert_eq!(map.len(), 2);
        assert_eq!(map["address.city"].message, "Minimum size is 2");
        assert_eq!(map["items[1].name"].message, "Size must be between 1 and 10");
    }

    #[test]
    fn list_positions_sort_numerically() {
        let mut order = valid_order();
        order.items = (0..12)
            .map(|i| Item {
                name: if i == 2 || i == 10 { String::new() } else { "ok".into() },
            })
            .collect();
        order.address.city = "X".into();

        let mut v = Validation::new();
        v.validate_struct(&order);

        let keys: Vec<&str> = v.errors().iter().map(|e| e.key.as_str()).collect();
        assert_eq!(keys, ["address.city", "items[2].name", "items[10].name"]);
    }

    #[test]
    fn path_segments_split_names_and_indexes() {
        assert_eq!(
            path_segments("items[10].tags[3]"),
            [
                Segment::Name("items"),
                Segment::Index(10),
                Segment::Name("tags"),
                Segment::Index(3),
            ]
        );
        assert!(path_segments("items[2].name") < path_segments("items[10].name"));
        assert!(path_segments("age") < path_segments("email"));
    }

    #[test]
    fn bulk_messages_are_translated() {
        let translator = |locale: &str, key: &str, args: &[MessageArg]| match key {
            "validation.min" => format_message(&format!("{locale}: at least {{0}}"), args),
            _ => missing_translation(key),
        };
        let mut order = valid_order();
        order.age = 1;
        order.email = "nope".into();

        let mut v = Validation::builder().locale("xx").translator(translator).build();
        v.validate_struct(&order);
        assert_eq!(v.errors()[0].message, "xx: at least 18");
        assert_eq!(v.errors()[1].message, "Must be a valid email address");
    }

    #[test]
    fn explicit_rule_message_wins() {
        #[derive(Validate)]
        struct Login {
            #[validate(length(min = 8, message = "Password needs {0}+ characters"))]
            password: String,
        }

        let mut v = Validation::new();
        v.validate_struct(&Login { password: "short".into() });
        assert_eq!(v.errors()[0].message, "Password needs 8+ characters");
    }

    #[derive(Debug)]
    struct Fixed(ValidationErrors);

    impl StructValidator for Fixed {
        fn validate_struct(&self, _record: &dyn Validate) -> Result<(), ValidationErrors> {
            Err(self.0.clone())
        }
    }

    fn error_with(code: &'static str, params: &[(&'static str, serde_json::Value)]) -> ValidationError {
        let mut error = ValidationError::new(code);
        for (name, value) in params {
            error.params.insert(Cow::Borrowed(*name), value.clone());
        }
        error
    }

    #[test]
    fn custom_struct_validator_and_code_mapping() {
        let mut errors = ValidationErrors::new();
        errors.add("code", ValidationError::new("regex"));
        errors.add("pin", error_with("length", &[("equal", json!(4))]));
        errors.add("price", error_with("range", &[("min", json!(1.0)), ("max", json!(9.5))]));
        errors.add("qty", error_with("range", &[("max", json!(10))]));
        errors.add("tags", error_with("length", &[("max", json!(3))]));
        errors.add("terms", ValidationError::new("must_match"));

        let mut v = Validation::builder().struct_validator(Fixed(errors)).build();
        v.validate_struct(&valid_order());

        let map = v.error_map();
        assert_eq!(map["code"].message, "Invalid format");
        assert_eq!(map["pin"].message, "Required length is 4");
        assert_eq!(map["price"].message, "Range is 1 to 9.5");
        assert_eq!(map["qty"].message, "Maximum is 10");
        assert_eq!(map["tags"].message, "Maximum size is 3");
        assert_eq!(map["terms"].message, "Invalid value");
    }

    #[test]
    fn unknown_codes_get_their_own_key() {
        let description = describe(&ValidationError::new("must_match"));
        assert_eq!(description.key, "validation.must_match");
        assert!(description.args.is_empty());
    }

    #[test]
    fn only_first_rule_per_field_is_reported() {
        let mut errors = ValidationErrors::new();
        errors.add("name", ValidationError::new("required"));
        errors.add("name", error_with("length", &[("min", json!(2))]));

        let mut v = Validation::builder().struct_validator(Fixed(errors)).build();
        v.validate_struct(&valid_order());
        assert_eq!(v.len(), 1);
        assert_eq!(v.errors()[0].message, "Required");
    }

    #[test]
    fn number_args_render_like_checks() {
        let description = describe(&error_with("range", &[("min", json!(18.0))]));
        assert_eq!(description.args, vec![number_arg(18.0)]);
        assert_eq!(description.default, "Minimum is 18");
    }
}

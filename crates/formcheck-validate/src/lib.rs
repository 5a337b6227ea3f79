//! # formcheck validation
//!
//! Field-level and struct-level validation with localizable messages.
//! A [`Validation`] context evaluates [`Check`](check::Check)s against
//! values, collects a [`FieldError`] per failure, and hands the errors back
//! as a first-wins map keyed by field.
//!
//! ## Example
//!
//! ```rust
//! use formcheck_validate::prelude::*;
//!
//! let mut v = Validation::new();
//! v.required("name", "");
//! v.check("username", "ab", &[&Required, &MinSize::new(3), &MaxSize::new(20)]);
//! v.range("age", 12, 18, 120).message("You must be an adult", &[]);
//!
//! let map = v.error_map();
//! assert_eq!(map["name"].message, "Required");
//! assert_eq!(map["username"].message, "Minimum size is 3");
//! assert_eq!(map["age"].message, "You must be an adult");
//! ```
//!
//! ## Checks
//!
//! - `Required` - present and non-empty
//! - `Min`, `Max`, `Range` - numeric bounds (inclusive)
//! - `MinSize`, `MaxSize`, `Length` - text or collection length
//! - `Match` - whole-string regular expression
//! - `Email`, `Domain`, `Url`, `IpAddr`, `MacAddr` - address formats
//! - `PureText`, `FilePath` - sanitary user input
//! - `TimeStartEnd` - start no later than end
//!
//! ## Whole records
//!
//! Records deriving `validator::Validate` are checked with
//! [`Validation::validate_struct`]; their errors land in the same context
//! with the same message keys.
//!
//! ## Error Format
//!
//! [`Validation::into_result`] returns [`FieldErrors`], which serializes as:
//!
//! ```json
//! {
//!   "error": {
//!     "type": "validation_error",
//!     "message": "Validation failed",
//!     "fields": [
//!       {"key": "email", "message": "Must be a valid email address"},
//!       {"key": "age", "message": "Range is 18 to 120"}
//!     ]
//!   }
//! }
//! ```

mod bulk;
pub mod check;
mod context;
mod error;
mod message;
mod result;
mod translate;
mod value;


pub use bulk::{DeriveValidator, StructValidator};
pub use context::{Validation, ValidationBuilder, DEFAULT_LOCALE};
pub use error::{CheckError, FieldError, FieldErrors};
pub use message::{format_message, number_arg, render_arg, MessageArg};
pub use result::ValidationResult;
pub use translate::{is_missing, missing_translation, Translator, MISSING_TRANSLATION_PREFIX};
pub use value::Value;

/// Prelude module for validation
pub mod prelude {
    pub use crate::check::{
        Check, Domain, Email, FilePath, IpAddr, IpFamily, Length, MacAddr, Match, Max, MaxSize,
        Min, MinSize, PathMode, PureText, Range, Required, TextMode, TimeStartEnd, Url,
    };
    pub use crate::{
        FieldError, FieldErrors, MessageArg, Translator, Validation, ValidationResult, Value,
    };
}

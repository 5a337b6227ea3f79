//! # formcheck
//!
//! Field-level and struct-level validation with localizable messages.
//!
//! A [`Validation`] collects errors for one validation pass (one request,
//! one submitted form). Each failing check appends a `{ key, message }`
//! record; callers read the result back as a first-wins map keyed by field.
//!
//! ## Quick Start
//!
//! ```rust
//! use formcheck::prelude::*;
//!
//! #[derive(Validate)]
//! struct Signup {
//!     #[validate(email)]
//!     email: String,
//!     #[validate(length(min = 3, max = 20))]
//!     username: String,
//! }
//!
//! let form = Signup { email: "nope".into(), username: "alice".into() };
//!
//! let mut v = formcheck::validation_for("en");
//! v.validate_struct(&form);
//! v.check("password", "hunter2", &[&Required, &MinSize::new(8)])
//!     .message("Use at least {0} characters", &[8.into()]);
//!
//! let errors = v.error_map();
//! assert_eq!(errors["email"].message, "Must be a valid email address");
//! assert_eq!(errors["password"].message, "Use at least 8 characters");
//! ```
//!
//! ## Optional Features
//!
//! - `i18n` (default) - built-in `en` / `zh` message catalogs and the
//!   `FORMCHECK_DEFAULT_LOCALE` / `FORMCHECK_FALLBACK_LOCALE` settings used
//!   by [`validation`] and [`validation_for`]
//!
//! ```toml
//! [dependencies]
//! formcheck = { version = "0.1", default-features = false }
//! ```

// Re-export core functionality
pub use formcheck_validate::*;

// Re-export the crates that appear in the public API
pub use chrono;
pub use serde_json;
pub use validator;

// Re-export catalogs and configuration (feature-gated)
#[cfg(feature = "i18n")]
pub use formcheck_i18n as i18n;
#[cfg(feature = "i18n")]
pub use formcheck_i18n::{default_catalog, Catalog, CatalogBuilder, ConfigError, I18nConfig};

/// A context in the configured default locale, translating through the
/// default catalog.
///
/// Without the `i18n` feature the context uses the `en` locale and no
/// translator.
pub fn validation() -> Validation {
    #[cfg(feature = "i18n")]
    {
        validation_for(&formcheck_i18n::config().default_locale)
    }
    #[cfg(not(feature = "i18n"))]
    {
        Validation::new()
    }
}

/// A context in `locale`, translating through the default catalog.
pub fn validation_for(locale: &str) -> Validation {
    let builder = Validation::builder().locale(locale);
    #[cfg(feature = "i18n")]
    let builder = builder.translator_arc(default_catalog().clone());
    builder.build()
}

/// Prelude module - import everything you need with `use formcheck::prelude::*`
pub mod prelude {
    pub use formcheck_validate::prelude::*;

    // Re-export validation - use validator derive macro directly
    pub use validator::Validate;

    // Message arguments
    pub use serde_json::json;

    #[cfg(feature = "i18n")]
    pub use formcheck_i18n::{default_catalog, Catalog};

    pub use crate::{validation, validation_for};
}

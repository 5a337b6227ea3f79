//! # formcheck i18n
//!
//! Message catalogs for formcheck validation. Ships English and Simplified
//! Chinese tables for every built-in check and reads the locale settings
//! from `FORMCHECK_*` environment variables.
//!
//! ## Example
//!
//! ```rust
//! use formcheck_i18n::default_catalog;
//! use formcheck_validate::Validation;
//!
//! let mut v = Validation::builder()
//!     .locale("zh")
//!     .translator_arc(default_catalog().clone())
//!     .build();
//! v.required("name", "");
//!
//! assert_eq!(v.errors()[0].message, "必填字段");
//! ```

mod catalog;
mod config;
pub mod locales;

pub use catalog::{default_catalog, Catalog, CatalogBuilder};
pub use config::{config, ConfigError, I18nConfig, ENV_PREFIX};

/// Prelude module for i18n
pub mod prelude {
    pub use crate::{default_catalog, Catalog, I18nConfig};
}

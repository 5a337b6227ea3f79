//! Locale message catalogs.

use crate::config;
use crate::locales::BUILTIN;
use formcheck_validate::{format_message, missing_translation, MessageArg, Translator};
use std::collections::HashMap;
use std::sync::{Arc, OnceLock};

/// Message templates by locale and key.
///
/// Lookup tries the exact locale (`zh-CN`), then its base language (`zh`),
/// then the catalog's fallback locale. A key found nowhere translates to
/// the `???key???` marker, which tells the validation context to use its
/// untranslated default.
///
/// ## Example
///
/// ```rust
/// use formcheck_i18n::Catalog;
/// use formcheck_validate::Translator;
///
/// let catalog = Catalog::builder()
///     .builtin_locales()
///     .entry("nl", "validation.required", "Verplicht")
///     .build();
///
/// assert_eq!(catalog.translate("nl-BE", "validation.required", &[]), "Verplicht");
/// assert_eq!(catalog.translate("nl", "validation.min", &[18.into()]), "Minimum is 18");
/// assert_eq!(catalog.translate("zh-CN", "validation.required", &[]), "必填字段");
/// ```
#[derive(Debug, Clone)]
pub struct Catalog {
    locales: HashMap<String, HashMap<String, String>>,
    fallback: String,
}

impl Catalog {
    /// Create a builder for constructing a catalog.
    pub fn builder() -> CatalogBuilder {
        CatalogBuilder::new()
    }

    /// The built-in `en` and `zh` tables with `en` as fallback.
    pub fn builtin() -> Self {
        Self::builder().builtin_locales().build()
    }

    /// Locale consulted when neither the requested locale nor its base
    /// language has an entry.
    pub fn fallback_locale(&self) -> &str {
        &self.fallback
    }

    /// Whether a table is registered for exactly `locale`.
    pub fn has_locale(&self, locale: &str) -> bool {
        self.locales.contains_key(locale)
    }

    /// Registered locales, sorted.
    pub fn locales(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.locales.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// The raw template for `key` under `locale`, following the fallback
    /// chain.
    pub fn lookup(&self, locale: &str, key: &str) -> Option<&str> {
        let base = base_language(locale);
        [Some(locale), base, Some(self.fallback.as_str())]
            .into_iter()
            .flatten()
            .find_map(|name| self.locales.get(name)?.get(key))
            .map(String::as_str)
    }
}

impl Translator for Catalog {
    fn translate(&self, locale: &str, key: &str, args: &[MessageArg]) -> String {
        match self.lookup(locale, key) {
            Some(template) => format_message(template, args),
            None => {
                tracing::trace!(locale, key, "catalog has no entry");
                missing_translation(key)
            }
        }
    }
}

/// `zh` for `zh-CN` or `zh_CN`; `None` when there is no region part.
fn base_language(locale: &str) -> Option<&str> {
    locale
        .split_once(['-', '_'])
        .map(|(base, _)| base)
        .filter(|base| !base.is_empty())
}

/// Builder for constructing a [`Catalog`].
#[derive(Debug, Default)]
pub struct CatalogBuilder {
    locales: HashMap<String, HashMap<String, String>>,
    fallback: Option<String>,
}

impl CatalogBuilder {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add the built-in `en` and `zh` tables.
    pub fn builtin_locales(mut self) -> Self {
        for (locale, table) in BUILTIN {
            self = self.locale(*locale, table.iter().copied());
        }
        self
    }

    /// Add entries for `locale`. Existing keys are overwritten.
    pub fn locale<K, V>(
        mut self,
        locale: impl Into<String>,
        entries: impl IntoIterator<Item = (K, V)>,
    ) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        let table = self.locales.entry(locale.into()).or_default();
        table.extend(entries.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    /// Add a single entry.
    pub fn entry(
        self,
        locale: impl Into<String>,
        key: impl Into<String>,
        template: impl Into<String>,
    ) -> Self {
        self.locale(locale, [(key.into(), template.into())])
    }

    /// Set the fallback locale (default: `en`).
    pub fn fallback_locale(mut self, locale: impl Into<String>) -> Self {
        self.fallback = Some(locale.into());
        self
    }

    /// Build the catalog.
    pub fn build(self) -> Catalog {
        let fallback = self
            .fallback
            .unwrap_or_else(|| formcheck_validate::DEFAULT_LOCALE.to_string());
        if !self.locales.contains_key(&fallback) {
            tracing::warn!(fallback = %fallback, "fallback locale has no messages");
        }
        Catalog {
            locales: self.locales,
            fallback,
        }
    }
}

/// The process-wide catalog: built-in tables with the configured fallback
/// locale. Built on first use.
pub fn default_catalog() -> &'static Arc<Catalog> {
    static CATALOG: OnceLock<Arc<Catalog>> = OnceLock::new();
    CATALOG.get_or_init(|| {
        let catalog = Catalog::builder()
            .builtin_locales()
            .fallback_locale(config().fallback_locale.clone())
            .build();
        tracing::debug!(
            locales = ?catalog.locales(),
            fallback = catalog.fallback_locale(),
            "default message catalog initialized"
        );
        Arc::new(catalog)
    })
}

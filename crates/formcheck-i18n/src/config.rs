//! Locale configuration loaded from the environment.
//!
//! | Variable | Default |
//! |---|---|
//! | `FORMCHECK_DEFAULT_LOCALE` | `en` |
//! | `FORMCHECK_FALLBACK_LOCALE` | `en` |

use serde::Deserialize;
use std::sync::OnceLock;
use thiserror::Error;

/// Prefix of every configuration variable.
pub const ENV_PREFIX: &str = "FORMCHECK_";

/// Error type for configuration loading failures.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Environment variable deserialization failed.
    #[error("configuration error: {0}")]
    Env(#[from] envy::Error),
    /// A locale variable is set but empty.
    #[error("environment variable FORMCHECK_{var} must not be empty")]
    EmptyLocale {
        /// Variable name without the prefix
        var: &'static str,
    },
}

/// Locale settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct I18nConfig {
    /// Locale new validation contexts start in
    pub default_locale: String,
    /// Locale consulted when a message is missing from the requested one
    pub fallback_locale: String,
}

impl Default for I18nConfig {
    fn default() -> Self {
        Self {
            default_locale: formcheck_validate::DEFAULT_LOCALE.to_string(),
            fallback_locale: formcheck_validate::DEFAULT_LOCALE.to_string(),
        }
    }
}

impl I18nConfig {
    /// Load from `FORMCHECK_*` environment variables. Unset variables keep
    /// their defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        envy::prefixed(ENV_PREFIX).from_env::<Self>()?.checked()
    }

    /// Load from an explicit list of `(name, value)` pairs, named as in the
    /// environment.
    pub fn from_vars<I>(vars: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        envy::prefixed(ENV_PREFIX).from_iter::<_, Self>(vars)?.checked()
    }

    fn checked(self) -> Result<Self, ConfigError> {
        if self.default_locale.trim().is_empty() {
            return Err(ConfigError::EmptyLocale {
                var: "DEFAULT_LOCALE",
            });
        }
        if self.fallback_locale.trim().is_empty() {
            return Err(ConfigError::EmptyLocale {
                var: "FALLBACK_LOCALE",
            });
        }
        Ok(self)
    }
}

/// The process-wide configuration, read from the environment on first use.
///
/// An invalid environment is logged and replaced by the defaults.
pub fn config() -> &'static I18nConfig {
    static CONFIG: OnceLock<I18nConfig> = OnceLock::new();
    CONFIG.get_or_init(|| {
        I18nConfig::from_env().unwrap_or_else(|err| {
            tracing::warn!(error = %err, "invalid locale configuration, using defaults");
            I18nConfig::default()
        })
    })
}

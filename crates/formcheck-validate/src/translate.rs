//! The translation seam.

use crate::message::MessageArg;

/// Prefix a [`Translator`] returns when it has no entry for a key.
pub const MISSING_TRANSLATION_PREFIX: &str = "???";

/// Trait for translating message keys.
///
/// Implementations return a string starting with
/// [`MISSING_TRANSLATION_PREFIX`] when `key` has no translation under
/// `locale`; callers then fall back to an untranslated message.
///
/// Any `Fn(&str, &str, &[MessageArg]) -> String` closure is a translator.
pub trait Translator: Send + Sync {
    /// Translate `key` for `locale`, substituting `args`.
    fn translate(&self, locale: &str, key: &str, args: &[MessageArg]) -> String;
}

impl<F> Translator for F
where
    F: Fn(&str, &str, &[MessageArg]) -> String + Send + Sync,
{
    fn translate(&self, locale: &str, key: &str, args: &[MessageArg]) -> String {
        self(locale, key, args)
    }
}

/// Whether a translator output signals a missing translation.
pub fn is_missing(translated: &str) -> bool {
    translated.starts_with(MISSING_TRANSLATION_PREFIX)
}

/// The marker a translator returns for an unknown key.
pub fn missing_translation(key: &str) -> String {
    format!("{MISSING_TRANSLATION_PREFIX}{key}{MISSING_TRANSLATION_PREFIX}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn closures_are_translators() {
        let translator = |locale: &str, key: &str, _args: &[MessageArg]| format!("{locale}:{key}");
        assert_eq!(translator.translate("fr", "validation.min", &[]), "fr:validation.min");
    }

    #[test]
    fn missing_marker_round_trip() {
        let marker = missing_translation("validation.email");
        assert_eq!(marker, "???validation.email???");
        assert!(is_missing(&marker));
        assert!(!is_missing("Must be a valid email address"));
    }
}

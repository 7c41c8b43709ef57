use std::collections::HashMap;

use fluent_templates::{fluent_bundle::FluentValue, static_loader, Loader};
use once_cell::sync::Lazy;
use unic_langid::LanguageIdentifier;

static_loader! {
    static LOCALES = {
        locales: "./locales",
        fallback_language: "en",
        // Telegram renders the bidi isolation marks as visible junk
        customise: |bundle| bundle.set_use_isolating(false),
    };
}

/// Supported languages (code, human-readable name).
pub static SUPPORTED_LANGS: &[(&str, &str)] = &[("en", "English"), ("pt", "Português")];

/// Default language identifier used as a fallback.
static DEFAULT_LANG: Lazy<LanguageIdentifier> = Lazy::new(|| "en".parse().unwrap_or_default());

/// Normalizes a language code into a LanguageIdentifier (falls back to default).
pub fn lang_from_code(code: &str) -> LanguageIdentifier {
    match is_language_supported(code) {
        Some(supported) => supported.parse().unwrap_or_else(|_| DEFAULT_LANG.clone()),
        None => DEFAULT_LANG.clone(),
    }
}

/// Language for a Telegram user's `language_code`, if any.
pub fn lang_for_user(language_code: Option<&str>) -> LanguageIdentifier {
    language_code.map(lang_from_code).unwrap_or_else(|| DEFAULT_LANG.clone())
}

/// Returns a localized string for the given key.
pub fn t(lang: &LanguageIdentifier, key: &str) -> String {
    LOCALES
        .lookup(lang, key)
        .unwrap_or_else(|| LOCALES.lookup(&DEFAULT_LANG, key).unwrap_or_else(|| key.to_string()))
}

/// Returns a localized string with arguments for interpolation.
///
/// Values are passed as strings so codes are never reformatted as numbers.
pub fn t_args(lang: &LanguageIdentifier, key: &str, args: &[(&str, String)]) -> String {
    let args_map: HashMap<String, FluentValue> = args
        .iter()
        .map(|(name, value)| (name.to_string(), FluentValue::from(value.clone())))
        .collect();

    LOCALES.lookup_with_args(lang, key, &args_map).unwrap_or_else(|| {
        LOCALES
            .lookup_with_args(&DEFAULT_LANG, key, &args_map)
            .unwrap_or_else(|| key.to_string())
    })
}

/// Checks if a language code is supported by the bot.
/// Returns the normalized language code if supported, None otherwise.
pub fn is_language_supported(code: &str) -> Option<&'static str> {
    // "pt-BR" -> "pt"
    let normalized = code.split(['-', '_']).next().unwrap_or(code).to_lowercase();

    SUPPORTED_LANGS
        .iter()
        .find(|(c, _)| c.eq_ignore_ascii_case(&normalized))
        .map(|(c, _)| *c)
}

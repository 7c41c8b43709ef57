//! Localized texts for command outcomes

use unic_langid::LanguageIdentifier;

use crate::core::error::CatalogError;
use crate::i18n::{t, t_args};

/// Telegram rejects texts over 4096 characters; keep a margin
pub const MAX_MESSAGE_LENGTH: usize = 4000;

/// Longest product name echoed back in a reply
pub const MAX_ECHOED_NAME: usize = 200;

fn char_len(text: &str) -> usize {
    text.chars().count()
}

/// Cuts `text` so it fits in one Telegram message
pub fn truncate_message(text: &str) -> String {
    if char_len(text) <= MAX_MESSAGE_LENGTH {
        return text.to_string();
    }
    let mut trimmed = text.chars().take(MAX_MESSAGE_LENGTH - 20).collect::<String>();
    trimmed.push_str("\n... (truncated)");
    trimmed
}

/// Product name as shown in replies, shortened with an ellipsis when too long
pub fn echoed_name(name: &str) -> String {
    if char_len(name) <= MAX_ECHOED_NAME {
        return name.to_string();
    }
    let mut short = name.chars().take(MAX_ECHOED_NAME - 1).collect::<String>();
    short.push('…');
    short
}

pub fn added(lang: &LanguageIdentifier, code: i64, name: &str) -> String {
    t_args(lang, "add-success", &[("code", code.to_string()), ("name", echoed_name(name))])
}

pub fn removed(lang: &LanguageIdentifier, code: i64) -> String {
    t_args(lang, "remove-success", &[("code", code.to_string())])
}

/// One line per product under a header, or the "no products" text.
///
/// Stops before `MAX_MESSAGE_LENGTH` and ends with a "... and N more" line instead.
pub fn product_list(lang: &LanguageIdentifier, products: &[(i64, String)]) -> String {
    if products.is_empty() {
        return t(lang, "list-empty");
    }

    let mut text = t(lang, "list-header");
    let mut length = char_len(&text);

    for (shown, (code, name)) in products.iter().enumerate() {
        let line = t_args(
            lang,
            "list-item",
            &[("code", code.to_string()), ("name", echoed_name(name))],
        );
        let remaining = products.len() - shown;
        let more = t_args(lang, "list-more", &[("count", remaining.to_string())]);

        // Room for the "more" line is kept unless this is the last product
        let reserve = if remaining == 1 { 0 } else { char_len(&more) + 1 };
        if length + 1 + char_len(&line) + reserve > MAX_MESSAGE_LENGTH {
            text.push('\n');
            text.push_str(&more);
            break;
        }

        text.push('\n');
        text.push_str(&line);
        length += 1 + char_len(&line);
    }

    log::debug!("Built product list for {} products ({} chars)", products.len(), char_len(&text));
    text
}

pub fn help(lang: &LanguageIdentifier) -> String {
    t(lang, "help-text")
}

pub fn greeting(lang: &LanguageIdentifier, user: &str) -> String {
    t_args(lang, "greet", &[("user", user.to_string())])
}

/// Text shown to the user for a failed command.
///
/// Store-level errors never reach users; they get a generic fallback here.
pub fn error(lang: &LanguageIdentifier, err: &CatalogError) -> String {
    match err {
        CatalogError::AlreadyExists(code) => t_args(lang, "add-duplicate", &[("code", code.to_string())]),
        CatalogError::NotFound(code) => t_args(lang, "remove-not-found", &[("code", code.to_string())]),
        CatalogError::PermissionDenied => t(lang, "remove-denied"),
        CatalogError::PersistenceFailure(_) | CatalogError::MalformedStorage(_) => err.to_string(),
    }
}

pub fn usage_add(lang: &LanguageIdentifier) -> String {
    t(lang, "usage-add")
}

pub fn usage_remove(lang: &LanguageIdentifier) -> String {
    t(lang, "usage-remove")
}

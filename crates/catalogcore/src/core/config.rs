//! Configuration read once from the process environment.
//!
//! Call `dotenvy::dotenv()` before the first access so values from `.env`
//! are picked up.

use once_cell::sync::Lazy;
use secrecy::SecretString;
use std::env;

/// Path of the JSON document holding the whole catalog
/// Read from CATALOG_FILE environment variable
/// Default: products.json
pub static CATALOG_FILE: Lazy<String> =
    Lazy::new(|| env::var("CATALOG_FILE").unwrap_or_else(|_| "products.json".to_string()));

/// Log file path
/// Read from LOG_FILE_PATH environment variable
/// Default: catalogbot.log
pub static LOG_FILE_PATH: Lazy<String> =
    Lazy::new(|| env::var("LOG_FILE_PATH").unwrap_or_else(|_| "catalogbot.log".to_string()));

/// Bot token
/// Read from BOT_TOKEN or TELOXIDE_TOKEN environment variable
/// `None` when neither is set or the value is blank
pub static BOT_TOKEN: Lazy<Option<SecretString>> = Lazy::new(|| {
    env::var("BOT_TOKEN")
        .or_else(|_| env::var("TELOXIDE_TOKEN"))
        .ok()
        .filter(|token| !token.trim().is_empty())
        .map(SecretString::from)
});

/// Custom Bot API server URL
/// Read from BOT_API_URL environment variable
pub static BOT_API_URL: Lazy<Option<String>> = Lazy::new(|| env::var("BOT_API_URL").ok());

/// Who may remove products
pub mod admin {
    use once_cell::sync::Lazy;
    use std::env;

    /// Splits a comma/whitespace separated list of user ids, skipping junk
    pub fn parse_admin_ids(raw: &str) -> Vec<i64> {
        raw.split([',', ' ', '\n', '\t'])
            .filter_map(|part| part.trim().parse::<i64>().ok())
            .collect()
    }

    /// User IDs holding the elevated role in every chat
    /// Read from ADMIN_IDS environment variable
    pub static ADMIN_IDS: Lazy<Vec<i64>> = Lazy::new(|| {
        env::var("ADMIN_IDS")
            .ok()
            .map(|raw| parse_admin_ids(&raw))
            .unwrap_or_default()
    });

    /// Custom administrator title required to remove products
    /// Read from MODERATOR_TITLE environment variable
    /// Unset or blank: any chat administrator qualifies
    pub static MODERATOR_TITLE: Lazy<Option<String>> = Lazy::new(|| {
        env::var("MODERATOR_TITLE")
            .ok()
            .map(|title| title.trim().to_string())
            .filter(|title| !title.is_empty())
    });
}

/// Network configuration
pub mod network {
    use std::time::Duration;

    /// Request timeout for Bot API calls (in seconds)
    pub const REQUEST_TIMEOUT_SECS: u64 = 60;

    /// Request timeout duration
    pub fn timeout() -> Duration {
        Duration::from_secs(REQUEST_TIMEOUT_SECS)
    }
}

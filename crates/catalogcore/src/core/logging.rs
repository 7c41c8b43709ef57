//! Logging initialization and startup diagnostics
//!
//! This module provides:
//! - Logger initialization (console + file)
//! - A startup summary of the effective configuration

use anyhow::Result;
use simplelog::*;

use crate::core::config;

/// Initialize logger for both console and file output
///
/// # Arguments
/// * `log_file_path` - Path to the log file (truncated on start)
///
/// # Returns
/// * `Ok(())` - Logger initialized successfully
/// * `Err(anyhow::Error)` - Failed to create the file or a logger is already installed
pub fn init_logger(log_file_path: &str) -> Result<()> {
    let log_file =
        fs_err::File::create(log_file_path).map_err(|e| anyhow::anyhow!("Failed to create log file: {}", e))?;

    CombinedLogger::init(vec![
        TermLogger::new(
            LevelFilter::Info,
            Config::default(),
            TerminalMode::Mixed,
            ColorChoice::Auto,
        ),
        WriteLogger::new(LevelFilter::Info, Config::default(), log_file),
    ])
    .map_err(|e| anyhow::anyhow!("Failed to initialize logger: {}", e))?;

    Ok(())
}

/// Logs the effective configuration at application startup
///
/// The token itself is never printed, only whether one is present.
pub fn log_startup_configuration() {
    log::info!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    log::info!("Catalog bot configuration");
    log::info!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    log::info!("CATALOG_FILE: {}", config::CATALOG_FILE.as_str());
    log::info!("LOG_FILE_PATH: {}", config::LOG_FILE_PATH.as_str());

    if config::BOT_TOKEN.is_some() {
        log::info!("BOT_TOKEN: set");
    } else {
        log::error!("BOT_TOKEN: not set (also checked TELOXIDE_TOKEN)");
    }

    if let Some(url) = config::BOT_API_URL.as_deref() {
        log::info!("BOT_API_URL: {}", url);
    }

    if config::admin::ADMIN_IDS.is_empty() {
        log::info!("ADMIN_IDS: none, chat owners and administrators may remove products");
    } else {
        log::info!("ADMIN_IDS: {:?}", *config::admin::ADMIN_IDS);
    }

    match config::admin::MODERATOR_TITLE.as_deref() {
        Some(title) => log::info!("MODERATOR_TITLE: {} (administrators need this title to remove)", title),
        None => log::info!("MODERATOR_TITLE: not set"),
    }
}

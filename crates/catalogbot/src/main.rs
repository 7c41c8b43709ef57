use anyhow::Result;
use dotenvy::dotenv;
use std::path::PathBuf;
use teloxide::error_handlers::LoggingErrorHandler;
use teloxide::prelude::*;

use catalogbot::cli::{Cli, Commands};
use catalogbot::telegram::{create_bot, schema, setup_bot_commands, HandlerDeps, PermissionPolicy};
use catalogcore::core::{init_logger, logging::log_startup_configuration};
use catalogcore::{config, CatalogService, CatalogStore};

/// Main entry point for the catalog bot
///
/// Parses CLI arguments and dispatches to appropriate subcommand.
///
/// # Errors
/// Returns an error if initialization fails (logging, token, Bot API login)
/// or if `check-storage` finds an unusable catalog file.
#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env before any config is read
    let _ = dotenv();

    let cli = Cli::parse_args();

    // Initialize logger (console + file)
    init_logger(&config::LOG_FILE_PATH)?;

    match cli.command {
        Some(Commands::CheckStorage { file }) => run_check_storage(file).await,
        Some(Commands::Run) | None => run_bot().await,
    }
}

/// Every update goes to the same queue, so commands are handled one at a time
fn single_queue(_: &Update) -> Option<()> {
    Some(())
}

/// Loads the catalog, logs in to the Bot API and serves until Ctrl+C
async fn run_bot() -> Result<()> {
    log_startup_configuration();

    let store = CatalogStore::new(config::CATALOG_FILE.as_str());
    store.check_access();
    let service = CatalogService::open(store).await;

    let bot = create_bot().inspect_err(|e| log::error!("Failed to create bot: {}", e))?;

    let me = match bot.get_me().await {
        Ok(me) => me,
        Err(e) => {
            log::error!("An error occurred while starting the bot: {}", e);
            return Err(anyhow::anyhow!("Failed to log in to the Bot API: {}", e));
        }
    };
    log::info!("Logged in as {} - {}", me.username(), me.id.0);

    if let Err(e) = setup_bot_commands(&bot).await {
        log::warn!("Failed to register bot commands: {}", e);
    }

    let deps = HandlerDeps::new(service, PermissionPolicy::from_config());

    Dispatcher::builder(bot, schema(deps))
        .distribution_function(single_queue)
        .error_handler(LoggingErrorHandler::with_custom_text("An error from the command handler"))
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;

    log::info!("Dispatcher shutdown gracefully");
    Ok(())
}

/// Reports access rights and content of the catalog file
async fn run_check_storage(file: Option<PathBuf>) -> Result<()> {
    let path = file.unwrap_or_else(|| PathBuf::from(config::CATALOG_FILE.as_str()));
    let store = CatalogStore::new(path);

    let access = store.check_access();
    println!(
        "{}: exists={} readable={} writable={}",
        store.path().display(),
        access.exists,
        access.readable,
        access.writable
    );

    let catalog = store
        .load()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to load {}: {}", store.path().display(), e))?;

    if catalog.is_empty() {
        println!("No products stored.");
    }
    for (channel, products) in catalog.channels() {
        println!("chat {}: {} products", channel, products.len());
    }

    Ok(())
}

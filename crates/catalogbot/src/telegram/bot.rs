//! Bot initialization and command definitions
//!
//! This module contains:
//! - Command enum definition and its argument parsers
//! - Bot instance creation
//! - Command registration in the Telegram UI

use reqwest::ClientBuilder;
use secrecy::ExposeSecret;
use teloxide::prelude::*;
use teloxide::utils::command::{BotCommands, ParseError};

use catalogcore::config;

/// Bot commands enum with descriptions
#[derive(BotCommands, Clone, Debug, PartialEq, Eq)]
#[command(rename_rule = "lowercase", description = "These commands are supported:")]
pub enum Command {
    #[command(description = "add a product to this chat: /add <code> <name>", parse_with = parse_add_args)]
    Add(i64, String),
    #[command(description = "remove a product (moderators only): /remove <code>", parse_with = parse_code_arg)]
    Remove(i64),
    #[command(description = "list the products of this chat")]
    List,
    #[command(description = "show the command list")]
    Help,
    #[command(description = "say hello")]
    Greet,
}

/// Parses `<code> <name...>`; the name is the rest of the line and may contain spaces
pub fn parse_add_args(input: String) -> Result<(i64, String), ParseError> {
    let input = input.trim();
    let (code, name) = input
        .split_once(char::is_whitespace)
        .ok_or_else(|| ParseError::Custom("expected a product code followed by a name".into()))?;

    let code = code
        .parse::<i64>()
        .map_err(|e| ParseError::IncorrectFormat(e.into()))?;

    let name = name.trim();
    if name.is_empty() {
        return Err(ParseError::Custom("product name must not be empty".into()));
    }

    Ok((code, name.to_string()))
}

/// Parses a single `<code>`
pub fn parse_code_arg(input: String) -> Result<(i64,), ParseError> {
    let code = input
        .trim()
        .parse::<i64>()
        .map_err(|e| ParseError::IncorrectFormat(e.into()))?;
    Ok((code,))
}

/// Creates a Bot instance with custom or default API URL
///
/// # Returns
/// * `Ok(Bot)` - Successfully created bot instance
/// * `Err(anyhow::Error)` - Token missing, invalid BOT_API_URL, or HTTP client failure
pub fn create_bot() -> anyhow::Result<Bot> {
    let token = config::BOT_TOKEN
        .as_ref()
        .ok_or_else(|| anyhow::anyhow!("BOT_TOKEN environment variable not set"))?;

    let client = ClientBuilder::new().timeout(config::network::timeout()).build()?;
    let bot = Bot::with_client(token.expose_secret(), client);

    // Check if local Bot API server is configured
    let bot = if let Some(bot_api_url) = config::BOT_API_URL.as_deref() {
        log::info!("Using custom Bot API URL: {}", bot_api_url);
        let url = url::Url::parse(bot_api_url).map_err(|e| anyhow::anyhow!("Invalid BOT_API_URL: {}", e))?;
        bot.set_api_url(url)
    } else {
        bot
    };

    Ok(bot)
}

/// Sets up bot commands in Telegram UI
pub async fn setup_bot_commands(bot: &Bot) -> Result<(), teloxide::RequestError> {
    bot.set_my_commands(Command::bot_commands()).await?;
    Ok(())
}

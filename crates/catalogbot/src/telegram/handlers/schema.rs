//! Dispatcher schema and handler chain builders

use teloxide::dispatching::{UpdateFilterExt, UpdateHandler};
use teloxide::prelude::*;
use teloxide::types::{Me, Message};

use catalogcore::reply;

use super::commands::{
    handle_add_command, handle_greet_command, handle_help_command, handle_list_command, handle_remove_command,
    reply_to, user_lang,
};
use super::types::{HandlerDeps, HandlerError};
use crate::telegram::bot::Command;

/// Creates the main dispatcher schema for the Telegram bot.
///
/// # Arguments
/// * `deps` - Handler dependencies (catalog service, permission policy)
///
/// # Returns
/// The complete handler tree for the bot
pub fn schema(deps: HandlerDeps) -> UpdateHandler<HandlerError> {
    dptree::entry()
        // Well-formed commands
        .branch(command_handler(deps))
        // /add and /remove whose arguments did not parse
        .branch(usage_handler())
}

/// Handler for bot commands (/add, /remove, /list, /help, /greet)
fn command_handler(deps: HandlerDeps) -> UpdateHandler<HandlerError> {
    Update::filter_message().branch(dptree::entry().filter_command::<Command>().endpoint(
        move |bot: Bot, msg: Message, cmd: Command| {
            let deps = deps.clone();
            async move {
                log::info!("Received command: {:?} from chat {}", cmd, msg.chat.id);

                match cmd {
                    Command::Add(code, name) => handle_add_command(&bot, &msg, &deps, code, &name).await?,
                    Command::Remove(code) => handle_remove_command(&bot, &msg, &deps, code).await?,
                    Command::List => handle_list_command(&bot, &msg, &deps).await?,
                    Command::Help => handle_help_command(&bot, &msg).await?,
                    Command::Greet => handle_greet_command(&bot, &msg).await?,
                }
                Ok(())
            }
        },
    ))
}

/// Catalog command that arrived with unusable arguments
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UsageKind {
    Add,
    Remove,
}

/// Detects `/add` or `/remove` (optionally `@bot_username`) at the start of `text`.
///
/// Matching is case-sensitive like command parsing, so `/ADD` is not a catalog
/// command at all. Commands addressed to a different bot are ignored.
pub fn usage_kind(text: &str, bot_username: &str) -> Option<UsageKind> {
    let first = text.split_whitespace().next()?;
    let (command, addressee) = match first.split_once('@') {
        Some((command, addressee)) => (command, Some(addressee)),
        None => (first, None),
    };

    if addressee.is_some_and(|name| !name.eq_ignore_ascii_case(bot_username)) {
        return None;
    }

    match command {
        "/add" => Some(UsageKind::Add),
        "/remove" => Some(UsageKind::Remove),
        _ => None,
    }
}

/// Replies with the usage line of a catalog command that failed to parse
fn usage_handler() -> UpdateHandler<HandlerError> {
    Update::filter_message()
        .filter_map(|msg: Message, me: Me| msg.text().and_then(|text| usage_kind(text, me.username())))
        .endpoint(|bot: Bot, msg: Message, kind: UsageKind| async move {
            log::info!("Malformed {:?} command from chat {}", kind, msg.chat.id);

            let lang = user_lang(&msg);
            let text = match kind {
                UsageKind::Add => reply::usage_add(&lang),
                UsageKind::Remove => reply::usage_remove(&lang),
            };
            reply_to(&bot, &msg, text).await
        })
}

//! Command handler implementations (/add, /remove, /list, /help, /greet)

use teloxide::prelude::*;
use teloxide::types::{Message, ParseMode, ReplyParameters, UserId};
use teloxide::utils::html;
use unic_langid::LanguageIdentifier;

use catalogcore::{i18n, reply};

use super::types::{HandlerDeps, HandlerError};

/// Catalog key of the chat the message was sent in
pub(super) fn channel_id(msg: &Message) -> String {
    msg.chat.id.0.to_string()
}

/// Reply language from the sender's Telegram locale
pub(super) fn user_lang(msg: &Message) -> LanguageIdentifier {
    i18n::lang_for_user(msg.from.as_ref().and_then(|u| u.language_code.as_deref()))
}

/// Sends `text` as a reply to `msg`, cut to Telegram's message length
pub(super) async fn reply_to(bot: &Bot, msg: &Message, text: String) -> Result<(), HandlerError> {
    bot.send_message(msg.chat.id, reply::truncate_message(&text))
        .reply_parameters(ReplyParameters::new(msg.id))
        .await?;
    Ok(())
}

/// Mention that notifies the user: `@username`, or a text mention linking to the user id.
///
/// The result is HTML.
pub(super) fn mention_html(user_id: UserId, username: Option<&str>, full_name: &str) -> String {
    match username {
        Some(username) => format!("@{}", html::escape(username)),
        None => html::user_mention(user_id, &html::escape(full_name)),
    }
}

/// Handle /add <code> <name>
pub(super) async fn handle_add_command(
    bot: &Bot,
    msg: &Message,
    deps: &HandlerDeps,
    code: i64,
    name: &str,
) -> Result<(), HandlerError> {
    let lang = user_lang(msg);
    let channel = channel_id(msg);

    let result = deps.catalog.lock().await.add(&channel, code, name).await;
    let text = match result {
        Ok(()) => reply::added(&lang, code, name),
        Err(e) => {
            log::info!("/add rejected in chat {}: {}", channel, e);
            reply::error(&lang, &e)
        }
    };

    reply_to(bot, msg, text).await
}

/// Handle /remove <code>
pub(super) async fn handle_remove_command(
    bot: &Bot,
    msg: &Message,
    deps: &HandlerDeps,
    code: i64,
) -> Result<(), HandlerError> {
    let lang = user_lang(msg);
    let channel = channel_id(msg);

    // Resolved before locking: it may call the Bot API
    let privilege = deps.permissions.resolve(bot, msg).await;

    let result = deps.catalog.lock().await.remove(&channel, code, privilege).await;
    let text = match result {
        Ok(_) => reply::removed(&lang, code),
        Err(e) => reply::error(&lang, &e),
    };

    reply_to(bot, msg, text).await
}

/// Handle /list
pub(super) async fn handle_list_command(bot: &Bot, msg: &Message, deps: &HandlerDeps) -> Result<(), HandlerError> {
    let lang = user_lang(msg);
    let products = deps.catalog.lock().await.list(&channel_id(msg));

    reply_to(bot, msg, reply::product_list(&lang, &products)).await
}

/// Handle /help
pub(super) async fn handle_help_command(bot: &Bot, msg: &Message) -> Result<(), HandlerError> {
    reply_to(bot, msg, reply::help(&user_lang(msg))).await
}

/// Handle /greet
pub(super) async fn handle_greet_command(bot: &Bot, msg: &Message) -> Result<(), HandlerError> {
    let user = msg
        .from
        .as_ref()
        .map(|u| mention_html(u.id, u.username.as_deref(), &u.full_name()))
        .unwrap_or_default();

    bot.send_message(msg.chat.id, reply::greeting(&user_lang(msg), &user))
        .parse_mode(ParseMode::Html)
        .reply_parameters(ReplyParameters::new(msg.id))
        .await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_mention_prefers_username() {
        assert_eq!(mention_html(UserId(42), Some("ana_b"), "Ana B"), "@ana_b");
    }

    #[test]
    fn test_mention_without_username_links_user_id() {
        let mention = mention_html(UserId(42), None, "Ana <B> & Co");

        assert!(mention.starts_with(r#"<a href="tg://user"#), "{mention}");
        assert!(mention.contains("id=42"), "{mention}");
        assert!(mention.ends_with(">Ana &lt;B&gt; &amp; Co</a>"), "{mention}");
    }
}

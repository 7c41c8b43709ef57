//! Who holds the elevated role needed by /remove
//!
//! Resolution order, first match wins:
//! 1. user id listed in `ADMIN_IDS`
//! 2. private chat with the bot
//! 3. message sent on behalf of the chat itself (anonymous group administrators)
//! 4. chat owner
//! 5. chat administrator, and when `MODERATOR_TITLE` is set, only one carrying that custom title
//!
//! Everybody else, including users whose membership could not be fetched, is regular.

use teloxide::prelude::*;
use teloxide::types::{ChatMemberKind, Message};

use catalogcore::{config, Privilege};

/// Membership status as far as permissions are concerned
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemberRole<'a> {
    Owner,
    Administrator { custom_title: Option<&'a str> },
    Other,
}

impl<'a> MemberRole<'a> {
    pub fn from_kind(kind: &'a ChatMemberKind) -> Self {
        match kind {
            ChatMemberKind::Owner(_) => MemberRole::Owner,
            ChatMemberKind::Administrator(admin) => MemberRole::Administrator {
                custom_title: admin.custom_title.as_deref(),
            },
            _ => MemberRole::Other,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct PermissionPolicy {
    pub admin_ids: Vec<i64>,
    pub moderator_title: Option<String>,
}

impl PermissionPolicy {
    pub fn from_config() -> Self {
        Self {
            admin_ids: config::admin::ADMIN_IDS.clone(),
            moderator_title: config::admin::MODERATOR_TITLE.clone(),
        }
    }

    /// Decision that needs no Bot API call; `None` means the chat membership decides.
    ///
    /// `sent_as_chat` is set when the message's sender chat is the chat it was posted in,
    /// which Telegram only allows for anonymous administrators.
    pub fn shortcut(&self, user_id: Option<i64>, is_private_chat: bool, sent_as_chat: bool) -> Option<Privilege> {
        if user_id.is_some_and(|id| self.admin_ids.contains(&id)) || is_private_chat || sent_as_chat {
            return Some(Privilege::Elevated);
        }
        None
    }

    pub fn privilege_for_role(&self, role: MemberRole<'_>) -> Privilege {
        match role {
            MemberRole::Owner => Privilege::Elevated,
            MemberRole::Administrator { custom_title } => match self.moderator_title.as_deref() {
                None => Privilege::Elevated,
                Some(required) if custom_title.is_some_and(|title| title.trim().eq_ignore_ascii_case(required)) => {
                    Privilege::Elevated
                }
                Some(_) => Privilege::Regular,
            },
            MemberRole::Other => Privilege::Regular,
        }
    }

    /// Resolves the privilege of the sender of `msg` in its chat
    pub async fn resolve(&self, bot: &Bot, msg: &Message) -> Privilege {
        let user_id = msg.from.as_ref().and_then(|user| i64::try_from(user.id.0).ok());
        let sent_as_chat = msg.sender_chat.as_ref().is_some_and(|chat| chat.id == msg.chat.id);

        if let Some(privilege) = self.shortcut(user_id, msg.chat.is_private(), sent_as_chat) {
            return privilege;
        }

        let Some(user) = msg.from.as_ref() else {
            return Privilege::Regular;
        };

        match bot.get_chat_member(msg.chat.id, user.id).await {
            Ok(member) => self.privilege_for_role(MemberRole::from_kind(&member.kind)),
            Err(e) => {
                log::warn!(
                    "Failed to fetch membership of user {} in chat {}: {}",
                    user.id,
                    msg.chat.id,
                    e
                );
                Privilege::Regular
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use teloxide::types::ChatMember;

    fn policy(admin_ids: &[i64], title: Option<&str>) -> PermissionPolicy {
        PermissionPolicy {
            admin_ids: admin_ids.to_vec(),
            moderator_title: title.map(str::to_string),
        }
    }

    #[test]
    fn test_configured_admin_is_elevated_anywhere() {
        assert_eq!(policy(&[42], None).shortcut(Some(42), false, false), Some(Privilege::Elevated));
    }

    #[test]
    fn test_private_chat_is_elevated() {
        assert_eq!(policy(&[], None).shortcut(Some(7), true, false), Some(Privilege::Elevated));
    }

    #[test]
    fn test_anonymous_admin_posting_as_group_is_elevated() {
        // GroupAnonymousBot is the `from` user of such messages
        assert_eq!(
            policy(&[], None).shortcut(Some(1087968824), false, true),
            Some(Privilege::Elevated)
        );
    }

    #[test]
    fn test_group_member_needs_membership_lookup() {
        assert_eq!(policy(&[42], None).shortcut(Some(7), false, false), None);
        assert_eq!(policy(&[42], None).shortcut(None, false, false), None);
    }

    fn chat_member(status: serde_json::Value) -> ChatMember {
        let mut json = serde_json::json!({
            "user": { "id": 5001, "is_bot": false, "first_name": "Ana" }
        });
        if let (Some(target), Some(fields)) = (json.as_object_mut(), status.as_object()) {
            target.extend(fields.clone());
        }
        serde_json::from_value(json).unwrap()
    }

    #[test]
    fn test_owner_from_bot_api_is_elevated() {
        let member = chat_member(serde_json::json!({ "status": "creator", "is_anonymous": false }));

        let role = MemberRole::from_kind(&member.kind);
        assert_eq!(role, MemberRole::Owner);
        assert_eq!(policy(&[], Some("Moderador")).privilege_for_role(role), Privilege::Elevated);
    }

    #[test]
    fn test_titled_administrator_from_bot_api() {
        let member = chat_member(serde_json::json!({
            "status": "administrator",
            "custom_title": "Moderador",
            "can_be_edited": false,
            "is_anonymous": false,
            "can_manage_chat": true,
            "can_delete_messages": true,
            "can_manage_video_chats": false,
            "can_restrict_members": true,
            "can_promote_members": false,
            "can_change_info": false,
            "can_invite_users": true,
            "can_post_stories": false,
            "can_edit_stories": false,
            "can_delete_stories": false,
            "can_post_messages": false,
            "can_edit_messages": false,
            "can_pin_messages": true,
            "can_manage_topics": false
        }));

        let role = MemberRole::from_kind(&member.kind);
        assert_eq!(
            role,
            MemberRole::Administrator {
                custom_title: Some("Moderador")
            }
        );
        assert_eq!(policy(&[], Some("moderador")).privilege_for_role(role), Privilege::Elevated);
        assert_eq!(policy(&[], Some("Helper")).privilege_for_role(role), Privilege::Regular);
    }

    #[test]
    fn test_user_who_left_is_regular() {
        let member = chat_member(serde_json::json!({ "status": "left" }));

        let role = MemberRole::from_kind(&member.kind);
        assert_eq!(role, MemberRole::Other);
        assert_eq!(policy(&[], None).privilege_for_role(role), Privilege::Regular);
    }

    #[test]
    fn test_owner_is_elevated_even_with_title_requirement() {
        assert_eq!(
            policy(&[], Some("Moderador")).privilege_for_role(MemberRole::Owner),
            Privilege::Elevated
        );
    }

    #[test]
    fn test_any_administrator_without_title_requirement() {
        let role = MemberRole::Administrator { custom_title: None };
        assert_eq!(policy(&[], None).privilege_for_role(role), Privilege::Elevated);
    }

    #[test]
    fn test_administrator_title_must_match() {
        let policy = policy(&[], Some("Moderador"));

        let matching = MemberRole::Administrator {
            custom_title: Some("moderador"),
        };
        let other = MemberRole::Administrator {
            custom_title: Some("Helper"),
        };
        let untitled = MemberRole::Administrator { custom_title: None };

        assert_eq!(policy.privilege_for_role(matching), Privilege::Elevated);
        assert_eq!(policy.privilege_for_role(other), Privilege::Regular);
        assert_eq!(policy.privilege_for_role(untitled), Privilege::Regular);
    }

    #[test]
    fn test_plain_member_is_regular() {
        assert_eq!(policy(&[], None).privilege_for_role(MemberRole::Other), Privilege::Regular);
    }
}

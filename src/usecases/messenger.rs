//! Outbound chat notifications addressed by username.
//!
//! The Bot API only sends to numeric chat ids, so the id is looked up in the
//! current `getUpdates` snapshot on every call. Users who have not written to
//! the bot within Telegram's update window cannot be reached this way.

use crate::domain::{DomainError, Update};
use crate::ports::BotApiPort;
use serde::Deserialize;
use std::sync::Arc;
use tracing::{debug, info};

pub struct Messenger {
    api: Arc<dyn BotApiPort>,
}

impl Messenger {
    pub fn new(api: Arc<dyn BotApiPort>) -> Self {
        Self { api }
    }

    /// Resolve `recipient` (with or without a leading `@`) and send `content` verbatim.
    pub async fn send_message(&self, recipient: &str, content: &str) -> Result<(), DomainError> {
        let username = recipient.strip_prefix('@').unwrap_or(recipient);
        let updates = self.api.get_updates().await?;

        let chat_id = find_chat_id(&updates, username)
            .ok_or_else(|| DomainError::RecipientNotFound(username.to_string()))?;

        self.api.send_message(chat_id, content).await?;
        info!(chat_id, recipient = username, "message sent");
        Ok(())
    }
}

/// Chat id of the first update whose `message.chat.username` equals `username`.
/// Updates that do not decode (other update kinds, partial records) are skipped.
pub fn find_chat_id(updates: &[serde_json::Value], username: &str) -> Option<i64> {
    let mut skipped = 0usize;
    let found = updates.iter().find_map(|raw| match Update::deserialize(raw) {
        Ok(update) => {
            let chat = update.message.chat;
            (chat.username.as_deref() == Some(username)).then_some(chat.id)
        }
        Err(_) => {
            skipped += 1;
            None
        }
    });
    debug!(
        total = updates.len(),
        skipped,
        found = found.is_some(),
        "scanned update feed"
    );
    found
}

//! Daily announcement delivery.

use teloxide::prelude::*;
use teloxide::types::{ChatId, MessageId, ThreadId};
use tracing::{info, warn};

/// Sends announcements to the configured chat (and optional sub-thread).
///
/// Announcement failures never propagate: an unconfigured destination is a
/// logged no-op and a failed send is swallowed with a warning, so neither
/// the scheduler nor a refresh is ever blocked on Telegram delivery.
#[derive(Clone)]
pub struct Announcer {
    bot: Bot,
    chat_id: Option<ChatId>,
    thread_id: Option<ThreadId>,
}

impl Announcer {
    /// Creates an announcer for the configured destination.
    pub fn new(bot: Bot, chat_id: Option<i64>, thread_id: Option<i32>) -> Self {
        Self {
            bot,
            chat_id: chat_id.map(ChatId),
            thread_id: thread_id.map(|id| ThreadId(MessageId(id))),
        }
    }

    /// Whether a destination chat is configured.
    pub fn is_configured(&self) -> bool {
        self.chat_id.is_some()
    }

    /// Sends `text` to the configured destination, best-effort.
    pub async fn announce(&self, text: &str) {
        let Some(chat_id) = self.chat_id else {
            warn!("announce_chat_id not configured, announcement not sent");
            return;
        };

        let mut req = self.bot.send_message(chat_id, text);
        if let Some(thread_id) = self.thread_id {
            req = req.message_thread_id(thread_id);
        }

        if let Err(e) = req.await {
            warn!(chat_id = %chat_id, error = %e, "Failed to send announcement");
        } else {
            info!(chat_id = %chat_id, "Announcement sent");
        }
    }
}

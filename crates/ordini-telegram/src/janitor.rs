//! Best-effort message cleanup.

use teloxide::prelude::*;
use teloxide::types::{ChatId, MessageId};
use tracing::{debug, info};

/// Default cap on how many messages one `/clean` may delete.
pub const DEFAULT_PURGE_LIMIT: u32 = 200;

/// Message ids targeted by a purge: the triggering command itself, then
/// `count` messages walking backward. Ids never go below 1.
fn purge_targets(from: i32, count: u32) -> Vec<i32> {
    let first = (from - count as i32).max(1);
    (first..=from).rev().collect()
}

/// Deletes recent messages walking backward from the triggering command.
///
/// Individual delete failures (already deleted, too old, not ours) are
/// skipped silently; the batch never aborts. Returns the number of
/// messages actually deleted.
pub async fn purge_messages(bot: &Bot, chat_id: ChatId, from: MessageId, count: u32) -> u32 {
    let mut deleted = 0;

    for id in purge_targets(from.0, count) {
        match bot.delete_message(chat_id, MessageId(id)).await {
            Ok(_) => deleted += 1,
            Err(e) => {
                debug!(chat_id = %chat_id, message_id = id, error = %e, "Skipping undeletable message");
            }
        }
    }

    info!(chat_id = %chat_id, deleted, "Purge finished");
    deleted
}

/// Removes a non-command message from the monitored chat, best-effort.
///
/// Only commands are allowed in the ordering channel; anything else
/// (chatter, stickers, photos) is deleted to keep the order list readable.
pub async fn delete_chatter(bot: &Bot, msg: &Message) {
    if let Err(e) = bot.delete_message(msg.chat.id, msg.id).await {
        debug!(chat_id = %msg.chat.id, message_id = %msg.id.0, error = %e, "Could not delete non-command message");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_purge_targets_walk_backward_inclusive() {
        // `/clean 5` as message 100 targets 100, 99, ..., 95.
        assert_eq!(purge_targets(100, 5), vec![100, 99, 98, 97, 96, 95]);
    }

    #[test]
    fn test_purge_targets_stop_at_first_message() {
        assert_eq!(purge_targets(3, 10), vec![3, 2, 1]);
    }

    #[test]
    fn test_purge_targets_zero_count() {
        // Just the command message itself.
        assert_eq!(purge_targets(50, 0), vec![50]);
    }
}

//! Conversation summary reconciliation.
//!
//! The summary list is touched by several independent triggers: the initial
//! load, archive toggles, inbound pushes and local sends. Every mutation
//! derives a fresh vector from the previous one so a trigger never edits a
//! stale copy in place.

use layedin_shared::models::{ConversationSummary, Message};
use layedin_shared::types::ConversationId;

/// Flip the archived flag on the matching summary.
pub fn set_archived(
    summaries: &[ConversationSummary],
    id: &ConversationId,
    archived: bool,
) -> Vec<ConversationSummary> {
    summaries
        .iter()
        .map(|s| {
            if s.id == *id {
                ConversationSummary {
                    archived,
                    ..s.clone()
                }
            } else {
                s.clone()
            }
        })
        .collect()
}

/// Update the preview of the conversation both message parties belong to.
pub fn with_preview(
    summaries: &[ConversationSummary],
    message: &Message,
) -> Vec<ConversationSummary> {
    summaries
        .iter()
        .map(|s| {
            if s.involves(&message.sender) && s.involves(&message.receiver) {
                ConversationSummary {
                    last_message: Some(message.clone()),
                    ..s.clone()
                }
            } else {
                s.clone()
            }
        })
        .collect()
}

/// Zero the unread counter. The explicit mark-read action is the only way
/// the counter ever decreases.
pub fn clear_unread(
    summaries: &[ConversationSummary],
    id: &ConversationId,
) -> Vec<ConversationSummary> {
    summaries
        .iter()
        .map(|s| {
            if s.id == *id {
                ConversationSummary {
                    unread_count: 0,
                    ..s.clone()
                }
            } else {
                s.clone()
            }
        })
        .collect()
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{ConversationId, MessageId, UserId};

/// A single chat message as returned by the backend.
///
/// Messages are immutable on the client: edits and deletes go through the
/// backend and the returned record replaces the old one wholesale. The
/// `edited` marker is decided server-side and rendered verbatim.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: MessageId,
    pub sender: UserId,
    pub receiver: UserId,
    pub content: String,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub edited: bool,
}

/// Full transcript fetch result for one peer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Conversation {
    pub peer: UserId,
    pub messages: Vec<Message>,
}

/// List-view aggregate of a conversation: participants, latest message
/// preview, unread counter and archived flag.
///
/// `unread_count` drops to zero only through an explicit mark-read action;
/// it otherwise only grows as inbound messages arrive while the conversation
/// is not the active one.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversationSummary {
    pub id: ConversationId,
    pub participants: [UserId; 2],
    pub last_message: Option<Message>,
    pub unread_count: u32,
    pub archived: bool,
}

impl ConversationSummary {
    /// The participant that is not `me`. Falls back to the first participant
    /// for self-conversations.
    pub fn peer(&self, me: &UserId) -> &UserId {
        if self.participants[0] == *me {
            &self.participants[1]
        } else {
            &self.participants[0]
        }
    }

    pub fn involves(&self, user: &UserId) -> bool {
        self.participants[0] == *user || self.participants[1] == *user
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_peer_resolution() {
        let me = UserId::new();
        let other = UserId::new();
        let summary = ConversationSummary {
            id: ConversationId::new(),
            participants: [me.clone(), other.clone()],
            last_message: None,
            unread_count: 0,
            archived: false,
        };

        assert_eq!(summary.peer(&me), &other);
        assert_eq!(summary.peer(&other), &me);
        assert!(summary.involves(&me));
        assert!(!summary.involves(&UserId::new()));
    }
}

//! The abstract backend collaborator.
//!
//! Persistence, auth and business rules live in an external REST service;
//! the client only ever talks to it through this trait so controllers can
//! be exercised against an in-memory double in tests.

use async_trait::async_trait;

use layedin_shared::models::{Conversation, ConversationSummary, Message};
use layedin_shared::profile::ProfileSnapshot;
use layedin_shared::types::{ConversationId, MessageId, UserId};

use crate::error::Result;

#[async_trait]
pub trait Backend: Send + Sync {
    async fn get_profile(&self, id: &UserId) -> Result<ProfileSnapshot>;

    /// Persist a full profile snapshot. Returns the stored snapshot; the
    /// backend is last-writer-wins, no merge is attempted.
    async fn update_profile(
        &self,
        id: &UserId,
        profile: &ProfileSnapshot,
    ) -> Result<ProfileSnapshot>;

    /// Fetch the full transcript for one peer, in the order the backend
    /// delivers it.
    async fn get_conversation(&self, peer: &UserId) -> Result<Conversation>;

    /// Send a message. The returned [`Message`] carries the server-assigned
    /// id and timestamp and is the only copy the client appends.
    async fn send_message(&self, receiver: &UserId, content: &str) -> Result<Message>;

    /// Replace a message's content. The `edited` flag on the returned
    /// message is decided by the server and rendered verbatim.
    async fn edit_message(&self, id: &MessageId, content: &str) -> Result<Message>;

    async fn delete_message(&self, id: &MessageId) -> Result<()>;

    async fn list_conversations(&self) -> Result<Vec<ConversationSummary>>;

    async fn archive_conversation(&self, id: &ConversationId) -> Result<()>;

    async fn unarchive_conversation(&self, id: &ConversationId) -> Result<()>;
}

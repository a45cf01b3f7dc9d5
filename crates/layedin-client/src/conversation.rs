//! Transcript and summary-list synchronisation for the messaging page.
//!
//! Three arrival paths feed one open conversation: the initial full fetch,
//! the authoritative echo of a local send, and push events from the peer.
//! The controller merges them into a single duplicate-free transcript and
//! keeps the conversation summaries consistent with the same events.
//!
//! Messages are appended in arrival order and never re-sorted; a push that
//! arrives out of timestamp order lands where it arrives.

use std::sync::Arc;

use tracing::{debug, info, warn};

use layedin_api::backend::Backend;
use layedin_api::error::{ApiError, Result};
use layedin_api::push::PushTransport;
use layedin_api::session::Session;
use layedin_shared::constants::MAX_MESSAGE_LEN;
use layedin_shared::models::{ConversationSummary, Message};
use layedin_shared::types::{ConversationId, MessageId, UserId};

use crate::summaries;

/// Lifecycle of the one conversation that can be on screen.
#[derive(Debug)]
pub enum ConversationState {
    /// No transcript loaded.
    Closed,
    /// Full-transcript fetch in flight.
    Loading,
    /// Transcript loaded; sends and pushes are accepted.
    Open {
        peer: UserId,
        messages: Vec<Message>,
    },
}

pub struct ConversationController<B, P> {
    backend: Arc<B>,
    transport: Arc<P>,
    session: Session,
    state: ConversationState,
    summaries: Vec<ConversationSummary>,
}

impl<B: Backend, P: PushTransport> ConversationController<B, P> {
    pub fn new(backend: Arc<B>, transport: Arc<P>, session: Session) -> Self {
        Self {
            backend,
            transport,
            session,
            state: ConversationState::Closed,
            summaries: Vec::new(),
        }
    }

    pub fn state(&self) -> &ConversationState {
        &self.state
    }

    /// Transcript of the open conversation, empty otherwise.
    pub fn messages(&self) -> &[Message] {
        match &self.state {
            ConversationState::Open { messages, .. } => messages,
            _ => &[],
        }
    }

    pub fn summaries(&self) -> &[ConversationSummary] {
        &self.summaries
    }

    /// Select a peer and load the full transcript.
    ///
    /// On a failed fetch the error is returned and the controller drops back
    /// to `Closed`; a missing conversation is terminal for this attempt.
    pub async fn open(&mut self, peer: &UserId) -> Result<()> {
        self.state = ConversationState::Loading;
        match self.backend.get_conversation(peer).await {
            Ok(conversation) => {
                info!(peer = %conversation.peer, count = conversation.messages.len(), "Conversation opened");
                self.state = ConversationState::Open {
                    peer: conversation.peer,
                    messages: conversation.messages,
                };
                Ok(())
            }
            Err(e) => {
                warn!(peer = %peer, error = %e, "Failed to load conversation");
                self.state = ConversationState::Closed;
                Err(e)
            }
        }
    }

    pub fn close(&mut self) {
        self.state = ConversationState::Closed;
    }

    /// Send a message to the open peer.
    ///
    /// Empty or whitespace-only text is rejected before any network call.
    /// On success the server-assigned [`Message`] is appended to the
    /// transcript tail and handed to the push transport for delivery; on
    /// failure nothing is inserted, so a retry cannot produce a ghost entry.
    pub async fn send_message(&mut self, text: &str) -> Result<Message> {
        let ConversationState::Open { peer, .. } = &self.state else {
            return Err(ApiError::Validation("no open conversation"));
        };
        if text.trim().is_empty() {
            return Err(ApiError::Validation("message content is empty"));
        }
        if text.chars().count() > MAX_MESSAGE_LEN {
            return Err(ApiError::Validation("message content is too long"));
        }

        let peer = peer.clone();
        let message = self.backend.send_message(&peer, text).await?;

        self.append_if_new(message.clone());
        self.summaries = summaries::with_preview(&self.summaries, &message);

        if let Err(e) = self.transport.forward(&message).await {
            warn!(msg_id = %message.id, error = %e, "Failed to forward message to transport");
        }

        info!(msg_id = %message.id, receiver = %peer, "Message sent");
        Ok(message)
    }

    /// Handle an inbound push event.
    ///
    /// Appends to the transcript when the message belongs to the open
    /// conversation, suppressing ids already present (the echo of a local
    /// send arrives this way). The summary list is refreshed from the
    /// backend regardless of which conversation the message belongs to.
    pub async fn on_push_message(&mut self, message: Message) {
        let inbound = message.receiver == self.session.user_id;
        debug!(msg_id = %message.id, sender = %message.sender, inbound, "Push message received");

        if let ConversationState::Open { peer, .. } = &self.state {
            if message.sender == *peer || message.receiver == *peer {
                self.append_if_new(message);
            }
        }

        if let Err(e) = self.refresh_summaries().await {
            warn!(error = %e, "Failed to refresh conversation summaries");
        }
    }

    /// Replace a message's content in place. The updated record keeps its
    /// transcript position and its `edited` flag comes from the server
    /// untouched.
    pub async fn edit_message(&mut self, id: &MessageId, text: &str) -> Result<Message> {
        if text.trim().is_empty() {
            return Err(ApiError::Validation("edited content is empty"));
        }
        if text.chars().count() > MAX_MESSAGE_LEN {
            return Err(ApiError::Validation("edited content is too long"));
        }

        let updated = self.backend.edit_message(id, text).await?;
        if let ConversationState::Open { messages, .. } = &mut self.state {
            if let Some(slot) = messages.iter_mut().find(|m| m.id == *id) {
                *slot = updated.clone();
            }
        }
        Ok(updated)
    }

    /// Delete a message and drop it from the transcript by id. Neighbouring
    /// entries keep their order.
    pub async fn delete_message(&mut self, id: &MessageId) -> Result<()> {
        self.backend.delete_message(id).await?;
        if let ConversationState::Open { messages, .. } = &mut self.state {
            messages.retain(|m| m.id != *id);
        }
        info!(msg_id = %id, "Message deleted");
        Ok(())
    }

    pub async fn archive(&mut self, id: &ConversationId) -> Result<()> {
        self.set_archived(id, true).await
    }

    pub async fn unarchive(&mut self, id: &ConversationId) -> Result<()> {
        self.set_archived(id, false).await
    }

    /// Flip the archived flag optimistically, then confirm with the backend.
    /// A rejected confirmation reverts the flip and returns the error.
    async fn set_archived(&mut self, id: &ConversationId, archived: bool) -> Result<()> {
        self.summaries = summaries::set_archived(&self.summaries, id, archived);

        let result = if archived {
            self.backend.archive_conversation(id).await
        } else {
            self.backend.unarchive_conversation(id).await
        };

        if let Err(e) = result {
            self.summaries = summaries::set_archived(&self.summaries, id, !archived);
            warn!(conversation = %id, error = %e, "Archive change rejected, flip reverted");
            return Err(e);
        }
        Ok(())
    }

    /// Mark a conversation read, zeroing its unread counter.
    pub fn mark_read(&mut self, id: &ConversationId) {
        self.summaries = summaries::clear_unread(&self.summaries, id);
    }

    /// Replace the summary list wholesale from the backend.
    pub async fn refresh_summaries(&mut self) -> Result<()> {
        let fresh = self.backend.list_conversations().await?;
        self.summaries = fresh;
        Ok(())
    }

    fn append_if_new(&mut self, message: Message) {
        let ConversationState::Open { messages, .. } = &mut self.state else {
            return;
        };
        if messages.iter().any(|m| m.id == message.id) {
            debug!(msg_id = %message.id, "Duplicate message suppressed");
            return;
        }
        messages.push(message);
    }
}

//! In-memory backend double for controller tests.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;

use layedin_api::backend::Backend;
use layedin_api::error::{ApiError, Result};
use layedin_shared::models::{Conversation, ConversationSummary, Message};
use layedin_shared::profile::ProfileSnapshot;
use layedin_shared::types::{ConversationId, MessageId, UserId};

pub(crate) struct MockBackend {
    pub me: UserId,
    pub peer: UserId,

    pub profile_updates: Mutex<Vec<ProfileSnapshot>>,
    pub fail_profile_updates: AtomicBool,

    pub transcript: Mutex<Vec<Message>>,
    pub conversation_missing: AtomicBool,

    pub sent: Mutex<Vec<(UserId, String)>>,
    pub fail_send: AtomicBool,

    pub summaries: Mutex<Vec<ConversationSummary>>,
    pub fail_archive: AtomicBool,
    pub archive_calls: Mutex<Vec<(ConversationId, bool)>>,

    pub deleted: Mutex<Vec<MessageId>>,
}

impl MockBackend {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            me: UserId::new(),
            peer: UserId::new(),
            profile_updates: Mutex::new(Vec::new()),
            fail_profile_updates: AtomicBool::new(false),
            transcript: Mutex::new(Vec::new()),
            conversation_missing: AtomicBool::new(false),
            sent: Mutex::new(Vec::new()),
            fail_send: AtomicBool::new(false),
            summaries: Mutex::new(Vec::new()),
            fail_archive: AtomicBool::new(false),
            archive_calls: Mutex::new(Vec::new()),
            deleted: Mutex::new(Vec::new()),
        })
    }

    pub fn message_from_peer(&self, content: &str) -> Message {
        Message {
            id: MessageId::new(),
            sender: self.peer.clone(),
            receiver: self.me.clone(),
            content: content.into(),
            created_at: Utc::now(),
            edited: false,
        }
    }

    pub fn message_to_peer(&self, content: &str) -> Message {
        Message {
            id: MessageId::new(),
            sender: self.me.clone(),
            receiver: self.peer.clone(),
            content: content.into(),
            created_at: Utc::now(),
            edited: false,
        }
    }

    pub fn summary_with_peer(&self, other: &UserId, unread: u32) -> ConversationSummary {
        ConversationSummary {
            id: ConversationId::new(),
            participants: [self.me.clone(), other.clone()],
            last_message: None,
            unread_count: unread,
            archived: false,
        }
    }

    pub fn update_call_count(&self) -> usize {
        self.profile_updates.lock().unwrap().len()
    }
}

#[async_trait]
impl Backend for MockBackend {
    async fn get_profile(&self, _id: &UserId) -> Result<ProfileSnapshot> {
        Ok(ProfileSnapshot::default())
    }

    async fn update_profile(
        &self,
        _id: &UserId,
        profile: &ProfileSnapshot,
    ) -> Result<ProfileSnapshot> {
        self.profile_updates.lock().unwrap().push(profile.clone());
        if self.fail_profile_updates.load(Ordering::SeqCst) {
            return Err(ApiError::Api { status: 500 });
        }
        Ok(profile.clone())
    }

    async fn get_conversation(&self, _peer: &UserId) -> Result<Conversation> {
        if self.conversation_missing.load(Ordering::SeqCst) {
            return Err(ApiError::NotFound);
        }
        Ok(Conversation {
            peer: self.peer.clone(),
            messages: self.transcript.lock().unwrap().clone(),
        })
    }

    async fn send_message(&self, receiver: &UserId, content: &str) -> Result<Message> {
        if self.fail_send.load(Ordering::SeqCst) {
            return Err(ApiError::Api { status: 500 });
        }
        self.sent
            .lock()
            .unwrap()
            .push((receiver.clone(), content.to_string()));
        Ok(Message {
            id: MessageId::new(),
            sender: self.me.clone(),
            receiver: receiver.clone(),
            content: content.into(),
            created_at: Utc::now(),
            edited: false,
        })
    }

    async fn edit_message(&self, id: &MessageId, content: &str) -> Result<Message> {
        let transcript = self.transcript.lock().unwrap();
        let found = transcript
            .iter()
            .find(|m| m.id == *id)
            .cloned()
            .ok_or(ApiError::NotFound)?;
        Ok(Message {
            content: content.into(),
            edited: true,
            ..found
        })
    }

    async fn delete_message(&self, id: &MessageId) -> Result<()> {
        self.deleted.lock().unwrap().push(id.clone());
        Ok(())
    }

    async fn list_conversations(&self) -> Result<Vec<ConversationSummary>> {
        Ok(self.summaries.lock().unwrap().clone())
    }

    async fn archive_conversation(&self, id: &ConversationId) -> Result<()> {
        self.archive_calls.lock().unwrap().push((id.clone(), true));
        if self.fail_archive.load(Ordering::SeqCst) {
            return Err(ApiError::Api { status: 500 });
        }
        Ok(())
    }

    async fn unarchive_conversation(&self, id: &ConversationId) -> Result<()> {
        self.archive_calls.lock().unwrap().push((id.clone(), false));
        if self.fail_archive.load(Ordering::SeqCst) {
            return Err(ApiError::Api { status: 500 });
        }
        Ok(())
    }
}

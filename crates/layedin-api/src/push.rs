//! Server-initiated message delivery, out of band from HTTP.
//!
//! A [`PushSubscription`] is an owned handle: dropping it unregisters the
//! subscriber on every exit path (conversation change, logout, teardown),
//! so no handler can keep delivering into a stale conversation.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::mpsc;
use tracing::debug;

use layedin_shared::constants::PUSH_CHANNEL_CAPACITY;
use layedin_shared::models::Message;
use layedin_shared::types::UserId;

use crate::error::{ApiError, Result};

type Registry = Arc<Mutex<HashMap<UserId, mpsc::Sender<Message>>>>;

#[async_trait]
pub trait PushTransport: Send + Sync {
    /// Register for inbound messages addressed to `user`.
    async fn subscribe(&self, user: &UserId) -> Result<PushSubscription>;

    /// Hand a just-sent message to the transport for delivery to its
    /// receiver. A receiver without a live subscription is not an error.
    async fn forward(&self, message: &Message) -> Result<()>;
}

/// Receiving half of a push subscription.
pub struct PushSubscription {
    rx: mpsc::Receiver<Message>,
    _guard: SubscriptionGuard,
}

impl PushSubscription {
    /// Next inbound message, or `None` once the transport is gone.
    pub async fn recv(&mut self) -> Option<Message> {
        self.rx.recv().await
    }
}

struct SubscriptionGuard {
    user: UserId,
    registry: Registry,
}

impl Drop for SubscriptionGuard {
    fn drop(&mut self) {
        if let Ok(mut subs) = self.registry.lock() {
            subs.remove(&self.user);
        }
        debug!(user = %self.user, "Push subscription dropped");
    }
}

/// In-process transport over tokio channels.
///
/// The production socket server is an external collaborator; this
/// implementation backs local wiring and tests with the same subscribe /
/// forward contract.
#[derive(Clone, Default)]
pub struct ChannelPushTransport {
    registry: Registry,
}

impl ChannelPushTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_subscribed(&self, user: &UserId) -> bool {
        self.registry
            .lock()
            .map(|subs| subs.contains_key(user))
            .unwrap_or(false)
    }
}

#[async_trait]
impl PushTransport for ChannelPushTransport {
    async fn subscribe(&self, user: &UserId) -> Result<PushSubscription> {
        let (tx, rx) = mpsc::channel(PUSH_CHANNEL_CAPACITY);
        self.registry
            .lock()
            .map_err(|_| ApiError::ChannelClosed)?
            .insert(user.clone(), tx);
        debug!(user = %user, "Push subscription registered");
        Ok(PushSubscription {
            rx,
            _guard: SubscriptionGuard {
                user: user.clone(),
                registry: Arc::clone(&self.registry),
            },
        })
    }

    async fn forward(&self, message: &Message) -> Result<()> {
        // Clone the sender out of the lock; never hold it across the await.
        let tx = self
            .registry
            .lock()
            .map_err(|_| ApiError::ChannelClosed)?
            .get(&message.receiver)
            .cloned();

        match tx {
            Some(tx) => tx
                .send(message.clone())
                .await
                .map_err(|_| ApiError::ChannelClosed),
            None => {
                debug!(receiver = %message.receiver, "No live subscription for receiver");
                Ok(())
            }
        }
    }
}

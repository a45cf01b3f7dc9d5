//! reqwest implementation of [`Backend`] against the LayedIn REST API.

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Serialize;
use tracing::debug;

use layedin_shared::models::{Conversation, ConversationSummary, Message};
use layedin_shared::profile::ProfileSnapshot;
use layedin_shared::types::{ConversationId, MessageId, UserId};

use crate::backend::Backend;
use crate::error::{ApiError, Result};
use crate::session::Session;

pub struct RestBackend {
    http: reqwest::Client,
    session: Session,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SendMessageRequest<'a> {
    receiver_id: &'a UserId,
    content: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct EditMessageRequest<'a> {
    content: &'a str,
}

impl RestBackend {
    pub fn new(session: Session) -> Self {
        Self {
            http: reqwest::Client::new(),
            session,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.session.base_url())
    }

    fn check(resp: reqwest::Response) -> Result<reqwest::Response> {
        match resp.status() {
            s if s.is_success() => Ok(resp),
            StatusCode::NOT_FOUND => Err(ApiError::NotFound),
            s => Err(ApiError::Api { status: s.as_u16() }),
        }
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, path: &str) -> Result<T> {
        let resp = self
            .http
            .get(self.url(path))
            .bearer_auth(&self.session.auth_token)
            .send()
            .await?;
        Ok(Self::check(resp)?.json().await?)
    }
}

#[async_trait]
impl Backend for RestBackend {
    async fn get_profile(&self, id: &UserId) -> Result<ProfileSnapshot> {
        self.get_json(&format!("/profiles/{id}")).await
    }

    async fn update_profile(
        &self,
        id: &UserId,
        profile: &ProfileSnapshot,
    ) -> Result<ProfileSnapshot> {
        let resp = self
            .http
            .put(self.url(&format!("/profiles/{id}")))
            .bearer_auth(&self.session.auth_token)
            .json(profile)
            .send()
            .await?;
        Ok(Self::check(resp)?.json().await?)
    }

    async fn get_conversation(&self, peer: &UserId) -> Result<Conversation> {
        debug!(peer = %peer, "Fetching conversation transcript");
        self.get_json(&format!("/conversations/{peer}")).await
    }

    async fn send_message(&self, receiver: &UserId, content: &str) -> Result<Message> {
        let resp = self
            .http
            .post(self.url("/messages"))
            .bearer_auth(&self.session.auth_token)
            .json(&SendMessageRequest {
                receiver_id: receiver,
                content,
            })
            .send()
            .await?;
        Ok(Self::check(resp)?.json().await?)
    }

    async fn edit_message(&self, id: &MessageId, content: &str) -> Result<Message> {
        let resp = self
            .http
            .put(self.url(&format!("/messages/{id}")))
            .bearer_auth(&self.session.auth_token)
            .json(&EditMessageRequest { content })
            .send()
            .await?;
        Ok(Self::check(resp)?.json().await?)
    }

    async fn delete_message(&self, id: &MessageId) -> Result<()> {
        let resp = self
            .http
            .delete(self.url(&format!("/messages/{id}")))
            .bearer_auth(&self.session.auth_token)
            .send()
            .await?;
        Self::check(resp)?;
        Ok(())
    }

    async fn list_conversations(&self) -> Result<Vec<ConversationSummary>> {
        self.get_json("/conversations").await
    }

    async fn archive_conversation(&self, id: &ConversationId) -> Result<()> {
        let resp = self
            .http
            .post(self.url(&format!("/conversations/{id}/archive")))
            .bearer_auth(&self.session.auth_token)
            .send()
            .await?;
        Self::check(resp)?;
        Ok(())
    }

    async fn unarchive_conversation(&self, id: &ConversationId) -> Result<()> {
        let resp = self
            .http
            .post(self.url(&format!("/conversations/{id}/unarchive")))
            .bearer_auth(&self.session.auth_token)
            .send()
            .await?;
        Self::check(resp)?;
        Ok(())
    }
}

//! Explicit per-login session context.
//!
//! Controllers receive a [`Session`] at construction instead of reaching
//! into ambient global state. It is created on login and dropped on logout,
//! which bounds the lifetime of everything built from it.

use layedin_shared::types::UserId;

#[derive(Debug, Clone)]
pub struct Session {
    /// The authenticated user.
    pub user_id: UserId,

    /// Bearer token presented on every REST call.
    pub auth_token: String,

    /// Base URL of the backend REST API.
    pub server_url: String,
}

impl Session {
    pub fn new(
        user_id: UserId,
        auth_token: impl Into<String>,
        server_url: impl Into<String>,
    ) -> Self {
        Self {
            user_id,
            auth_token: auth_token.into(),
            server_url: server_url.into(),
        }
    }

    /// Base URL without a trailing slash, ready for path concatenation.
    pub fn base_url(&self) -> &str {
        self.server_url.trim_end_matches('/')
    }
}

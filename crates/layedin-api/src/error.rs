use thiserror::Error;

pub type Result<T> = std::result::Result<T, ApiError>;

#[derive(Error, Debug)]
pub enum ApiError {
    /// Rejected locally before any network call.
    #[error("validation failed: {0}")]
    Validation(&'static str),

    /// The requested profile or conversation no longer exists.
    #[error("resource not found")]
    NotFound,

    /// Transport-level failure (DNS, connect, timeout, body decode).
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The server answered with a non-success status other than 404.
    #[error("server rejected the request with status {status}")]
    Api { status: u16 },

    /// The push subscription or a controller channel was torn down.
    #[error("channel closed")]
    ChannelClosed,

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ApiError {
    /// Whether a retry on the next quiescence cycle is worthwhile.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Network(_) | Self::Api { status: 500..=599 })
    }
}

/// Application name
pub const APP_NAME: &str = "LayedIn";

/// Quiescence delay after the last profile edit before an automatic save fires
pub const AUTOSAVE_QUIESCENCE_MS: u64 = 2000;

/// Depth of the autosave command channel between UI handlers and the driver task
pub const AUTOSAVE_CHANNEL_CAPACITY: usize = 16;

/// Depth of a push subscription's inbound message channel
pub const PUSH_CHANNEL_CAPACITY: usize = 64;

/// Maximum accepted message length in characters
pub const MAX_MESSAGE_LEN: usize = 4000;

/// Default REST API base URL for local development
pub const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:8080";

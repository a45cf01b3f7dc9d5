pub mod backend;
pub mod error;
pub mod push;
pub mod rest;
pub mod session;

pub use backend::Backend;
pub use error::{ApiError, Result};
pub use push::{ChannelPushTransport, PushSubscription, PushTransport};
pub use rest::RestBackend;
pub use session::Session;

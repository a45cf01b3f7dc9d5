pub mod autosave;
pub mod conversation;
pub mod summaries;

#[cfg(test)]
pub(crate) mod testutil;

use tracing_subscriber::{fmt, EnvFilter};

/// Install the global tracing subscriber for the client.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new("layedin_client=debug,layedin_api=debug,layedin_shared=info,warn")
    });

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .init();
}

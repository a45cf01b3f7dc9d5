//! Autosave for the profile edit page.
//!
//! Edits never hit the network directly. The controller tracks the latest
//! snapshot and the canonical form of the last successful save; a driver
//! task waits out a quiescence window after the last edit and then persists,
//! skipping the write entirely when nothing changed.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::{sleep_until, Instant};
use tracing::{debug, info, warn};

use layedin_api::backend::Backend;
use layedin_api::error::{ApiError, Result};
use layedin_api::session::Session;
use layedin_shared::constants::{AUTOSAVE_CHANNEL_CAPACITY, AUTOSAVE_QUIESCENCE_MS};
use layedin_shared::profile::ProfileSnapshot;
use layedin_shared::types::UserId;

/// Save indicator shown next to the edit form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AutosaveStatus {
    Saved,
    Saving,
    PendingChanges,
}

/// State machine over the snapshot, its saved baseline and the visible
/// status. Timing lives in [`AutosaveHandle`]; this type only reacts to
/// edits and save triggers.
pub struct AutosaveController<B> {
    backend: Arc<B>,
    user_id: UserId,
    snapshot: ProfileSnapshot,
    baseline: String,
    status_tx: watch::Sender<AutosaveStatus>,
    status_rx: watch::Receiver<AutosaveStatus>,
}

impl<B: Backend> AutosaveController<B> {
    /// Bind the controller to the snapshot loaded from the backend, which
    /// becomes the first saved baseline.
    pub fn new(backend: Arc<B>, session: &Session, initial: ProfileSnapshot) -> Result<Self> {
        let baseline = initial.canonical_json()?;
        let (status_tx, status_rx) = watch::channel(AutosaveStatus::Saved);
        Ok(Self {
            backend,
            user_id: session.user_id.clone(),
            snapshot: initial,
            baseline,
            status_tx,
            status_rx,
        })
    }

    pub fn status(&self) -> AutosaveStatus {
        *self.status_rx.borrow()
    }

    pub fn watch_status(&self) -> watch::Receiver<AutosaveStatus> {
        self.status_rx.clone()
    }

    pub fn snapshot(&self) -> &ProfileSnapshot {
        &self.snapshot
    }

    /// Record the latest in-memory snapshot and mark unsaved changes.
    pub fn on_edit(&mut self, snapshot: ProfileSnapshot) {
        self.snapshot = snapshot;
        self.set_status(AutosaveStatus::PendingChanges);
    }

    /// Persist the current snapshot if it differs from the saved baseline.
    ///
    /// A snapshot whose canonical form matches the baseline transitions
    /// straight to `Saved` without a network call. A failed persist keeps
    /// the local snapshot, logs the error and returns to `PendingChanges`
    /// so the next quiescence cycle retries; the failure is never surfaced
    /// as a blocking error.
    pub async fn trigger_save(&mut self) -> Result<()> {
        let current = self.snapshot.canonical_json()?;
        if current == self.baseline {
            debug!(user = %self.user_id, "Snapshot unchanged since last save, skipping write");
            self.set_status(AutosaveStatus::Saved);
            return Ok(());
        }

        self.set_status(AutosaveStatus::Saving);
        match self.backend.update_profile(&self.user_id, &self.snapshot).await {
            Ok(_) => {
                self.baseline = current;
                self.set_status(AutosaveStatus::Saved);
                info!(user = %self.user_id, "Profile autosaved");
            }
            Err(e) => {
                warn!(user = %self.user_id, error = %e, transient = e.is_transient(), "Autosave failed");
                self.set_status(AutosaveStatus::PendingChanges);
            }
        }
        Ok(())
    }

    fn set_status(&mut self, status: AutosaveStatus) {
        self.status_tx.send_replace(status);
    }
}

enum AutosaveCommand {
    Edit(ProfileSnapshot),
    Flush,
}

/// Owned handle to the autosave driver task.
///
/// Edits are forwarded over a command channel in the same style as the
/// rest of the app's long-lived tasks. Dropping the handle aborts the task,
/// so no save can fire after the edit page is gone.
pub struct AutosaveHandle {
    cmd_tx: mpsc::Sender<AutosaveCommand>,
    status_rx: watch::Receiver<AutosaveStatus>,
    task: JoinHandle<()>,
}

impl AutosaveHandle {
    pub fn spawn<B: Backend + 'static>(controller: AutosaveController<B>) -> Self {
        Self::spawn_with_quiescence(controller, Duration::from_millis(AUTOSAVE_QUIESCENCE_MS))
    }

    pub fn spawn_with_quiescence<B: Backend + 'static>(
        mut controller: AutosaveController<B>,
        quiescence: Duration,
    ) -> Self {
        let (cmd_tx, mut cmd_rx) = mpsc::channel(AUTOSAVE_CHANNEL_CAPACITY);
        let status_rx = controller.watch_status();

        let task = tokio::spawn(async move {
            let mut deadline: Option<Instant> = None;
            loop {
                tokio::select! {
                    // Drain queued edits before the timer so rapid edits
                    // coalesce into a single save of the latest snapshot.
                    biased;

                    cmd = cmd_rx.recv() => match cmd {
                        Some(AutosaveCommand::Edit(snapshot)) => {
                            controller.on_edit(snapshot);
                            deadline = Some(Instant::now() + quiescence);
                        }
                        Some(AutosaveCommand::Flush) => {
                            deadline = None;
                            save_now(&mut controller, &mut deadline, quiescence).await;
                        }
                        None => break,
                    },
                    () = sleep_until(deadline.unwrap_or_else(Instant::now)), if deadline.is_some() => {
                        deadline = None;
                        save_now(&mut controller, &mut deadline, quiescence).await;
                    }
                }
            }
            debug!("Autosave driver stopped");
        });

        Self {
            cmd_tx,
            status_rx,
            task,
        }
    }

    /// Hand the latest snapshot to the driver and restart the quiescence
    /// window.
    pub async fn edit(&self, snapshot: ProfileSnapshot) -> Result<()> {
        self.cmd_tx
            .send(AutosaveCommand::Edit(snapshot))
            .await
            .map_err(|_| ApiError::ChannelClosed)
    }

    /// Save immediately, without waiting out the quiescence window.
    pub async fn flush(&self) -> Result<()> {
        self.cmd_tx
            .send(AutosaveCommand::Flush)
            .await
            .map_err(|_| ApiError::ChannelClosed)
    }

    pub fn status(&self) -> AutosaveStatus {
        *self.status_rx.borrow()
    }

    pub fn watch_status(&self) -> watch::Receiver<AutosaveStatus> {
        self.status_rx.clone()
    }
}

impl Drop for AutosaveHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}

async fn save_now<B: Backend>(
    controller: &mut AutosaveController<B>,
    deadline: &mut Option<Instant>,
    quiescence: Duration,
) {
    if let Err(e) = controller.trigger_save().await {
        warn!(error = %e, "Autosave trigger failed");
    }
    // A failed persist leaves the controller pending; re-arm so the next
    // cycle retries even without a fresh edit.
    if controller.status() == AutosaveStatus::PendingChanges {
        *deadline = Some(Instant::now() + quiescence);
    }
}

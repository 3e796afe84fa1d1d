//! Upload session state machine.
//!
//! A [`TransferSession`] drives exactly one file from start to a terminal
//! outcome, translating transport events into state transitions and UI side
//! effects:
//!
//! - on start the injected drop-zone control switches to a progress
//!   presentation bound to this session;
//! - transport progress is published through a watch channel, in arrival
//!   order, never coalesced here;
//! - on success a toast appears and the listing refresh is scheduled after
//!   [`crate::REFRESH_DELAY`] so the toast becomes visible first;
//! - on failure an error toast appears and the drop zone is reset to its
//!   idle affordance after [`crate::ZONE_RESET_DELAY`].
//!
//! `Succeeded` and `Failed` are terminal. There is no cancellation: once
//! started, a session runs until the transport resolves or the host goes
//! away. `start` consumes the session, so a terminal event can occur at
//! most once per session by construction.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::{mpsc, watch};

use crate::api::ApiClient;
use crate::error::{Error, Result};
use crate::notify::NotificationQueue;
use crate::refresh::{schedule_refresh, PageRefresh};
use crate::revert::{ControlHandle, Presentation, TimedRevert};
use crate::{
    DEFAULT_DOWNLOADS_LIMIT, DEFAULT_EXPIRATION_DAYS, MAX_UPLOAD_BYTES, REFRESH_DELAY,
    ZONE_RESET_DELAY,
};

/// Idle affordance of the upload drop zone.
pub const ZONE_IDLE_LABEL: &str = "Drop files here or click to upload";

/// The idle drop-zone presentation hosts create their zone control with.
#[must_use]
pub fn idle_zone_presentation() -> Presentation {
    Presentation::neutral(ZONE_IDLE_LABEL)
}

/// Session lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// No transfer started
    Idle,
    /// Request in flight
    Uploading,
    /// Terminal: upload acknowledged by the server
    Succeeded,
    /// Terminal: transport or network failure
    Failed,
}

/// Fixed upload parameters attached to every request. No per-upload
/// override; hosts configure these once.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct UploadDefaults {
    /// Expiration window in days
    pub expiration_days: u32,
    /// Download-count limit (0 = unlimited)
    pub downloads_limit: u32,
    /// Whether downloads require authentication
    pub require_auth: bool,
}

impl Default for UploadDefaults {
    fn default() -> Self {
        Self {
            expiration_days: DEFAULT_EXPIRATION_DAYS,
            downloads_limit: DEFAULT_DOWNLOADS_LIMIT,
            require_auth: false,
        }
    }
}

/// A user-selected file: name, size (when known) and where to read it.
#[derive(Debug, Clone)]
pub struct FileSource {
    name: String,
    size: Option<u64>,
    path: PathBuf,
}

impl FileSource {
    /// Open a file for upload, reading its metadata.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidFile` if the path is a directory, has no file
    /// name, or exceeds the upload size limit; `Error::Io` if metadata
    /// cannot be read.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let metadata = tokio::fs::metadata(path).await?;
        if metadata.is_dir() {
            return Err(Error::InvalidFile(format!(
                "'{}' is a directory",
                path.display()
            )));
        }

        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .ok_or_else(|| Error::InvalidFile(format!("'{}' has no file name", path.display())))?;

        let size = metadata.len();
        Self::check_size(&name, size)?;

        Ok(Self {
            name,
            size: Some(size),
            path: path.to_path_buf(),
        })
    }

    /// Forget the known size, e.g. for a file still being written. The
    /// transport then streams without a length and the progress indicator
    /// does not advance.
    #[must_use]
    pub fn with_unknown_size(mut self) -> Self {
        self.size = None;
        self
    }

    /// File name presented to the server.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Size in bytes, when known.
    #[must_use]
    pub fn size(&self) -> Option<u64> {
        self.size
    }

    /// Where the file is read from.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn check_size(name: &str, size: u64) -> Result<()> {
        if size > MAX_UPLOAD_BYTES {
            return Err(Error::InvalidFile(format!(
                "'{name}' exceeds the 5 GB upload limit"
            )));
        }
        Ok(())
    }
}

/// Progress information for a session.
#[derive(Debug, Clone)]
pub struct SessionProgress {
    /// Current state
    pub state: SessionState,
    /// Bytes handed to the transport so far
    pub bytes_sent: u64,
    /// Total bytes, when computable
    pub total_bytes: Option<u64>,
    /// Failure description, set on `Failed`
    pub error: Option<String>,
}

impl SessionProgress {
    fn idle() -> Self {
        Self {
            state: SessionState::Idle,
            bytes_sent: 0,
            total_bytes: None,
            error: None,
        }
    }

    /// Progress as a percentage in [0, 100], or `None` when the total is
    /// not computable (the indicator simply does not advance).
    #[must_use]
    pub fn percentage(&self) -> Option<f64> {
        let total = self.total_bytes?;
        if total == 0 {
            return Some(100.0);
        }
        Some(((self.bytes_sent as f64 / total as f64) * 100.0).clamp(0.0, 100.0))
    }
}

/// Terminal result of [`TransferSession::start`].
#[derive(Debug, Clone)]
pub struct SessionOutcome {
    /// `Succeeded` or `Failed`
    pub state: SessionState,
    /// Server-relative link to the uploaded file, when the server named one
    pub link: Option<String>,
}

/// One file upload from start to terminal outcome.
pub struct TransferSession {
    client: ApiClient,
    defaults: UploadDefaults,
    zone: ControlHandle,
    toasts: NotificationQueue,
    revert: TimedRevert,
    refresher: Arc<dyn PageRefresh>,
    progress_tx: watch::Sender<SessionProgress>,
    progress_rx: watch::Receiver<SessionProgress>,
}

impl TransferSession {
    /// Create an idle session bound to the given collaborators. The session
    /// is the sole mutator of `zone` while it runs.
    #[must_use]
    pub fn new(
        client: ApiClient,
        defaults: UploadDefaults,
        zone: ControlHandle,
        toasts: NotificationQueue,
        revert: TimedRevert,
        refresher: Arc<dyn PageRefresh>,
    ) -> Self {
        let (progress_tx, progress_rx) = watch::channel(SessionProgress::idle());
        Self {
            client,
            defaults,
            zone,
            toasts,
            revert,
            refresher,
            progress_tx,
            progress_rx,
        }
    }

    /// Get a progress receiver.
    #[must_use]
    pub fn progress(&self) -> watch::Receiver<SessionProgress> {
        self.progress_rx.clone()
    }

    /// Drive `file` to a terminal outcome.
    ///
    /// Consumes the session: the terminal event occurs exactly once, and the
    /// published state is immutable afterwards.
    pub async fn start(self, file: FileSource) -> SessionOutcome {
        self.zone
            .set(Presentation::busy(format!("Uploading: {}", file.name())));
        self.publish(|p| {
            p.state = SessionState::Uploading;
            p.total_bytes = file.size();
        });

        let (progress_tx, mut progress_rx) = mpsc::unbounded_channel();
        let request = self.client.upload(&file, &self.defaults, progress_tx);
        tokio::pin!(request);

        let mut reporting = true;
        let result = loop {
            tokio::select! {
                event = progress_rx.recv(), if reporting => {
                    match event {
                        Some(loaded) => self.apply_progress(loaded),
                        None => reporting = false,
                    }
                }
                result = &mut request => break result,
            }
        };

        // Progress reported before the terminal event still applies, in
        // order. Anything after it is ignored.
        while let Ok(loaded) = progress_rx.try_recv() {
            self.apply_progress(loaded);
        }

        match result {
            Ok(ack) => {
                tracing::info!(file = file.name(), "upload succeeded");
                self.publish(|p| p.state = SessionState::Succeeded);
                self.toasts.success("File uploaded successfully!");
                let _ = schedule_refresh(Arc::clone(&self.refresher), REFRESH_DELAY);
                SessionOutcome {
                    state: SessionState::Succeeded,
                    link: ack.url,
                }
            }
            Err(e) => {
                tracing::warn!(file = file.name(), "upload failed: {e}");
                let toast_text = e.upload_toast_text();
                self.publish(|p| {
                    p.state = SessionState::Failed;
                    p.error = Some(toast_text.clone());
                });
                self.toasts.error(toast_text);
                self.revert
                    .show(&self.zone, Presentation::error("Upload failed"), ZONE_RESET_DELAY);
                SessionOutcome {
                    state: SessionState::Failed,
                    link: None,
                }
            }
        }
    }

    fn apply_progress(&self, loaded: u64) {
        // Only meaningful while uploading; late events are dropped by the
        // terminal publish preceding them.
        if self.progress_rx.borrow().state != SessionState::Uploading {
            return;
        }
        self.publish(|p| p.bytes_sent = loaded);
    }

    fn publish<F: FnOnce(&mut SessionProgress)>(&self, update: F) {
        let mut progress = self.progress_rx.borrow().clone();
        update(&mut progress);
        let _ = self.progress_tx.send(progress);
    }
}

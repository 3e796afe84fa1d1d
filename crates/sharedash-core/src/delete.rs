//! Confirmation-gated deletion flow.
//!
//! A destructive request is only issued after an explicit confirmation
//! naming the resource. Declining terminates the flow with no side effects
//! at all; it is a normal exit path, not an error. Transport and network
//! failures are merged into one generic failure here. There is no retry,
//! and no rollback is needed since nothing local is mutated.

use std::sync::Arc;

use crate::api::ApiClient;
use crate::notify::NotificationQueue;
use crate::refresh::{schedule_refresh, PageRefresh};
use crate::REFRESH_DELAY;

/// Host-side confirmation prompt. Blocking by design: the flow must not
/// proceed until the user answered.
pub trait Confirm: Send + Sync {
    /// Present `prompt` and return whether the user confirmed.
    fn confirm(&self, prompt: &str) -> bool;
}

/// How a deletion request ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// User declined; no request was sent
    Declined,
    /// Server acknowledged the deletion
    Deleted,
    /// Request failed (transport or network, not distinguished)
    Failed,
}

/// Deletion flow over one sharing server.
#[derive(Clone)]
pub struct DeletionFlow {
    client: ApiClient,
    toasts: NotificationQueue,
    refresher: Arc<dyn PageRefresh>,
    confirm: Arc<dyn Confirm>,
}

impl DeletionFlow {
    /// Create a flow bound to the given collaborators.
    #[must_use]
    pub fn new(
        client: ApiClient,
        toasts: NotificationQueue,
        refresher: Arc<dyn PageRefresh>,
        confirm: Arc<dyn Confirm>,
    ) -> Self {
        Self {
            client,
            toasts,
            refresher,
            confirm,
        }
    }

    /// Delete the file with `file_id` after confirming against `label`.
    ///
    /// On success a toast appears and the listing refresh is scheduled after
    /// [`crate::REFRESH_DELAY`]. On failure a single generic error toast
    /// appears. Never returns an error past this boundary.
    pub async fn request_delete(&self, file_id: &str, label: &str) -> DeleteOutcome {
        let prompt = format!("Delete \"{label}\"?");
        if !self.confirm.confirm(&prompt) {
            tracing::debug!(file_id, "deletion declined");
            return DeleteOutcome::Declined;
        }

        match self.client.delete(file_id).await {
            Ok(_) => {
                tracing::info!(file_id, "file deleted");
                self.toasts.success("File deleted");
                let _ = schedule_refresh(Arc::clone(&self.refresher), REFRESH_DELAY);
                DeleteOutcome::Deleted
            }
            Err(e) => {
                tracing::warn!(file_id, "deletion failed: {e}");
                self.toasts.error("Failed to delete file");
                DeleteOutcome::Failed
            }
        }
    }
}

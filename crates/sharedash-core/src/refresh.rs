//! Listing refresh scheduling.
//!
//! The file listing lives outside this crate (a page reload in a browser, a
//! re-render in a terminal host). Hosts inject a [`PageRefresh`] and flows
//! schedule it after their success toast has had time to appear.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;

/// Host-side collaborator that refreshes the file listing.
pub trait PageRefresh: Send + Sync {
    /// Refresh the listing now.
    fn refresh(&self);
}

/// Schedule one refresh after `delay`. Fires at most once.
pub fn schedule_refresh(refresher: Arc<dyn PageRefresh>, delay: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        tokio::time::sleep(delay).await;
        refresher.refresh();
    })
}

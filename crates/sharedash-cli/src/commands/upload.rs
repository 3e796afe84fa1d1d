//! The upload command: drive one file to a terminal outcome with live
//! progress, then wait for the scheduled listing refresh before exiting.

use std::sync::Arc;

use anyhow::{bail, Result};
use tokio::sync::Notify;

use sharedash_core::api::ApiClient;
use sharedash_core::notify::NotificationQueue;
use sharedash_core::refresh::PageRefresh;
use sharedash_core::revert::{ControlHandle, TimedRevert};
use sharedash_core::session::{
    idle_zone_presentation, FileSource, SessionState, TransferSession,
};
use sharedash_core::ZONE_RESET_DELAY;

use crate::ui;

use super::UploadArgs;

/// Refresh collaborator for the terminal: the "page reload" of the browser
/// dashboard becomes a note plus a wakeup for the waiting command.
struct ListingRefresh {
    done: Arc<Notify>,
}

impl PageRefresh for ListingRefresh {
    fn refresh(&self) {
        println!("Listing refreshed.");
        self.done.notify_one();
    }
}

/// Run the upload command.
pub async fn run(args: UploadArgs) -> Result<()> {
    let config = super::load_config();
    let base_url = args.server.unwrap_or(config.server.base_url);

    let client = ApiClient::new(&base_url);
    let toasts = NotificationQueue::new();
    let revert = TimedRevert::new();
    let zone = ControlHandle::new(idle_zone_presentation());
    let refreshed = Arc::new(Notify::new());
    let refresher = Arc::new(ListingRefresh {
        done: Arc::clone(&refreshed),
    });

    let file = FileSource::open(&args.path).await?;
    println!("Uploading {} ({})", file.name(), ui::format_bytes(file.size().unwrap_or(0)));

    let session = TransferSession::new(
        client.clone(),
        config.upload,
        zone.clone(),
        toasts.clone(),
        revert,
        refresher as Arc<dyn PageRefresh>,
    );

    let mut progress_rx = session.progress();
    let renderer = tokio::spawn(async move {
        while progress_rx.changed().await.is_ok() {
            let snapshot = progress_rx.borrow_and_update().clone();
            match snapshot.state {
                SessionState::Uploading => ui::draw_progress(&snapshot),
                _ => break,
            }
        }
    });

    let outcome = session.start(file).await;
    let _ = renderer.await;
    ui::end_progress_line();
    ui::print_toasts(&toasts);

    match outcome.state {
        SessionState::Succeeded => {
            if let Some(link) = &outcome.link {
                println!("Link: {}", client.url_for(link));
            }
            // The refresh fires one second after the success toast.
            refreshed.notified().await;
            Ok(())
        }
        _ => {
            // Keep the process alive long enough for the zone reset the
            // dashboard surface promises, then report failure.
            tokio::time::sleep(ZONE_RESET_DELAY).await;
            tracing::debug!("drop zone restored: {}", zone.presentation().label);
            bail!("upload failed")
        }
    }
}

//! The copy-link command: copy a share link to the clipboard and show the
//! same transient confirmation the dashboard's copy buttons give.

use anyhow::{bail, Result};

use sharedash_core::api::ApiClient;
use sharedash_core::clipboard::{LinkCopier, NativeClipboard, COPY_CONFIRMATION_LABEL};
use sharedash_core::notify::NotificationQueue;
use sharedash_core::revert::{ControlHandle, Presentation, TimedRevert};
use sharedash_core::COPY_FEEDBACK_DELAY;

use crate::ui;

use super::CopyLinkArgs;

/// Run the copy-link command.
pub async fn run(args: CopyLinkArgs) -> Result<()> {
    let config = super::load_config();
    let base_url = args.server.unwrap_or(config.server.base_url);

    let link = if args.url.starts_with("http://") || args.url.starts_with("https://") {
        args.url.clone()
    } else {
        ApiClient::new(&base_url).url_for(&args.url)
    };

    let toasts = NotificationQueue::new();
    let clipboard = match NativeClipboard::new() {
        Ok(clipboard) => clipboard,
        Err(e) => {
            toasts.error(format!("Failed to copy: {e}"));
            ui::print_toasts(&toasts);
            bail!("clipboard unavailable")
        }
    };

    let copier = LinkCopier::new(Box::new(clipboard), toasts.clone(), TimedRevert::new());
    let control = ControlHandle::new(Presentation::neutral("Copy link"));

    copier.copy(&link, &control);

    if control.presentation().label == COPY_CONFIRMATION_LABEL {
        println!("{COPY_CONFIRMATION_LABEL} {link}");
        // Let the confirmation revert run its course, as the dashboard
        // button does, before the process (and any clipboard manager
        // handoff) goes away.
        tokio::time::sleep(COPY_FEEDBACK_DELAY).await;
        Ok(())
    } else {
        ui::print_toasts(&toasts);
        bail!("copy failed")
    }
}

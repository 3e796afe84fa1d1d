//! The delete command: confirmation-gated deletion with outcome feedback.

use std::io::Write;
use std::sync::Arc;

use anyhow::{bail, Result};
use tokio::sync::Notify;

use sharedash_core::api::ApiClient;
use sharedash_core::delete::{Confirm, DeleteOutcome, DeletionFlow};
use sharedash_core::notify::NotificationQueue;
use sharedash_core::refresh::PageRefresh;

use crate::ui;

use super::DeleteArgs;

/// Interactive confirmation over stdin.
struct StdinConfirm;

impl Confirm for StdinConfirm {
    fn confirm(&self, prompt: &str) -> bool {
        print!("{prompt} [y/N] ");
        let _ = std::io::stdout().flush();

        let mut answer = String::new();
        if std::io::stdin().read_line(&mut answer).is_err() {
            return false;
        }
        matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
    }
}

/// Non-interactive confirmation for `--yes`.
struct AssumeYes;

impl Confirm for AssumeYes {
    fn confirm(&self, _prompt: &str) -> bool {
        true
    }
}

struct ListingRefresh {
    done: Arc<Notify>,
}

impl PageRefresh for ListingRefresh {
    fn refresh(&self) {
        println!("Listing refreshed.");
        self.done.notify_one();
    }
}

/// Run the delete command.
pub async fn run(args: DeleteArgs) -> Result<()> {
    let config = super::load_config();
    let base_url = args.server.unwrap_or(config.server.base_url);
    let label = args.name.as_deref().unwrap_or(&args.file_id).to_string();

    let toasts = NotificationQueue::new();
    let refreshed = Arc::new(Notify::new());
    let confirm: Arc<dyn Confirm> = if args.yes {
        Arc::new(AssumeYes)
    } else {
        Arc::new(StdinConfirm)
    };

    let flow = DeletionFlow::new(
        ApiClient::new(&base_url),
        toasts.clone(),
        Arc::new(ListingRefresh {
            done: Arc::clone(&refreshed),
        }) as Arc<dyn PageRefresh>,
        confirm,
    );

    let outcome = flow.request_delete(&args.file_id, &label).await;
    ui::print_toasts(&toasts);

    match outcome {
        DeleteOutcome::Declined => {
            println!("Aborted.");
            Ok(())
        }
        DeleteOutcome::Deleted => {
            refreshed.notified().await;
            Ok(())
        }
        DeleteOutcome::Failed => bail!("deletion failed"),
    }
}

//! # Sharedash Core Library
//!
//! `sharedash-core` provides the client-side logic for driving a self-hosted
//! file sharing server from a local surface: one-at-a-time upload sessions
//! with streamed progress, short-lived status toasts, timed UI reverts,
//! clipboard link copying and confirmed deletion.
//!
//! ## Modules
//!
//! - [`api`] - HTTP client for the upload and delete endpoints
//! - [`clipboard`] - Clipboard access and copy-with-confirmation
//! - [`config`] - Configuration management
//! - [`delete`] - Confirmation-gated deletion flow
//! - [`notify`] - Ephemeral toast notifications
//! - [`refresh`] - Listing refresh scheduling
//! - [`revert`] - Control handles and timed presentation reverts
//! - [`session`] - Upload session state machine
//!
//! ## Example
//!
//! ```rust,ignore
//! use sharedash_core::session::{FileSource, TransferSession};
//!
//! let file = FileSource::open("report.pdf").await?;
//! let session = TransferSession::new(client, defaults, zone, toasts, revert, refresher);
//! let outcome = session.start(file).await;
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::missing_const_for_fn)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::cast_precision_loss)]

pub mod api;
pub mod clipboard;
pub mod config;
pub mod delete;
pub mod error;
pub mod notify;
pub mod refresh;
pub mod revert;
pub mod session;

pub use error::{Error, Result};

use std::time::Duration;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// How long a toast stays visible before removal
pub const TOAST_DURATION: Duration = Duration::from_millis(3000);

/// How long the copy confirmation stays on a control before reverting
pub const COPY_FEEDBACK_DELAY: Duration = Duration::from_millis(2000);

/// How long the drop zone shows failure context before resetting to idle
pub const ZONE_RESET_DELAY: Duration = Duration::from_millis(2000);

/// Delay before the listing refresh after a successful upload or delete,
/// long enough for the success toast to become visible first
pub const REFRESH_DELAY: Duration = Duration::from_millis(1000);

/// Maximum accepted upload size (5 GB, matching the server-side limit)
pub const MAX_UPLOAD_BYTES: u64 = 5 * 1024 * 1024 * 1024;

/// Default expiration window attached to uploads, in days
pub const DEFAULT_EXPIRATION_DAYS: u32 = 7;

/// Default download-count limit attached to uploads (0 = unlimited)
pub const DEFAULT_DOWNLOADS_LIMIT: u32 = 0;

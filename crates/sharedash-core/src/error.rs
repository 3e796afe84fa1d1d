//! Error types for Sharedash.
//!
//! This module provides a unified error type for all Sharedash operations,
//! with specific error variants for different failure modes. Declining a
//! confirmation prompt is not an error and never appears here; flows model
//! it as an outcome instead.

use std::io;

use thiserror::Error;

/// A specialized `Result` type for Sharedash operations.
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for Sharedash.
#[derive(Error, Debug)]
pub enum Error {
    /// Server answered with a non-success status
    #[error("server returned {status}: {status_text}")]
    Transport {
        /// HTTP status code
        status: u16,
        /// Canonical reason phrase for the status
        status_text: String,
    },

    /// Request could not be completed at all (no response)
    #[error("network error: {0}")]
    Network(String),

    /// Clipboard access failed
    #[error("clipboard error: {0}")]
    Clipboard(String),

    /// File rejected before a session was started
    #[error("invalid file: {0}")]
    InvalidFile(String),

    /// Configuration file error
    #[error("configuration error: {0}")]
    Config(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Internal error (should not happen)
    #[error("internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Returns whether this error originated in the transport or network
    /// layer, as opposed to a local failure.
    #[must_use]
    pub const fn is_request_failure(&self) -> bool {
        matches!(self, Self::Transport { .. } | Self::Network(_))
    }

    /// The user-visible toast line for an upload failure.
    ///
    /// Transport failures name the server's reason phrase; everything else
    /// collapses into the generic message, matching the surface the server's
    /// own dashboard presents.
    #[must_use]
    pub fn upload_toast_text(&self) -> String {
        match self {
            Self::Transport { status_text, .. } => format!("Upload failed: {status_text}"),
            _ => "Upload failed".to_string(),
        }
    }
}

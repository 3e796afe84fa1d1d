//! Clipboard access and copy-with-confirmation.
//!
//! [`ClipboardAccess`] is a platform-agnostic seam over the system
//! clipboard; [`NativeClipboard`] implements it with the `arboard` crate.
//! [`LinkCopier`] copies text and drives the visible confirmation: on
//! success the triggering control briefly shows a success label before a
//! timed revert, on failure an error toast is emitted and the control is
//! left untouched.

use std::sync::{Arc, Mutex};

use arboard::Clipboard;

use crate::error::{Error, Result};
use crate::notify::NotificationQueue;
use crate::revert::{ControlHandle, Presentation, TimedRevert};
use crate::COPY_FEEDBACK_DELAY;

/// Transient label a control shows after a successful copy.
pub const COPY_CONFIRMATION_LABEL: &str = "✓ Copied!";

/// Platform-agnostic clipboard access trait.
pub trait ClipboardAccess: Send + Sync {
    /// Write text to the clipboard.
    ///
    /// # Errors
    ///
    /// Returns an error if clipboard access fails.
    fn write_text(&mut self, text: &str) -> Result<()>;
}

/// Native clipboard implementation using arboard.
pub struct NativeClipboard {
    clipboard: Clipboard,
}

impl NativeClipboard {
    /// Create a new native clipboard accessor.
    ///
    /// # Errors
    ///
    /// Returns an error if clipboard cannot be accessed.
    pub fn new() -> Result<Self> {
        let clipboard = Clipboard::new()
            .map_err(|e| Error::Clipboard(format!("failed to access clipboard: {e}")))?;
        Ok(Self { clipboard })
    }
}

impl ClipboardAccess for NativeClipboard {
    fn write_text(&mut self, text: &str) -> Result<()> {
        self.clipboard
            .set_text(text)
            .map_err(|e| Error::Clipboard(format!("failed to write clipboard: {e}")))?;
        tracing::trace!("clipboard: wrote {} bytes of text", text.len());
        Ok(())
    }
}

/// Copies text to the clipboard with visible confirmation on the triggering
/// control.
#[derive(Clone)]
pub struct LinkCopier {
    clipboard: Arc<Mutex<Box<dyn ClipboardAccess>>>,
    toasts: NotificationQueue,
    revert: TimedRevert,
}

impl LinkCopier {
    /// Create a copier over the given clipboard backend.
    #[must_use]
    pub fn new(
        clipboard: Box<dyn ClipboardAccess>,
        toasts: NotificationQueue,
        revert: TimedRevert,
    ) -> Self {
        Self {
            clipboard: Arc::new(Mutex::new(clipboard)),
            toasts,
            revert,
        }
    }

    /// Copy `text`, confirming on `control`.
    ///
    /// On success the control shows [`COPY_CONFIRMATION_LABEL`] with success
    /// accent and reverts after [`crate::COPY_FEEDBACK_DELAY`]. On failure an
    /// error toast describes the failure and the control's presentation is
    /// never touched.
    pub fn copy(&self, text: &str, control: &ControlHandle) {
        let result = {
            let mut clipboard = self.clipboard.lock().expect("clipboard lock poisoned");
            clipboard.write_text(text)
        };

        match result {
            Ok(()) => {
                self.revert.show(
                    control,
                    Presentation::success(COPY_CONFIRMATION_LABEL),
                    COPY_FEEDBACK_DELAY,
                );
            }
            Err(e) => {
                tracing::warn!("copy failed: {e}");
                self.toasts.error(format!("Failed to copy: {e}"));
            }
        }
    }
}

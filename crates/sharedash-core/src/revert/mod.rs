//! Control handles and timed presentation reverts.
//!
//! A [`ControlHandle`] is an explicit, injected handle to one UI region (a
//! button, a status line, the upload drop zone). Components mutate the
//! region through the handle and hosts render it by subscribing to its watch
//! channel; nothing looks regions up ambiently.
//!
//! [`TimedRevert`] shows a transient presentation on a control and
//! guarantees restoration of the control's original presentation after a
//! fixed delay. Restoration is scheduled unconditionally at the moment the
//! transient state is entered, so no path can leave a control stuck in the
//! transient state. Re-triggering a control mid-revert cancels the pending
//! timer and restarts it: the newest transient state wins and exactly one
//! timer is pending per control.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use uuid::Uuid;

/// Visual emphasis of a presentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Accent {
    /// Default styling
    #[default]
    Neutral,
    /// Success styling (confirmation feedback)
    Success,
    /// Error styling (failure context)
    Error,
    /// In-progress styling (active upload)
    Busy,
}

/// What a control currently shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Presentation {
    /// Visible label
    pub label: String,
    /// Visual emphasis
    pub accent: Accent,
}

impl Presentation {
    /// Create a presentation with the given accent.
    #[must_use]
    pub fn new(label: impl Into<String>, accent: Accent) -> Self {
        Self {
            label: label.into(),
            accent,
        }
    }

    /// Neutral presentation.
    #[must_use]
    pub fn neutral(label: impl Into<String>) -> Self {
        Self::new(label, Accent::Neutral)
    }

    /// Success-accented presentation.
    #[must_use]
    pub fn success(label: impl Into<String>) -> Self {
        Self::new(label, Accent::Success)
    }

    /// Error-accented presentation.
    #[must_use]
    pub fn error(label: impl Into<String>) -> Self {
        Self::new(label, Accent::Error)
    }

    /// Busy-accented presentation.
    #[must_use]
    pub fn busy(label: impl Into<String>) -> Self {
        Self::new(label, Accent::Busy)
    }
}

struct ControlInner {
    id: Uuid,
    original: Presentation,
    tx: watch::Sender<Presentation>,
}

/// Handle to one UI region. Cheap to clone; clones refer to the same region.
#[derive(Clone)]
pub struct ControlHandle {
    inner: Arc<ControlInner>,
}

impl ControlHandle {
    /// Create a control showing `original`, which is also what timed reverts
    /// restore.
    #[must_use]
    pub fn new(original: Presentation) -> Self {
        let (tx, _rx) = watch::channel(original.clone());
        Self {
            inner: Arc::new(ControlInner {
                id: Uuid::new_v4(),
                original,
                tx,
            }),
        }
    }

    /// Identity of the underlying region.
    #[must_use]
    pub fn id(&self) -> Uuid {
        self.inner.id
    }

    /// The original (restore target) presentation.
    #[must_use]
    pub fn original(&self) -> &Presentation {
        &self.inner.original
    }

    /// The current presentation.
    #[must_use]
    pub fn presentation(&self) -> Presentation {
        self.inner.tx.borrow().clone()
    }

    /// Replace the current presentation.
    pub fn set(&self, presentation: Presentation) {
        let _ = self.inner.tx.send(presentation);
    }

    /// Restore the original presentation.
    pub fn restore(&self) {
        self.set(self.inner.original.clone());
    }

    /// Subscribe to presentation changes.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Presentation> {
        self.inner.tx.subscribe()
    }
}

impl std::fmt::Debug for ControlHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ControlHandle")
            .field("id", &self.inner.id)
            .field("presentation", &self.presentation())
            .finish()
    }
}

/// Scheduler for transient presentations with guaranteed restoration.
#[derive(Clone, Default)]
pub struct TimedRevert {
    pending: Arc<Mutex<HashMap<Uuid, JoinHandle<()>>>>,
}

impl TimedRevert {
    /// Create a scheduler with no pending reverts.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Show `transient` on `control` and restore the control's original
    /// presentation after `delay`. A pending revert for the same control is
    /// cancelled and restarted.
    pub fn show(&self, control: &ControlHandle, transient: Presentation, delay: Duration) {
        control.set(transient);

        let mut pending = self.pending.lock().expect("revert lock poisoned");
        if let Some(prior) = pending.remove(&control.id()) {
            prior.abort();
        }

        let control = control.clone();
        let registry = Arc::clone(&self.pending);
        let id = control.id();
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            control.restore();
            registry.lock().expect("revert lock poisoned").remove(&id);
        });
        pending.insert(id, handle);
    }

    /// Whether a revert is pending for `control`.
    #[must_use]
    pub fn is_pending(&self, control: &ControlHandle) -> bool {
        self.pending
            .lock()
            .expect("revert lock poisoned")
            .contains_key(&control.id())
    }
}

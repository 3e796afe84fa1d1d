//! Ephemeral toast notifications.
//!
//! [`NotificationQueue`] presents short-lived, non-blocking feedback
//! messages without requiring any caller-side cleanup: every toast owns its
//! own removal timer and disappears after [`crate::TOAST_DURATION`].
//! Concurrent toasts are independent and never cancel one another.
//!
//! Observers render the queue by subscribing to a watch channel that
//! publishes a snapshot of the visible toasts on every change, in insertion
//! order.

use std::sync::{Arc, Mutex};
use std::time::Instant;

use tokio::sync::watch;
use uuid::Uuid;

use crate::TOAST_DURATION;

/// The kind of a toast, controlling its visual emphasis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    /// Operation completed
    Success,
    /// Operation failed
    Error,
}

/// A single short-lived status message. Immutable once created.
#[derive(Debug, Clone)]
pub struct Toast {
    /// Unique id, used only for removal
    pub id: Uuid,
    /// Message text
    pub text: String,
    /// Visual emphasis
    pub kind: ToastKind,
    /// When the toast was created
    pub created_at: Instant,
}

/// Queue of visible toasts with automatic expiry.
#[derive(Clone)]
pub struct NotificationQueue {
    toasts: Arc<Mutex<Vec<Toast>>>,
    tx: watch::Sender<Vec<Toast>>,
}

impl NotificationQueue {
    /// Create an empty queue.
    #[must_use]
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(Vec::new());
        Self {
            toasts: Arc::new(Mutex::new(Vec::new())),
            tx,
        }
    }

    /// Show a message. Always succeeds; the toast is removed automatically
    /// after [`crate::TOAST_DURATION`].
    pub fn notify(&self, text: impl Into<String>, kind: ToastKind) {
        let toast = Toast {
            id: Uuid::new_v4(),
            text: text.into(),
            kind,
            created_at: Instant::now(),
        };
        let id = toast.id;

        tracing::debug!(kind = ?kind, "toast: {}", toast.text);

        {
            let mut toasts = self.toasts.lock().expect("toast lock poisoned");
            toasts.push(toast);
            let _ = self.tx.send(toasts.clone());
        }

        let queue = self.clone();
        tokio::spawn(async move {
            tokio::time::sleep(TOAST_DURATION).await;
            queue.remove(id);
        });
    }

    /// Show a success message.
    pub fn success(&self, text: impl Into<String>) {
        self.notify(text, ToastKind::Success);
    }

    /// Show an error message.
    pub fn error(&self, text: impl Into<String>) {
        self.notify(text, ToastKind::Error);
    }

    /// Snapshot of the currently visible toasts, in insertion order.
    #[must_use]
    pub fn active(&self) -> Vec<Toast> {
        self.toasts.lock().expect("toast lock poisoned").clone()
    }

    /// Subscribe to queue changes. Each published value is a snapshot of the
    /// visible toasts.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Vec<Toast>> {
        self.tx.subscribe()
    }

    fn remove(&self, id: Uuid) {
        let mut toasts = self.toasts.lock().expect("toast lock poisoned");
        toasts.retain(|t| t.id != id);
        let _ = self.tx.send(toasts.clone());
    }
}

impl Default for NotificationQueue {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    async fn settle() {
        for _ in 0..5 {
            tokio::task::yield_now().await;
        }
    }

    #[tokio::test(start_paused = true)]
    async fn toast_expires_on_boundary() {
        let queue = NotificationQueue::new();
        queue.success("File uploaded successfully!");
        settle().await;

        tokio::time::advance(Duration::from_millis(2999)).await;
        settle().await;
        assert_eq!(queue.active().len(), 1, "still presented at T+2999ms");

        tokio::time::advance(Duration::from_millis(2)).await;
        settle().await;
        assert!(queue.active().is_empty(), "gone at T+3001ms");
    }

    #[tokio::test(start_paused = true)]
    async fn concurrent_toasts_expire_independently() {
        let queue = NotificationQueue::new();
        queue.success("first");
        settle().await;

        tokio::time::advance(Duration::from_millis(1500)).await;
        settle().await;
        queue.error("second");
        settle().await;
        assert_eq!(queue.active().len(), 2);

        // First expires at 3000, second at 4500.
        tokio::time::advance(Duration::from_millis(1600)).await;
        settle().await;
        let active = queue.active();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].text, "second");
        assert_eq!(active[0].kind, ToastKind::Error);

        tokio::time::advance(Duration::from_millis(1500)).await;
        settle().await;
        assert!(queue.active().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn insertion_order_is_preserved() {
        let queue = NotificationQueue::new();
        queue.success("a");
        queue.error("b");
        queue.success("c");
        settle().await;

        let texts: Vec<_> = queue.active().into_iter().map(|t| t.text).collect();
        assert_eq!(texts, vec!["a", "b", "c"]);
    }

    #[tokio::test(start_paused = true)]
    async fn subscribers_see_snapshots() {
        let queue = NotificationQueue::new();
        let mut rx = queue.subscribe();

        queue.success("hello");
        settle().await;
        assert!(rx.has_changed().expect("channel open"));
        assert_eq!(rx.borrow_and_update().len(), 1);

        tokio::time::advance(Duration::from_millis(3001)).await;
        settle().await;
        assert!(rx.borrow_and_update().is_empty());
    }
}

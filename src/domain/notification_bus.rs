//! Toast fan-out for views.
//!
//! Controllers only see the [`NotificationSink`] port; the console wires
//! a [`NotificationBus`] behind it so any number of views can render the
//! same toasts.

use tokio::sync::broadcast;

use super::notification::{Notification, NotificationLevel};
use crate::ports::NotificationSink;

/// [`NotificationSink`] that broadcasts every toast to its subscribers.
///
/// A subscriber that falls more than `capacity` toasts behind loses the
/// oldest ones and sees `RecvError::Lagged` once.
#[derive(Debug, Clone)]
pub struct NotificationBus {
    sender: broadcast::Sender<Notification>,
}

impl NotificationBus {
    /// Creates a bus buffering up to `capacity` toasts (at least one).
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    /// Receiver for toasts raised from now on.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<Notification> {
        self.sender.subscribe()
    }

    fn emit(&self, level: NotificationLevel, message: &str, title: Option<&str>) {
        tracing::debug!(?level, text = message, "notification");
        // No view listening is not an error for the caller.
        let _ = self.sender.send(Notification::new(level, message, title));
    }
}

impl NotificationSink for NotificationBus {
    fn show_success(&self, message: &str, title: Option<&str>) {
        self.emit(NotificationLevel::Success, message, title);
    }

    fn show_error(&self, message: &str, title: Option<&str>) {
        self.emit(NotificationLevel::Error, message, title);
    }

    fn show_warning(&self, message: &str, title: Option<&str>) {
        self.emit(NotificationLevel::Warning, message, title);
    }
}

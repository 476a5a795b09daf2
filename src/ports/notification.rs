//! User-facing notification sink.

use std::fmt;

/// Fire-and-forget toast surface.
///
/// Implemented by [`crate::domain::NotificationBus`]; views can provide
/// their own.
pub trait NotificationSink: Send + Sync + fmt::Debug {
    /// Shows a success toast.
    fn show_success(&self, message: &str, title: Option<&str>);
    /// Shows an error toast.
    fn show_error(&self, message: &str, title: Option<&str>);
    /// Shows a warning toast.
    fn show_warning(&self, message: &str, title: Option<&str>);
}

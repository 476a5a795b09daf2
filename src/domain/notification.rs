//! Toast notifications emitted by services and controllers.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

/// Severity of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationLevel {
    /// An operation completed.
    Success,
    /// An operation failed.
    Error,
    /// An operation was refused by a business rule.
    Warning,
}

/// One toast, as broadcast by [`super::NotificationBus`].
#[derive(Debug, Clone, Serialize)]
pub struct Notification {
    /// Unique id so a view can dismiss this toast.
    pub id: Uuid,
    /// Severity.
    pub level: NotificationLevel,
    /// Message body.
    pub message: String,
    /// Optional heading.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Emission time.
    pub timestamp: DateTime<Utc>,
}

impl Notification {
    /// Creates a notification stamped with the current time.
    #[must_use]
    pub fn new(level: NotificationLevel, message: &str, title: Option<&str>) -> Self {
        Self {
            id: Uuid::new_v4(),
            level,
            message: message.to_string(),
            title: title.map(str::to_string),
            timestamp: Utc::now(),
        }
    }
}

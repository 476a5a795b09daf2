//! Console error taxonomy and backend failure payload parsing.
//!
//! [`ConsoleError`] is the central error type for the crate. Each variant
//! carries a numeric code and a user-facing message so callers can surface
//! it through a notification sink without further mapping.

use serde_json::Value;
use validator::ValidationErrors;

use crate::ports::Action;

/// Localized fallback used when the backend supplies no readable message.
pub const GENERIC_FAILURE_MESSAGE: &str = "Something went wrong. Please try again later.";

/// Failure reported by a [`crate::ports::Transport`].
///
/// Backends answer errors in a few shapes; all of these are understood by
/// [`FailureInfo::message`]:
/// ```json
/// { "error": { "code": 2001, "message": "Customer not found" } }
/// { "message": "Customer not found" }
/// { "error": "Customer not found" }
/// { "errors": [{ "message": "Customer not found" }] }
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct FailureInfo {
    /// HTTP status code. `None` when the request never produced a response.
    pub status: Option<u16>,
    /// Structured error body returned by the backend, if any.
    pub body: Option<Value>,
    /// Low-level description of the failure (connection refused, bad JSON).
    pub detail: Option<String>,
}

impl FailureInfo {
    /// Creates a failure for a non-2xx response.
    #[must_use]
    pub fn from_status(status: u16, body: Option<Value>) -> Self {
        Self {
            status: Some(status),
            body,
            detail: None,
        }
    }

    /// Creates a failure for a request that never got a response.
    #[must_use]
    pub fn network(detail: impl Into<String>) -> Self {
        Self {
            status: None,
            body: None,
            detail: Some(detail.into()),
        }
    }

    /// Returns the most specific human-readable message in the body.
    #[must_use]
    pub fn message(&self) -> Option<String> {
        self.body.as_ref().and_then(extract_message)
    }
}

fn extract_message(body: &Value) -> Option<String> {
    match body {
        Value::String(text) if !text.trim().is_empty() => Some(text.trim().to_string()),
        Value::Object(map) => ["message", "error", "errors", "detail"]
            .iter()
            .filter_map(|key| map.get(*key))
            .find_map(extract_message),
        Value::Array(entries) => entries.iter().find_map(extract_message),
        _ => None,
    }
}

/// Client-side error enum.
///
/// # Error Code Ranges
///
/// | Range     | Category          |
/// |-----------|-------------------|
/// | 1000–1999 | Validation/Decode |
/// | 2000–2999 | Business rules    |
/// | 3000–3999 | Local permissions |
/// | 4000–4999 | Transport         |
#[derive(Debug, Clone, thiserror::Error)]
pub enum ConsoleError {
    /// Network failure, timeout or non-2xx response.
    #[error("transport failure (status {status:?}): {message}")]
    Transport {
        /// HTTP status, when a response was received.
        status: Option<u16>,
        /// Backend message or [`GENERIC_FAILURE_MESSAGE`].
        message: String,
    },

    /// Local capability check failed; nothing was sent to the backend.
    #[error("permission denied: cannot {0}")]
    PermissionDenied(Action),

    /// A business precondition prevents the operation.
    #[error("blocked: {0}")]
    Blocked(String),

    /// Client-side form validation failed before submission.
    #[error("validation failed: {0}")]
    Validation(String),

    /// The backend answered with a payload of an unexpected shape.
    #[error("unexpected payload: {0}")]
    Decode(String),

    /// The owning view was torn down.
    #[error("controller disposed")]
    Disposed,
}

impl ConsoleError {
    /// Returns the numeric error code for this variant.
    #[must_use]
    pub const fn error_code(&self) -> u32 {
        match self {
            Self::Validation(_) => 1001,
            Self::Decode(_) => 1002,
            Self::Blocked(_) => 2001,
            Self::Disposed => 2002,
            Self::PermissionDenied(_) => 3001,
            Self::Transport { .. } => 4001,
        }
    }

    /// Message suitable for a notification toast.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Transport { message, .. } => message.clone(),
            Self::PermissionDenied(action) => {
                format!("You do not have permission to {action} this item.")
            }
            Self::Blocked(message) | Self::Validation(message) => message.clone(),
            Self::Decode(_) | Self::Disposed => GENERIC_FAILURE_MESSAGE.to_string(),
        }
    }

    /// `true` for conditions surfaced as warnings rather than errors.
    #[must_use]
    pub const fn is_warning(&self) -> bool {
        matches!(self, Self::Blocked(_))
    }
}

impl From<FailureInfo> for ConsoleError {
    fn from(info: FailureInfo) -> Self {
        let message = info
            .message()
            .unwrap_or_else(|| GENERIC_FAILURE_MESSAGE.to_string());
        Self::Transport {
            status: info.status,
            message,
        }
    }
}

impl From<ValidationErrors> for ConsoleError {
    fn from(errors: ValidationErrors) -> Self {
        let mut messages = Vec::new();
        for (field, field_errors) in errors.field_errors() {
            for error in field_errors {
                let message = error.message.as_ref().map_or_else(
                    || format!("Field '{field}' is invalid"),
                    |m| format!("Field '{field}': {m}"),
                );
                messages.push(message);
            }
        }
        messages.sort();
        Self::Validation(messages.join("; "))
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn message_from_nested_error_envelope() {
        let info = FailureInfo::from_status(
            409,
            Some(json!({ "error": { "code": 2001, "message": "Status is in use" } })),
        );
        assert_eq!(info.message().as_deref(), Some("Status is in use"));
    }

    #[test]
    fn message_prefers_top_level_message() {
        let info = FailureInfo::from_status(
            400,
            Some(json!({ "message": "Bad code", "error": "Bad Request" })),
        );
        assert_eq!(info.message().as_deref(), Some("Bad code"));
    }

    #[test]
    fn message_from_error_list() {
        let info = FailureInfo::from_status(
            422,
            Some(json!({ "errors": [{ "field": "code" }, { "message": "code taken" }] })),
        );
        assert_eq!(info.message().as_deref(), Some("code taken"));
    }

    #[test]
    fn blank_message_is_ignored() {
        let info = FailureInfo::from_status(500, Some(json!({ "message": "  " })));
        assert_eq!(info.message(), None);
    }

    #[test]
    fn transport_error_falls_back_to_generic_message() {
        let err = ConsoleError::from(FailureInfo::network("connection refused"));
        assert_eq!(err.user_message(), GENERIC_FAILURE_MESSAGE);
        assert_eq!(err.error_code(), 4001);
    }

    #[test]
    fn transport_error_keeps_status_and_backend_message() {
        let err = ConsoleError::from(FailureInfo::from_status(
            404,
            Some(json!({ "message": "Customer not found" })),
        ));
        let ConsoleError::Transport { status, message } = err else {
            panic!("expected transport variant");
        };
        assert_eq!(status, Some(404));
        assert_eq!(message, "Customer not found");
    }

    #[test]
    fn permission_denied_mentions_action() {
        let err = ConsoleError::PermissionDenied(Action::Delete);
        assert_eq!(
            err.user_message(),
            "You do not have permission to delete this item."
        );
        assert!(!err.is_warning());
    }

    #[test]
    fn blocked_is_a_warning() {
        assert!(ConsoleError::Blocked("linked".to_string()).is_warning());
    }
}

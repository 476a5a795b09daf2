//! Credentials capability injected into the transport.

use std::fmt;

/// Supplies the bearer token attached to outgoing requests.
///
/// Passed explicitly to [`crate::transport::HttpTransport`] so no service
/// reaches into ambient storage for a token.
pub trait CredentialsProvider: Send + Sync + fmt::Debug {
    /// Current access token, or `None` for anonymous requests.
    fn bearer_token(&self) -> Option<String>;
}

/// Provider holding a fixed token (or none).
#[derive(Clone, Default)]
pub struct StaticCredentials {
    token: Option<String>,
}

impl StaticCredentials {
    /// Creates a provider for the given token.
    #[must_use]
    pub fn new(token: Option<String>) -> Self {
        let token = token.filter(|t| !t.trim().is_empty());
        Self { token }
    }

    /// Provider that never authenticates.
    #[must_use]
    pub fn anonymous() -> Self {
        Self::default()
    }
}

// Keep tokens out of logs.
impl fmt::Debug for StaticCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StaticCredentials")
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

impl CredentialsProvider for StaticCredentials {
    fn bearer_token(&self) -> Option<String> {
        self.token.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_token_is_anonymous() {
        let creds = StaticCredentials::new(Some("   ".to_string()));
        assert_eq!(creds.bearer_token(), None);
    }

    #[test]
    fn debug_redacts_token() {
        let creds = StaticCredentials::new(Some("secret".to_string()));
        let rendered = format!("{creds:?}");
        assert!(!rendered.contains("secret"));
        assert_eq!(creds.bearer_token().as_deref(), Some("secret"));
    }
}

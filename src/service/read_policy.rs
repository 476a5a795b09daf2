//! Degraded-mode policy for read endpoints.

use std::fmt;
use std::str::FromStr;

use crate::error::ConsoleError;

/// What a service does when a read request fails.
///
/// Only read paths consult the policy; create, update and delete always
/// propagate their failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReadErrorPolicy {
    /// Return the failure to the caller.
    #[default]
    Propagate,
    /// Log the failure and serve the fixed fallback dataset instead.
    Fallback,
}

impl ReadErrorPolicy {
    /// Applies the policy to a read result.
    ///
    /// Under [`ReadErrorPolicy::Fallback`], `fallback` is asked for a
    /// substitute; `None` (no fallback for this read) propagates the error.
    ///
    /// # Errors
    ///
    /// Returns the original error when the policy is `Propagate` or when no
    /// substitute exists.
    pub fn recover<T>(
        self,
        result: Result<T, ConsoleError>,
        endpoint: &str,
        fallback: impl FnOnce() -> Option<T>,
    ) -> Result<T, ConsoleError> {
        match (self, result) {
            (_, Ok(value)) => Ok(value),
            (Self::Propagate, Err(err)) => Err(err),
            (Self::Fallback, Err(err)) => match fallback() {
                Some(value) => {
                    tracing::warn!(endpoint, error = %err, "read failed, serving fallback data");
                    Ok(value)
                }
                None => Err(err),
            },
        }
    }
}

impl fmt::Display for ReadErrorPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Propagate => f.write_str("propagate"),
            Self::Fallback => f.write_str("fallback"),
        }
    }
}

/// Error returned when parsing an unknown policy name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown read error policy `{0}` (expected `propagate` or `fallback`)")]
pub struct UnknownReadErrorPolicy(pub String);

impl FromStr for ReadErrorPolicy {
    type Err = UnknownReadErrorPolicy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "propagate" => Ok(Self::Propagate),
            "fallback" => Ok(Self::Fallback),
            other => Err(UnknownReadErrorPolicy(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn failure() -> Result<Vec<u8>, ConsoleError> {
        Err(ConsoleError::Transport {
            status: Some(503),
            message: "unavailable".to_string(),
        })
    }

    #[test]
    fn propagate_returns_error() {
        let result = ReadErrorPolicy::Propagate.recover(failure(), "/api/x", || Some(vec![1]));
        assert!(result.is_err());
    }

    #[test]
    fn fallback_substitutes_data() {
        let result = ReadErrorPolicy::Fallback.recover(failure(), "/api/x", || Some(vec![1]));
        assert_eq!(result.ok(), Some(vec![1]));
    }

    #[test]
    fn fallback_without_substitute_propagates() {
        let result = ReadErrorPolicy::Fallback.recover(failure(), "/api/x", || None);
        assert!(result.is_err());
    }

    #[test]
    fn success_is_untouched() {
        let result = ReadErrorPolicy::Fallback.recover(Ok(vec![7]), "/api/x", || Some(vec![1]));
        assert_eq!(result.ok(), Some(vec![7]));
    }

    #[test]
    fn parses_names() {
        assert_eq!("Fallback".parse(), Ok(ReadErrorPolicy::Fallback));
        assert_eq!(" propagate ".parse(), Ok(ReadErrorPolicy::Propagate));
        assert!("retry".parse::<ReadErrorPolicy>().is_err());
    }
}

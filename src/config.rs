//! Console configuration loaded from environment variables.
//!
//! All settings come from environment variables (or a `.env` file via
//! `dotenvy`):
//!
//! | Variable | Default |
//! |---|---|
//! | `STOREFRONT_API_URL` | `http://localhost:3000` |
//! | `STOREFRONT_API_TOKEN` | unset |
//! | `STOREFRONT_PAGE_SIZE` | `10` |
//! | `STOREFRONT_READ_ERROR_POLICY` | `propagate` |
//! | `STOREFRONT_NOTIFICATION_CAPACITY` | `256` |
//! | `STOREFRONT_ROLE` | `admin` |

use reqwest::Url;

use crate::service::ReadErrorPolicy;

const DEFAULT_API_URL: &str = "http://localhost:3000";

/// Error raised while loading [`ConsoleConfig`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// `STOREFRONT_API_URL` is not an absolute URL.
    #[error("invalid STOREFRONT_API_URL `{value}`: {reason}")]
    InvalidApiUrl {
        /// Raw value.
        value: String,
        /// Parser message.
        reason: String,
    },
}

/// Top-level console configuration.
///
/// Loaded once at startup via [`ConsoleConfig::from_env`].
#[derive(Debug, Clone)]
pub struct ConsoleConfig {
    /// Backend base URL; API paths are appended to it.
    pub api_url: Url,

    /// Bearer token sent with every request.
    pub api_token: Option<String>,

    /// Default page size of list views (at least 1).
    pub page_size: u32,

    /// What read endpoints do when the backend fails.
    pub read_error_policy: ReadErrorPolicy,

    /// Capacity of the notification broadcast channel.
    pub notification_capacity: usize,

    /// Role the console acts as (`admin`, `manager`, anything else is
    /// read-only).
    pub role: String,
}

impl ConsoleConfig {
    /// Loads configuration from environment variables.
    ///
    /// Falls back to defaults when a variable is missing or invalid.
    /// Calls `dotenvy::dotenv().ok()` to optionally load a `.env` file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidApiUrl`] if `STOREFRONT_API_URL` is
    /// set but cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary variable source.
    ///
    /// # Errors
    ///
    /// See [`ConsoleConfig::from_env`].
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let raw_url = lookup("STOREFRONT_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string());
        let api_url = Url::parse(raw_url.trim()).map_err(|e| ConfigError::InvalidApiUrl {
            value: raw_url.clone(),
            reason: e.to_string(),
        })?;

        let api_token = lookup("STOREFRONT_API_TOKEN").filter(|t| !t.trim().is_empty());
        let page_size = parse_var(&lookup, "STOREFRONT_PAGE_SIZE", 10_u32).max(1);
        let read_error_policy = parse_var(
            &lookup,
            "STOREFRONT_READ_ERROR_POLICY",
            ReadErrorPolicy::Propagate,
        );
        let notification_capacity = parse_var(&lookup, "STOREFRONT_NOTIFICATION_CAPACITY", 256);
        let role = lookup("STOREFRONT_ROLE")
            .map(|r| r.trim().to_string())
            .filter(|r| !r.is_empty())
            .unwrap_or_else(|| "admin".to_string());

        Ok(Self {
            api_url,
            api_token,
            page_size,
            read_error_policy,
            notification_capacity,
            role,
        })
    }
}

/// Parses a variable as `T`, returning `default` on missing or invalid
/// values.
fn parse_var<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: T,
) -> T {
    lookup(key)
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

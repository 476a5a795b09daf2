//! `reqwest`-backed transport.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::{Client, Url};
use serde_json::Value;

use crate::error::FailureInfo;
use crate::ports::{ApiRequest, CredentialsProvider, Method, Transport};

/// HTTP transport sending JSON requests to the storefront backend.
///
/// The bearer token is read from the injected [`CredentialsProvider`] on
/// every request. No timeout or retry is applied here; failures surface
/// immediately to the caller.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    base_url: Url,
    credentials: Arc<dyn CredentialsProvider>,
}

impl HttpTransport {
    /// Creates a transport for the given backend base URL.
    #[must_use]
    pub fn new(base_url: Url, credentials: Arc<dyn CredentialsProvider>) -> Self {
        Self::with_client(Client::new(), base_url, credentials)
    }

    /// Creates a transport reusing an existing `reqwest` client.
    #[must_use]
    pub fn with_client(
        client: Client,
        base_url: Url,
        credentials: Arc<dyn CredentialsProvider>,
    ) -> Self {
        Self {
            client,
            base_url,
            credentials,
        }
    }

    /// Resolves an API path and its query parameters against the base URL.
    ///
    /// A path prefix on the base URL is kept, so `http://host/shop` plus
    /// `/api/order-statuses` yields `http://host/shop/api/order-statuses`.
    #[must_use]
    pub fn endpoint_url(&self, path: &str, params: &[(String, String)]) -> Url {
        let mut url = self.base_url.clone();
        let prefix = self.base_url.path().trim_end_matches('/');
        url.set_path(&format!("{prefix}/{}", path.trim_start_matches('/')));
        url.set_query(None);
        if !params.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in params {
                pairs.append_pair(key, value);
            }
        }
        url
    }
}

fn http_method(method: Method) -> reqwest::Method {
    match method {
        Method::Get => reqwest::Method::GET,
        Method::Post => reqwest::Method::POST,
        Method::Put => reqwest::Method::PUT,
        Method::Delete => reqwest::Method::DELETE,
    }
}

/// Parses a response body: empty means `Null`, otherwise JSON.
fn parse_body(text: &str) -> Result<Value, serde_json::Error> {
    if text.trim().is_empty() {
        Ok(Value::Null)
    } else {
        serde_json::from_str(text)
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn request(&self, request: ApiRequest) -> Result<Value, FailureInfo> {
        let url = self.endpoint_url(&request.path, &request.params);
        let mut builder = self.client.request(http_method(request.method), url);
        if let Some(token) = self.credentials.bearer_token() {
            builder = builder.bearer_auth(token);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await.map_err(|e| {
            tracing::debug!(
                method = %request.method,
                path = %request.path,
                error = %e,
                "request failed"
            );
            FailureInfo::network(e.to_string())
        })?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| FailureInfo::network(format!("failed to read response body: {e}")))?;

        if status.is_success() {
            parse_body(&text).map_err(|e| FailureInfo {
                status: Some(status.as_u16()),
                body: None,
                detail: Some(format!("invalid JSON in response: {e}")),
            })
        } else {
            tracing::debug!(
                method = %request.method,
                path = %request.path,
                status = status.as_u16(),
                "backend returned an error"
            );
            // Non-JSON error pages are kept as text so their message survives.
            let body = match parse_body(&text) {
                Ok(Value::Null) => None,
                Ok(json) => Some(json),
                Err(_) => Some(Value::String(text)),
            };
            Err(FailureInfo::from_status(status.as_u16(), body))
        }
    }
}

//! Request transport contract.

use std::fmt;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::FailureInfo;

/// HTTP verb used by the services.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    /// `GET`
    Get,
    /// `POST`
    Post,
    /// `PUT`
    Put,
    /// `DELETE`
    Delete,
}

impl Method {
    /// Upper-case verb as sent on the wire.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One backend call: verb, absolute API path, optional JSON body and
/// query parameters. Parameter values are always strings on the wire.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    /// HTTP verb.
    pub method: Method,
    /// Path starting with `/api/`.
    pub path: String,
    /// JSON body for `POST`/`PUT`.
    pub body: Option<Value>,
    /// Query parameters in insertion order.
    pub params: Vec<(String, String)>,
}

impl ApiRequest {
    /// Creates a request without body or parameters.
    #[must_use]
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            body: None,
            params: Vec::new(),
        }
    }

    /// Shorthand for a `GET` request.
    #[must_use]
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::Get, path)
    }

    /// Shorthand for a `DELETE` request.
    #[must_use]
    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::Delete, path)
    }

    /// Attaches a JSON body.
    #[must_use]
    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Appends a query parameter.
    #[must_use]
    pub fn param(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.params.push((key.into(), value.to_string()));
        self
    }

    /// Looks up a query parameter by name.
    #[must_use]
    pub fn param_value(&self, key: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// Asynchronous request transport.
///
/// Resolves to the decoded JSON body on 2xx (or `Value::Null` for an empty
/// body) and to a [`FailureInfo`] for network errors and non-2xx answers.
#[async_trait]
pub trait Transport: Send + Sync + fmt::Debug {
    /// Sends one request to the backend.
    async fn request(&self, request: ApiRequest) -> Result<Value, FailureInfo>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn params_are_stringified_in_order() {
        let request = ApiRequest::get("/api/payment-methods")
            .param("page", 2)
            .param("limit", 10);
        assert_eq!(
            request.params,
            vec![
                ("page".to_string(), "2".to_string()),
                ("limit".to_string(), "10".to_string())
            ]
        );
        assert_eq!(request.param_value("limit"), Some("10"));
        assert_eq!(request.param_value("sort"), None);
    }

    #[test]
    fn method_display_is_upper_case() {
        assert_eq!(Method::Delete.to_string(), "DELETE");
    }
}

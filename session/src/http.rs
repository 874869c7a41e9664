//! Transport seam for outbound HTTP.
//!
//! The browser build implements `HttpTransport` with `gloo-net`; tests use
//! scripted mocks. Futures are `?Send` because browser fetch futures hold JS
//! values.

#[cfg(test)]
#[path = "http_test.rs"]
mod http_test;

use serde::de::DeserializeOwned;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        }
    }
}

/// A fully resolved outbound request.
#[derive(Clone, Debug, PartialEq)]
pub struct HttpRequest {
    pub method: Method,
    /// Absolute URL.
    pub url: String,
    /// Bearer credential for the `Authorization` header, if any.
    pub bearer: Option<String>,
    /// JSON body; sent with `Content-Type: application/json` when present.
    pub body: Option<serde_json::Value>,
}

impl HttpRequest {
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self { method, url: url.into(), bearer: None, body: None }
    }

    #[must_use]
    pub fn with_bearer(mut self, token: Option<String>) -> Self {
        self.bearer = token;
        self
    }

    #[must_use]
    pub fn with_json(mut self, body: serde_json::Value) -> Self {
        self.body = Some(body);
        self
    }

    /// `Authorization` header value, when a bearer token is attached.
    #[must_use]
    pub fn authorization(&self) -> Option<String> {
        self.bearer
            .as_deref()
            .map(|token| format!("Bearer {token}"))
    }
}

/// Status and raw body of a completed request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self { status, body: body.into() }
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Decode the body as JSON.
    ///
    /// # Errors
    ///
    /// Returns the serde error when the body does not match `T`.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_str(&self.body)
    }
}

/// Sends requests. Errors are transport-level failures (no response at all);
/// any HTTP status, including 4xx/5xx, is an `Ok` response.
#[async_trait::async_trait(?Send)]
pub trait HttpTransport: Send + Sync {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, String>;
}

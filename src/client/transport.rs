//! The transport collaborator boundary.
//!
//! This module defines [`Transport`], the narrow interface the engine needs
//! from whatever performs the actual network send, plus [`HttpTransport`],
//! the default implementation over `reqwest`.
//!
//! The trait is deliberately minimal — "send method, URL, headers, body;
//! receive status, headers, body" — so tests and embedders can substitute
//! their own transport without touching the engine. Timeouts, proxies, and
//! connection pooling are all configured on the transport, not the engine.

use std::collections::HashMap;

use async_trait::async_trait;

use crate::client::errors::TransportError;
use crate::client::request::Method;
use crate::client::response::TransportResponse;

/// The component that performs the actual network send.
///
/// Implementations must be safe to share across tasks; one transport is
/// typically reused for the lifetime of a client. Cancellation of the
/// calling future must abort the outstanding network operation without
/// other side effects.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Sends one request and awaits its response.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError`] for network failures, timeouts, and
    /// cancellations. Non-2xx statuses are not transport errors; they come
    /// back as a normal [`TransportResponse`] for the executor to map.
    async fn send(
        &self,
        method: Method,
        url: &str,
        headers: &HashMap<String, String>,
        body: Option<&[u8]>,
    ) -> Result<TransportResponse, TransportError>;
}

/// The default transport over a shared `reqwest` client.
///
/// # Thread Safety
///
/// `HttpTransport` is `Send + Sync`; clone the wrapping `Arc` to share it.
///
/// # Example
///
/// ```rust
/// use odata_client::client::HttpTransport;
///
/// let transport = HttpTransport::new();
/// ```
#[derive(Debug)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    /// Creates a transport with a freshly built `reqwest` client.
    ///
    /// # Panics
    ///
    /// Panics if the underlying `reqwest` client cannot be created. This
    /// should only happen in extremely unusual circumstances (e.g., TLS
    /// initialization failure).
    #[must_use]
    pub fn new() -> Self {
        let client = reqwest::Client::builder()
            .use_rustls_tls()
            .build()
            .expect("Failed to create HTTP client");
        Self { client }
    }

    /// Creates a transport over an existing `reqwest` client.
    ///
    /// Use this to control timeouts, proxies, or connection pooling.
    #[must_use]
    pub const fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

impl Default for HttpTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(
        &self,
        method: Method,
        url: &str,
        headers: &HashMap<String, String>,
        body: Option<&[u8]>,
    ) -> Result<TransportResponse, TransportError> {
        let mut builder = match method {
            Method::Get => self.client.get(url),
            Method::Post => self.client.post(url),
            Method::Patch => self.client.patch(url),
            Method::Delete => self.client.delete(url),
        };

        for (name, value) in headers {
            builder = builder.header(name, value);
        }

        if let Some(body) = body {
            builder = builder.body(body.to_vec());
        }

        let response = builder.send().await?;

        let status = response.status().as_u16();
        let headers = collect_headers(response.headers());
        let body = response.bytes().await?.to_vec();

        Ok(TransportResponse::new(status, headers, body))
    }
}

/// Collects response headers into a multi-value map.
fn collect_headers(headers: &reqwest::header::HeaderMap) -> HashMap<String, Vec<String>> {
    let mut result: HashMap<String, Vec<String>> = HashMap::new();
    for (name, value) in headers {
        let value = value.to_str().unwrap_or_default().to_string();
        result.entry(name.as_str().to_string()).or_default().push(value);
    }
    result
}

// Verify HttpTransport is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<HttpTransport>();
};

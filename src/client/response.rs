//! The wire response as seen by the engine.
//!
//! This module provides [`TransportResponse`], the raw status, headers, and
//! body bytes handed back by the transport collaborator. Interpretation —
//! status mapping and body decoding — happens in the executor, not here.

use std::collections::HashMap;

/// One raw response from the transport collaborator.
///
/// Header names are lower-cased on construction so lookups are
/// case-insensitive; headers may carry multiple values.
///
/// # Example
///
/// ```rust
/// use odata_client::client::TransportResponse;
/// use std::collections::HashMap;
///
/// let response = TransportResponse::new(204, HashMap::new(), Vec::new());
///
/// assert!(response.is_success());
/// assert!(response.body.is_empty());
/// ```
#[derive(Clone, Debug)]
pub struct TransportResponse {
    /// The HTTP status code.
    pub status: u16,
    /// Response headers with lower-cased names.
    pub headers: HashMap<String, Vec<String>>,
    /// The raw body bytes; empty when the response carried no body.
    pub body: Vec<u8>,
}

impl TransportResponse {
    /// Creates a response, lower-casing header names.
    #[must_use]
    pub fn new(status: u16, headers: HashMap<String, Vec<String>>, body: Vec<u8>) -> Self {
        let headers = headers
            .into_iter()
            .map(|(name, values)| (name.to_lowercase(), values))
            .collect();
        Self {
            status,
            headers,
            body,
        }
    }

    /// Returns `true` if the status code is in the 2xx range.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status <= 299
    }

    /// Returns the first value of a header, if present.
    ///
    /// The name is matched case-insensitively.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_lowercase())
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    /// Returns the body as text, replacing invalid UTF-8.
    #[must_use]
    pub fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

// Verify TransportResponse is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<TransportResponse>();
};

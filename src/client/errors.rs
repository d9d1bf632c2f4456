//! Transport-level error types.
//!
//! This module contains error types for the wire layer: request descriptors
//! that fail their invariants before sending, and failures raised by the
//! transport collaborator itself.

use thiserror::Error;

/// Error returned when a request descriptor fails validation.
///
/// Descriptors produced by the command compiler always satisfy these
/// invariants; this error surfaces only for hand-built descriptors.
///
/// # Example
///
/// ```rust
/// use odata_client::client::{InvalidRequestError, Method, RequestDescriptor};
///
/// let result = RequestDescriptor::builder(Method::Post, "Products").build();
///
/// assert!(matches!(
///     result,
///     Err(InvalidRequestError::MissingBody { .. })
/// ));
/// ```
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvalidRequestError {
    /// A POST or PATCH request was built without a body.
    #[error("cannot use {method} without a request body")]
    MissingBody {
        /// The method that requires a body.
        method: String,
    },

    /// A GET or DELETE request was built with a body.
    #[error("cannot attach a request body to {method}")]
    UnexpectedBody {
        /// The method that forbids a body.
        method: String,
    },
}

/// Error raised by the transport collaborator.
///
/// Network failures, timeouts, and cancellations all surface through this
/// one opaque type; the engine does not distinguish between them and never
/// retries on its own.
///
/// # Example
///
/// ```rust
/// use odata_client::client::TransportError;
///
/// let error = TransportError::new("connection reset by peer");
/// assert!(error.to_string().contains("connection reset"));
/// ```
#[derive(Debug, Error)]
#[error("transport failure: {message}")]
pub struct TransportError {
    /// A human-readable description of the failure.
    message: String,
    /// The underlying cause, when one is available.
    #[source]
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl TransportError {
    /// Creates a transport error from a message alone.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }

    /// Creates a transport error wrapping an underlying cause.
    #[must_use]
    pub fn with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Returns the failure description.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<reqwest::Error> for TransportError {
    fn from(error: reqwest::Error) -> Self {
        let message = if error.is_timeout() {
            "request timed out".to_string()
        } else {
            error.to_string()
        };
        Self {
            message,
            source: Some(Box::new(error)),
        }
    }
}

// Verify error types are Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<InvalidRequestError>();
    assert_send_sync::<TransportError>();
};

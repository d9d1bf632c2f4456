//! The wire request description.
//!
//! This module provides [`RequestDescriptor`], the immutable value
//! describing one request to the service: method, resource URL, headers,
//! and optional body. Descriptors are produced by the command compiler and
//! consumed exactly once by the transport.

use std::collections::HashMap;
use std::fmt;

use crate::client::errors::InvalidRequestError;

/// HTTP methods the engine maps its operations onto.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Method {
    /// HTTP GET, used by find operations.
    Get,
    /// HTTP POST, used by insert operations.
    Post,
    /// HTTP PATCH, used by partial updates.
    Patch,
    /// HTTP DELETE, used by delete operations.
    Delete,
}

impl Method {
    /// Returns `true` for methods that carry a request body.
    #[must_use]
    pub const fn has_body(self) -> bool {
        matches!(self, Self::Post | Self::Patch)
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Get => write!(f, "get"),
            Self::Post => write!(f, "post"),
            Self::Patch => write!(f, "patch"),
            Self::Delete => write!(f, "delete"),
        }
    }
}

/// One fully-resolved wire request, ready for the transport.
///
/// A descriptor is constructed once per terminal operation and never
/// modified afterwards. The URL is relative to the service root; the
/// executor absolutizes it and merges in default headers and credentials
/// before dispatch.
///
/// # Example
///
/// ```rust
/// use odata_client::client::{Method, RequestDescriptor};
/// use serde_json::json;
///
/// let descriptor = RequestDescriptor::builder(Method::Post, "Products")
///     .body(json!({"Name": "Test1"}))
///     .build()
///     .unwrap();
///
/// assert_eq!(descriptor.method, Method::Post);
/// assert_eq!(descriptor.url, "Products");
/// ```
#[derive(Clone, Debug)]
pub struct RequestDescriptor {
    /// The HTTP method for this request.
    pub method: Method,
    /// The service-root-relative resource URL, including the query string.
    pub url: String,
    /// Headers specific to this request.
    pub headers: HashMap<String, String>,
    /// The wire-format body, if any.
    pub body: Option<serde_json::Value>,
}

impl RequestDescriptor {
    /// Creates a new builder for constructing a descriptor.
    #[must_use]
    pub fn builder(method: Method, url: impl Into<String>) -> RequestDescriptorBuilder {
        RequestDescriptorBuilder::new(method, url)
    }

    /// Validates the descriptor against its method's body contract.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidRequestError`] if a POST/PATCH descriptor has no
    /// body, or a GET/DELETE descriptor has one.
    pub fn verify(&self) -> Result<(), InvalidRequestError> {
        if self.method.has_body() && self.body.is_none() {
            return Err(InvalidRequestError::MissingBody {
                method: self.method.to_string(),
            });
        }
        if !self.method.has_body() && self.body.is_some() {
            return Err(InvalidRequestError::UnexpectedBody {
                method: self.method.to_string(),
            });
        }
        Ok(())
    }
}

/// Builder for [`RequestDescriptor`] instances.
#[derive(Debug)]
pub struct RequestDescriptorBuilder {
    method: Method,
    url: String,
    headers: HashMap<String, String>,
    body: Option<serde_json::Value>,
}

impl RequestDescriptorBuilder {
    fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: HashMap::new(),
            body: None,
        }
    }

    /// Sets the request body.
    ///
    /// Setting a body also sets the `Content-Type` header to
    /// `application/json`.
    #[must_use]
    pub fn body(mut self, body: serde_json::Value) -> Self {
        self.body = Some(body);
        self.headers
            .insert("Content-Type".to_string(), "application/json".to_string());
        self
    }

    /// Adds a single header.
    #[must_use]
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Builds the descriptor, validating it in the process.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidRequestError`] if the descriptor fails validation.
    pub fn build(self) -> Result<RequestDescriptor, InvalidRequestError> {
        let descriptor = RequestDescriptor {
            method: self.method,
            url: self.url,
            headers: self.headers,
            body: self.body,
        };
        descriptor.verify()?;
        Ok(descriptor)
    }
}

// Verify request types are Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Method>();
    assert_send_sync::<RequestDescriptor>();
};

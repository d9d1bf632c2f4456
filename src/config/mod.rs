//! Configuration types for the client engine.
//!
//! This module provides the types used to point the engine at a service:
//!
//! - [`ServiceConfig`]: the full engine configuration
//! - [`ServiceConfigBuilder`]: a builder for constructing configurations
//! - [`ServiceRoot`]: a validated service root URL newtype
//!
//! # Example
//!
//! ```rust
//! use odata_client::{Credentials, ServiceConfig, ServiceRoot};
//!
//! let config = ServiceConfig::builder()
//!     .service_root(ServiceRoot::new("https://services.example.org/V2/OData").unwrap())
//!     .credentials(Credentials::basic("user", "secret"))
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(
//!     config.service_root().as_str(),
//!     "https://services.example.org/V2/OData"
//! );
//! ```

use crate::auth::Credentials;
use crate::error::ConfigError;

/// A validated service root URL.
///
/// The root must be an absolute `http` or `https` URL; a trailing slash is
/// stripped so resource paths can be appended uniformly.
///
/// # Example
///
/// ```rust
/// use odata_client::ServiceRoot;
///
/// let root = ServiceRoot::new("https://services.example.org/V2/OData/").unwrap();
/// assert_eq!(root.as_str(), "https://services.example.org/V2/OData");
///
/// assert!(ServiceRoot::new("example.org").is_err());
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ServiceRoot(String);

impl ServiceRoot {
    /// Creates a validated service root.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidServiceRoot`] if the URL has no
    /// `http`/`https` scheme or no host.
    pub fn new(url: impl Into<String>) -> Result<Self, ConfigError> {
        let url = url.into();
        let rest = url
            .strip_prefix("https://")
            .or_else(|| url.strip_prefix("http://"));
        match rest {
            Some(rest) if !rest.is_empty() && !rest.starts_with('/') => {
                Ok(Self(url.trim_end_matches('/').to_string()))
            }
            _ => Err(ConfigError::InvalidServiceRoot { url }),
        }
    }

    /// Returns the root URL without a trailing slash.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for ServiceRoot {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Configuration for the client engine.
///
/// # Thread Safety
///
/// `ServiceConfig` is `Clone`, `Send`, and `Sync`, making it safe to share
/// across threads and async tasks.
#[derive(Clone, Debug)]
pub struct ServiceConfig {
    service_root: ServiceRoot,
    credentials: Credentials,
    user_agent_prefix: Option<String>,
}

impl ServiceConfig {
    /// Creates a new builder for constructing a `ServiceConfig`.
    #[must_use]
    pub fn builder() -> ServiceConfigBuilder {
        ServiceConfigBuilder::new()
    }

    /// Returns the service root.
    #[must_use]
    pub const fn service_root(&self) -> &ServiceRoot {
        &self.service_root
    }

    /// Returns the credentials attached to every request.
    #[must_use]
    pub const fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Returns the configured user-agent prefix, if any.
    #[must_use]
    pub fn user_agent_prefix(&self) -> Option<&str> {
        self.user_agent_prefix.as_deref()
    }
}

/// Builder for [`ServiceConfig`] instances.
#[derive(Debug, Default)]
pub struct ServiceConfigBuilder {
    service_root: Option<ServiceRoot>,
    credentials: Credentials,
    user_agent_prefix: Option<String>,
}

impl ServiceConfigBuilder {
    fn new() -> Self {
        Self::default()
    }

    /// Sets the service root (required).
    #[must_use]
    pub fn service_root(mut self, service_root: ServiceRoot) -> Self {
        self.service_root = Some(service_root);
        self
    }

    /// Sets the credentials attached to every request.
    ///
    /// Defaults to [`Credentials::None`].
    #[must_use]
    pub fn credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = credentials;
        self
    }

    /// Sets a prefix for the `User-Agent` header.
    #[must_use]
    pub fn user_agent_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.user_agent_prefix = Some(prefix.into());
        self
    }

    /// Builds the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingRequiredField`] if no service root was
    /// set.
    pub fn build(self) -> Result<ServiceConfig, ConfigError> {
        let service_root = self.service_root.ok_or(ConfigError::MissingRequiredField {
            field: "service_root",
        })?;
        Ok(ServiceConfig {
            service_root,
            credentials: self.credentials,
            user_agent_prefix: self.user_agent_prefix,
        })
    }
}

// Verify config types are Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ServiceRoot>();
    assert_send_sync::<ServiceConfig>();
};

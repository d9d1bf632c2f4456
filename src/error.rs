//! Configuration error types.
//!
//! This module contains the errors raised while constructing and validating
//! engine configuration.
//!
//! # Error Handling
//!
//! All configuration constructors return `Result<T, ConfigError>` to enable
//! fail-fast validation before any network activity.
//!
//! # Example
//!
//! ```rust
//! use odata_client::{ConfigError, ServiceRoot};
//!
//! let result = ServiceRoot::new("not-a-url");
//! assert!(matches!(result, Err(ConfigError::InvalidServiceRoot { .. })));
//! ```

use thiserror::Error;

/// Errors that can occur during engine configuration.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The service root URL is invalid.
    #[error("Invalid service root '{url}'. Please provide an absolute URL with scheme (e.g., 'https://services.example.org/V2/OData').")]
    InvalidServiceRoot {
        /// The invalid URL that was provided.
        url: String,
    },

    /// A required field is missing.
    #[error("Missing required field: '{field}'. This field must be set before building the configuration.")]
    MissingRequiredField {
        /// The name of the missing field.
        field: &'static str,
    },
}

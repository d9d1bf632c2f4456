//! Credential attachment for outgoing requests.
//!
//! This module provides [`Credentials`], the opaque capability the engine
//! attaches to every request. The engine never inspects or logs credential
//! contents — it only asks the credentials to contribute headers.

use std::collections::HashMap;
use std::fmt;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;

/// Credentials attached to outgoing requests.
///
/// Credentials contribute an `Authorization` header and nothing else; the
/// engine passes them through unopened. `Debug` output redacts secret
/// material so credentials can never leak through logging.
///
/// # Example
///
/// ```rust
/// use odata_client::Credentials;
/// use std::collections::HashMap;
///
/// let credentials = Credentials::basic("user", "secret");
///
/// let mut headers = HashMap::new();
/// credentials.apply(&mut headers);
/// assert!(headers["Authorization"].starts_with("Basic "));
///
/// // Secrets never appear in debug output
/// assert!(!format!("{credentials:?}").contains("secret"));
/// ```
#[derive(Clone, Default, PartialEq, Eq)]
pub enum Credentials {
    /// No credentials; requests are sent anonymously.
    #[default]
    None,
    /// A basic-auth username/password pair.
    Basic {
        /// The username.
        username: String,
        /// The password.
        password: String,
    },
    /// An opaque bearer token.
    Bearer(String),
}

impl Credentials {
    /// Creates basic-auth credentials.
    #[must_use]
    pub fn basic(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self::Basic {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Creates bearer-token credentials.
    #[must_use]
    pub fn bearer(token: impl Into<String>) -> Self {
        Self::Bearer(token.into())
    }

    /// Contributes this credential's headers to an outgoing request.
    pub fn apply(&self, headers: &mut HashMap<String, String>) {
        match self {
            Self::None => {}
            Self::Basic { username, password } => {
                let encoded = STANDARD.encode(format!("{username}:{password}"));
                headers.insert("Authorization".to_string(), format!("Basic {encoded}"));
            }
            Self::Bearer(token) => {
                headers.insert("Authorization".to_string(), format!("Bearer {token}"));
            }
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => write!(f, "Credentials::None"),
            Self::Basic { username, .. } => f
                .debug_struct("Credentials::Basic")
                .field("username", username)
                .field("password", &"********")
                .finish(),
            Self::Bearer(_) => write!(f, "Credentials::Bearer(********)"),
        }
    }
}

// Verify Credentials is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Credentials>();
};

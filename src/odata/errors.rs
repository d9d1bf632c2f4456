//! Error types for the command engine.
//!
//! The engine distinguishes four failure families:
//!
//! - [`ValidationError`]: a malformed command chain, raised synchronously
//!   when the chain is compiled, before any network activity
//! - [`ODataError::NotFound`] / [`ODataError::Protocol`]: non-success
//!   statuses from the service, carrying the status and raw body verbatim
//! - [`DecodeError`]: a success status whose body does not parse into the
//!   expected shape
//! - [`ODataError::Transport`]: opaque network failures forwarded from the
//!   transport collaborator
//!
//! Validation and decode failures indicate a contract violation and are
//! never retried; the engine retries nothing on its own — retry policy
//! belongs to the caller.

use thiserror::Error;

use crate::client::{InvalidRequestError, TransportError};

/// A malformed command chain, detected before any network activity.
///
/// # Example
///
/// ```rust
/// use odata_client::{compile, Command, ValidationError, Verb};
///
/// let chain = Command::for_collection("Products").key(1);
/// let result = compile(&chain, Verb::Insert);
///
/// assert!(matches!(
///     result,
///     Err(ValidationError::KeyNotAllowed { verb: "insert" })
/// ));
/// ```
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The operation addresses a whole collection and forbids a key.
    #[error("{verb} targets a collection and cannot take a key")]
    KeyNotAllowed {
        /// The terminal verb being compiled.
        verb: &'static str,
    },

    /// The operation needs a key or filter to address its target.
    #[error("{verb} requires a key or a filter addressing a single entity")]
    MissingTarget {
        /// The terminal verb being compiled.
        verb: &'static str,
    },

    /// The operation needs property values to send.
    #[error("{verb} requires property values to send")]
    MissingPayload {
        /// The terminal verb being compiled.
        verb: &'static str,
    },

    /// A key component was `null`.
    #[error("null cannot be used as a key component")]
    NullKeyComponent,

    /// A key component has no scalar literal form.
    #[error("a {kind} value cannot be used as a key component")]
    UnsupportedKeyComponent {
        /// The kind name of the offending value.
        kind: &'static str,
    },

    /// The collection name was empty.
    #[error("collection name cannot be empty")]
    EmptyCollection,

    /// The compiled descriptor violated the wire request contract.
    #[error(transparent)]
    Request(#[from] InvalidRequestError),
}

/// A success status whose body did not decode into the expected shape.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The body was not valid JSON.
    #[error("response body is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The body parsed but did not have the expected shape.
    #[error("expected {expected} in response body")]
    UnexpectedShape {
        /// A description of the expected shape.
        expected: &'static str,
    },

    /// A response that must carry a body carried none.
    #[error("success response carried no body to decode")]
    MissingBody,
}

/// Unified error type for terminal operations.
///
/// # Example
///
/// ```rust,ignore
/// match client.find_one(&command).await {
///     Ok(Some(entry)) => println!("found: {entry:?}"),
///     Ok(None) => println!("no entity"),
///     Err(ODataError::Protocol { status, body }) => {
///         eprintln!("service returned {status}: {body}");
///     }
///     Err(e) => eprintln!("operation failed: {e}"),
/// }
/// ```
#[derive(Debug, Error)]
pub enum ODataError {
    /// The command chain failed validation before sending.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The addressed entity does not exist (404 on update or delete).
    #[error("no {collection} entity addressed by {target}")]
    NotFound {
        /// The target collection.
        collection: String,
        /// The key literal or filter predicate that addressed the entity.
        target: String,
    },

    /// The service returned a non-success status.
    ///
    /// The body is carried verbatim and never re-interpreted.
    #[error("service returned status {status}")]
    Protocol {
        /// The HTTP status code.
        status: u16,
        /// The raw response body.
        body: String,
    },

    /// A success response whose body failed to decode.
    #[error(transparent)]
    Decode(#[from] DecodeError),

    /// A network failure, timeout, or cancellation from the transport.
    #[error(transparent)]
    Transport(#[from] TransportError),
}

impl ODataError {
    /// Returns the protocol status code, when this error carries one.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Protocol { status, .. } => Some(*status),
            _ => None,
        }
    }
}

// Verify error types are Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ValidationError>();
    assert_send_sync::<DecodeError>();
    assert_send_sync::<ODataError>();
};

//! The wire layer: request descriptors, raw responses, and transport.
//!
//! This module holds everything below the command engine:
//!
//! - [`RequestDescriptor`]: the immutable description of one wire request
//! - [`TransportResponse`]: the raw status/headers/body a send produces
//! - [`Transport`]: the narrow async interface to the network collaborator
//! - [`HttpTransport`]: the default `reqwest`-backed transport
//! - [`TransportError`] / [`InvalidRequestError`]: wire-layer failures
//!
//! The engine compiles commands into descriptors, hands them to a
//! transport, and maps the raw response into typed outcomes one layer up.

mod errors;
mod request;
mod response;
mod transport;

pub use errors::{InvalidRequestError, TransportError};
pub use request::{Method, RequestDescriptor, RequestDescriptorBuilder};
pub use response::TransportResponse;
pub use transport::{HttpTransport, Transport};

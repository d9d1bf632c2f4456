//! The command engine: fluent chains, compilation, and execution.
//!
//! This module is the heart of the crate:
//!
//! - [`Command`]: the immutable fluent chain accumulating operation intent
//! - [`compile`] / [`Verb`]: turning a terminal chain into one
//!   [`RequestDescriptor`](crate::client::RequestDescriptor)
//! - [`build_url`]: the pure, deterministic resource URL builder
//! - [`diff_entries`] / [`TrackedEntry`]: whole-object diffing for
//!   implicit updates
//! - [`ODataClient`]: the async executor mapping statuses to outcomes
//! - [`ODataError`] and friends: the failure taxonomy
//!
//! # Example
//!
//! ```rust,ignore
//! use odata_client::{Command, Entry, ODataClient};
//!
//! // Insert, then change one property of the created entity.
//! let created = client
//!     .insert(&Command::for_collection("Products").set(
//!         Entry::new().with("Name", "Test1").with("Price", 18),
//!     ))
//!     .await?;
//!
//! let updated = client
//!     .update(
//!         &Command::for_collection("Products")
//!             .key(1)
//!             .set(Entry::new().with("Price", 123)),
//!     )
//!     .await?;
//! ```

mod command;
mod compile;
mod diff;
mod errors;
mod executor;
mod url;

pub use command::Command;
pub use compile::{compile, Verb};
pub use diff::{diff_entries, TrackedEntry};
pub use errors::{DecodeError, ODataError, ValidationError};
pub use executor::{ODataClient, SDK_VERSION};
pub use url::build_url;

//! # OData Client Engine for Rust
//!
//! A client-side engine for interacting with collection-oriented,
//! URL-addressed REST services: fluent command chains accumulate operation
//! intent, a compiler turns them into protocol-correct wire requests, and
//! an async executor decodes responses into dynamically-typed entries.
//!
//! ## Overview
//!
//! This crate provides:
//! - An immutable fluent command chain via [`Command`]
//! - A pure, deterministic resource URL builder via [`build_url`]
//! - Dynamically-typed entities via [`Entry`], [`Value`], and [`Key`]
//! - Whole-object diffing for implicit updates via [`TrackedEntry`]
//! - An async executor with typed outcomes via [`ODataClient`]
//! - A narrow, swappable transport boundary via [`client::Transport`]
//!
//! ## Quick Start
//!
//! ```rust
//! use odata_client::{Command, Entry, ServiceConfig, ServiceRoot};
//!
//! // Point the engine at a service
//! let config = ServiceConfig::builder()
//!     .service_root(ServiceRoot::new("https://services.example.org/V2/OData").unwrap())
//!     .build()
//!     .unwrap();
//!
//! // Accumulate intent; nothing is sent until a terminal call
//! let command = Command::for_collection("Products")
//!     .set(Entry::new().with("Name", "Test1").with("Price", 18));
//! ```
//!
//! ## Executing Commands
//!
//! ```rust,ignore
//! use odata_client::{Command, Entry, ODataClient};
//!
//! let client = ODataClient::new(&config);
//!
//! // Insert a new entity
//! let created = client
//!     .insert(&Command::for_collection("Products").set(
//!         Entry::new().with("Name", "Test1").with("Price", 18),
//!     ))
//!     .await?;
//!
//! // Probe for absence: a missing entity is Ok(None), not an error
//! let found = client
//!     .find_one(&Command::for_collection("Products").key(1))
//!     .await?;
//!
//! // Change exactly one property
//! client
//!     .update(
//!         &Command::for_collection("Products")
//!             .key(1)
//!             .set(Entry::new().with("Price", 123)),
//!     )
//!     .await?;
//! ```
//!
//! ## Whole-Object Updates
//!
//! When a caller edits a full entity snapshot instead of naming the
//! properties to change, [`TrackedEntry`] computes the minimal property
//! set to send:
//!
//! ```rust,ignore
//! use odata_client::{Command, TrackedEntry};
//!
//! let observed = client
//!     .find_one(&Command::for_collection("Products").key(1))
//!     .await?
//!     .expect("entity exists");
//!
//! let mut tracked = TrackedEntry::from_existing(observed);
//! tracked.insert("Price", 123);
//!
//! // Sends {"Price": 123} and nothing else
//! client
//!     .update(&Command::for_collection("Products").key(1).set_tracked(&tracked))
//!     .await?;
//! ```
//!
//! ## Design Principles
//!
//! - **No global state**: configuration is instance-based and passed explicitly
//! - **Immutable chains**: fluent calls return new values with structural
//!   sharing; concurrent use needs no coordination
//! - **Fail-fast validation**: malformed chains fail at compile time,
//!   before any network activity
//! - **Narrow collaborators**: transport, credentials, and the wire codec
//!   sit behind small interfaces the engine never reaches around
//! - **Async-first**: designed for the Tokio runtime; one suspension point
//!   per operation, at the network boundary

pub mod auth;
pub mod client;
pub mod config;
pub mod data;
pub mod error;
pub mod odata;

// Re-export public types at crate root for convenience
pub use auth::Credentials;
pub use config::{ServiceConfig, ServiceConfigBuilder, ServiceRoot};
pub use data::{Entry, Key, Value};
pub use error::ConfigError;

// Re-export the wire layer types used at API boundaries
pub use client::{
    HttpTransport, InvalidRequestError, Method, RequestDescriptor, RequestDescriptorBuilder,
    Transport, TransportError, TransportResponse,
};

// Re-export the command engine
pub use odata::{
    build_url, compile, diff_entries, Command, DecodeError, ODataClient, ODataError, TrackedEntry,
    ValidationError, Verb,
};

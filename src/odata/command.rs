//! The fluent command chain.
//!
//! This module provides [`Command`], an immutable, append-only sequence of
//! intent steps. Every fluent call returns a *new* command whose node
//! references its predecessor — no call ever mutates a previously returned
//! chain, so partial chains can be stored, branched, and executed
//! concurrently without coordination.
//!
//! # Example
//!
//! ```rust
//! use odata_client::Command;
//!
//! let products = Command::for_collection("Products");
//!
//! // Branch freely: neither call affects `products` or the other branch.
//! let by_key = products.key(1);
//! let by_name = products.filter("Name eq 'Test1'");
//!
//! assert_eq!(by_key.collection(), "Products");
//! assert_eq!(by_name.collection(), "Products");
//! ```
//!
//! # Step precedence
//!
//! Steps may be appended in any order after construction. When the same
//! step kind appears more than once, the last one wins; when both a key
//! and a filter are present, the one appended later is the effective
//! addressing mode. This last-wins policy is deliberate: chains stay
//! composable when a stored prefix is specialized further down the line.

use std::sync::Arc;

use crate::data::{Entry, Key, Value};
use crate::odata::diff::TrackedEntry;

/// One intent step in a command chain.
#[derive(Clone, Debug)]
pub(crate) enum Step {
    /// Address a single entity by key.
    Key(Key),
    /// Narrow the collection by an opaque filter predicate.
    Filter(String),
    /// Restrict returned properties.
    Select(Vec<String>),
    /// Property values to send, as an explicit partial or whole entry.
    Set(Entry),
    /// Property values to send, resolved by diffing against a snapshot.
    SetTracked {
        previous: Option<Entry>,
        current: Entry,
    },
}

#[derive(Debug)]
struct Node {
    step: Step,
    prev: Option<Arc<Node>>,
}

/// An immutable chain of intent steps against one collection.
///
/// Construction fixes the target collection; every other step is appended
/// through a fluent call that returns a fresh chain sharing its
/// predecessor's nodes. A chain carries intent only — nothing happens on
/// the wire until a terminal operation consumes it.
#[derive(Clone, Debug)]
pub struct Command {
    collection: String,
    head: Option<Arc<Node>>,
}

impl Command {
    /// Starts a chain against the named collection.
    ///
    /// # Example
    ///
    /// ```rust
    /// use odata_client::Command;
    ///
    /// let command = Command::for_collection("Products");
    /// assert_eq!(command.collection(), "Products");
    /// ```
    #[must_use]
    pub fn for_collection(name: impl Into<String>) -> Self {
        Self {
            collection: name.into(),
            head: None,
        }
    }

    /// Returns the target collection name.
    #[must_use]
    pub fn collection(&self) -> &str {
        &self.collection
    }

    /// Addresses a single entity by key.
    ///
    /// When both a key and a filter are appended, the later step is the
    /// effective addressing mode (last wins).
    #[must_use]
    pub fn key(&self, value: impl Into<Value>) -> Self {
        self.push(Step::Key(Key::single(value)))
    }

    /// Addresses a single entity by a composite key.
    ///
    /// Components keep their declaration order; they are never re-sorted.
    ///
    /// # Example
    ///
    /// ```rust
    /// use odata_client::Command;
    ///
    /// let command = Command::for_collection("Coordinates")
    ///     .composite_key([("Latitude", 1.0), ("Longitude", 2.0)]);
    /// ```
    #[must_use]
    pub fn composite_key<N, V>(&self, components: impl IntoIterator<Item = (N, V)>) -> Self
    where
        N: Into<String>,
        V: Into<Value>,
    {
        self.push(Step::Key(Key::composite(components)))
    }

    /// Narrows the collection with an opaque filter predicate.
    ///
    /// The predicate grammar is not parsed here; callers supply
    /// protocol-correct predicate strings. When both a key and a filter
    /// are appended, the later step is the effective addressing mode.
    #[must_use]
    pub fn filter(&self, predicate: impl Into<String>) -> Self {
        self.push(Step::Filter(predicate.into()))
    }

    /// Restricts the properties returned by a find.
    #[must_use]
    pub fn select<S: Into<String>>(&self, names: impl IntoIterator<Item = S>) -> Self {
        self.push(Step::Select(names.into_iter().map(Into::into).collect()))
    }

    /// Supplies property values to send.
    ///
    /// For an insert this is the whole entity; for an update it is the
    /// explicit set of properties to change. Appending `set` again
    /// replaces the earlier payload entirely (last wins, no merging).
    #[must_use]
    pub fn set(&self, entry: Entry) -> Self {
        self.push(Step::Set(entry))
    }

    /// Supplies property values by diffing a tracked entry.
    ///
    /// The update body becomes exactly the properties that changed since
    /// the tracked entry's snapshot was taken. Without a snapshot the
    /// whole current entry is sent — see
    /// [`TrackedEntry::changed_properties`] for the consequences.
    #[must_use]
    pub fn set_tracked(&self, tracked: &TrackedEntry) -> Self {
        self.push(Step::SetTracked {
            previous: tracked.snapshot().cloned(),
            current: tracked.entry().clone(),
        })
    }

    /// Collects the steps in append order.
    pub(crate) fn steps(&self) -> Vec<&Step> {
        let mut steps = Vec::new();
        let mut node = self.head.as_deref();
        while let Some(current) = node {
            steps.push(&current.step);
            node = current.prev.as_deref();
        }
        steps.reverse();
        steps
    }

    fn push(&self, step: Step) -> Self {
        Self {
            collection: self.collection.clone(),
            head: Some(Arc::new(Node {
                step,
                prev: self.head.clone(),
            })),
        }
    }
}

// Verify Command is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Command>();
};

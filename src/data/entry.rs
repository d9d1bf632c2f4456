//! The schema-less entity representation.
//!
//! This module provides [`Entry`], a property-name-to-value mapping with no
//! fixed schema. Entries are what the engine decodes response bodies into
//! and what callers hand to insert and update operations.

use std::collections::btree_map;
use std::collections::BTreeMap;

use crate::data::Value;

/// One entity, either decoded from a response or built by the caller.
///
/// Property sets vary per collection and per call; the engine never mutates
/// an entry it has returned. Iteration order is the lexicographic order of
/// property names, which keeps encoded request bodies deterministic.
///
/// # Example
///
/// ```rust
/// use odata_client::{Entry, Value};
///
/// let product = Entry::new()
///     .with("Name", "Test1")
///     .with("Price", 18);
///
/// assert_eq!(product.get("Name"), Some(&Value::from("Test1")));
/// assert_eq!(product.len(), 2);
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Entry {
    properties: BTreeMap<String, Value>,
}

impl Entry {
    /// Creates an empty entry.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            properties: BTreeMap::new(),
        }
    }

    /// Adds a property and returns the entry, for builder-style construction.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.properties.insert(name.into(), value.into());
        self
    }

    /// Sets a property, returning the previous value if one was present.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.properties.insert(name.into(), value.into())
    }

    /// Returns the value of a property, if present.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.properties.get(name)
    }

    /// Removes a property, returning its value if one was present.
    pub fn remove(&mut self, name: &str) -> Option<Value> {
        self.properties.remove(name)
    }

    /// Returns `true` if the property is present.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.properties.contains_key(name)
    }

    /// Returns the number of properties.
    #[must_use]
    pub fn len(&self) -> usize {
        self.properties.len()
    }

    /// Returns `true` if the entry has no properties.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    /// Iterates over properties in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.properties.iter()
    }

    /// Encodes this entry as a wire-format (JSON) object.
    #[must_use]
    pub fn to_json(&self) -> serde_json::Value {
        let map: serde_json::Map<String, serde_json::Value> = self
            .properties
            .iter()
            .map(|(name, value)| (name.clone(), value.to_json()))
            .collect();
        serde_json::Value::Object(map)
    }

    /// Decodes a wire-format (JSON) object into an entry.
    ///
    /// Returns `None` when the value is not an object. Protocol annotation
    /// properties (names starting with `@` or `__`) are dropped; they
    /// describe the payload rather than the entity.
    #[must_use]
    pub fn from_json(value: &serde_json::Value) -> Option<Self> {
        let map = value.as_object()?;
        let properties = map
            .iter()
            .filter(|(name, _)| !name.starts_with('@') && !name.starts_with("__"))
            .map(|(name, value)| (name.clone(), Value::from_json(value)))
            .collect();
        Some(Self { properties })
    }
}

impl FromIterator<(String, Value)> for Entry {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self {
            properties: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Entry {
    type Item = (&'a String, &'a Value);
    type IntoIter = btree_map::Iter<'a, String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.properties.iter()
    }
}

// Verify Entry is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Entry>();
};

//! Entity key addressing.
//!
//! A key is the value, or ordered set of named values, that addresses one
//! entity within a collection. The engine only formats keys; whether a key
//! actually addresses exactly one entity is a server concern surfaced
//! through the operation outcome.

use crate::data::Value;

/// The key addressing a single entity.
///
/// Composite keys keep their declaration order; components are never
/// re-sorted. `Null` is not a valid key component and is rejected when the
/// command chain is compiled.
///
/// # Example
///
/// ```rust
/// use odata_client::Key;
///
/// let single = Key::single(1);
/// let composite = Key::composite([("Latitude", 1.0), ("Longitude", 2.0)]);
///
/// assert_eq!(single.describe(), "1");
/// assert_eq!(composite.describe(), "Latitude=1.0,Longitude=2.0");
/// ```
#[derive(Clone, Debug, PartialEq)]
pub enum Key {
    /// One unnamed key value.
    Single(Value),
    /// Named key components in declaration order.
    Composite(Vec<(String, Value)>),
}

impl Key {
    /// Creates a single-valued key.
    #[must_use]
    pub fn single(value: impl Into<Value>) -> Self {
        Self::Single(value.into())
    }

    /// Creates a composite key from named components, keeping their order.
    #[must_use]
    pub fn composite<N, V>(components: impl IntoIterator<Item = (N, V)>) -> Self
    where
        N: Into<String>,
        V: Into<Value>,
    {
        Self::Composite(
            components
                .into_iter()
                .map(|(name, value)| (name.into(), value.into()))
                .collect(),
        )
    }

    /// Iterates the key components as `(name, value)` pairs.
    ///
    /// A single key yields one pair with no name.
    pub fn components(&self) -> impl Iterator<Item = (Option<&str>, &Value)> {
        let single = match self {
            Self::Single(value) => Some((None, value)),
            Self::Composite(_) => None,
        };
        let composite: &[(String, Value)] = match self {
            Self::Single(_) => &[],
            Self::Composite(components) => components,
        };
        single.into_iter().chain(
            composite
                .iter()
                .map(|(name, value)| (Some(name.as_str()), value)),
        )
    }

    /// Renders the key in literal form for messages and diagnostics.
    ///
    /// This is the un-encoded form; URL building applies percent-encoding
    /// separately. Components without a scalar literal render as their kind
    /// name.
    #[must_use]
    pub fn describe(&self) -> String {
        let parts: Vec<String> = self
            .components()
            .map(|(name, value)| {
                let literal = value
                    .to_literal()
                    .unwrap_or_else(|| format!("<{}>", value.kind()));
                name.map_or_else(|| literal.clone(), |name| format!("{name}={literal}"))
            })
            .collect();
        parts.join(",")
    }
}

//! The tagged value type used for entity properties.
//!
//! This module provides [`Value`], a closed union over every property kind
//! the wire protocol can carry. Using a closed enum instead of an open
//! "any" type keeps literal formatting and JSON conversion exhaustive and
//! statically checkable.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::data::Entry;

/// A single property value.
///
/// Values are structural: two values are equal only when they have the same
/// kind and the same contents. Values of different kinds are never equal,
/// so `Integer(1) != Double(1.0)`.
///
/// # Numeric kinds
///
/// Integers and doubles are separate kinds because their URL literals
/// differ: `18` stays bare while `1.0` must keep its decimal point.
///
/// # Example
///
/// ```rust
/// use odata_client::Value;
///
/// let name = Value::from("Test1");
/// let price = Value::from(18);
///
/// assert_eq!(name.to_literal(), Some("'Test1'".to_string()));
/// assert_eq!(price.to_literal(), Some("18".to_string()));
/// ```
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    /// A UTF-8 string.
    String(String),
    /// A signed integer.
    Integer(i64),
    /// A double-precision floating point number.
    Double(f64),
    /// A boolean.
    Boolean(bool),
    /// A UTC date/time.
    DateTime(DateTime<Utc>),
    /// A globally-unique identifier.
    Guid(Uuid),
    /// The explicit null value.
    Null,
    /// A nested entity.
    Entry(Entry),
    /// An ordered sequence of entities.
    Collection(Vec<Entry>),
}

impl Value {
    /// Returns the kind name of this value, used in error messages.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::String(_) => "string",
            Self::Integer(_) => "integer",
            Self::Double(_) => "double",
            Self::Boolean(_) => "boolean",
            Self::DateTime(_) => "datetime",
            Self::Guid(_) => "guid",
            Self::Null => "null",
            Self::Entry(_) => "entry",
            Self::Collection(_) => "collection",
        }
    }

    /// Returns `true` for the `Null` value.
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Formats this value as a protocol URL literal.
    ///
    /// The literal rules follow the wire protocol's addressing grammar:
    ///
    /// - strings are single-quoted with internal quotes doubled
    ///   (`O'Brien` becomes `'O''Brien'`);
    /// - integers use bare invariant formatting with no separators;
    /// - doubles always carry a decimal point (`1.0`, never `1`);
    /// - booleans are lowercase `true`/`false`;
    /// - date/times use the canonical literal `datetime'YYYY-MM-DDTHH:MM:SS'`;
    /// - identifiers are bare unquoted tokens;
    /// - `null` formats as the keyword `null`.
    ///
    /// Returns `None` for `Entry` and `Collection`, which have no scalar
    /// literal form. The output is not percent-encoded; callers embedding a
    /// literal in a URL encode it for the component it lands in.
    #[must_use]
    pub fn to_literal(&self) -> Option<String> {
        match self {
            Self::String(s) => Some(format!("'{}'", s.replace('\'', "''"))),
            Self::Integer(i) => Some(i.to_string()),
            Self::Double(d) => Some(format_double(*d)),
            Self::Boolean(b) => Some(b.to_string()),
            Self::DateTime(dt) => Some(format!("datetime'{}'", dt.format("%Y-%m-%dT%H:%M:%S"))),
            Self::Guid(g) => Some(g.to_string()),
            Self::Null => Some("null".to_string()),
            Self::Entry(_) | Self::Collection(_) => None,
        }
    }

    /// Converts this value into its wire-format (JSON) representation.
    ///
    /// Date/times serialize as RFC 3339 strings and identifiers as
    /// hyphenated strings; the wire format carries no type metadata for
    /// either, so a round trip through [`Value::from_json`] yields
    /// `Value::String` for both.
    #[must_use]
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Self::String(s) => serde_json::Value::String(s.clone()),
            Self::Integer(i) => serde_json::Value::from(*i),
            Self::Double(d) => {
                serde_json::Number::from_f64(*d).map_or(serde_json::Value::Null, serde_json::Value::Number)
            }
            Self::Boolean(b) => serde_json::Value::Bool(*b),
            Self::DateTime(dt) => serde_json::Value::String(dt.to_rfc3339()),
            Self::Guid(g) => serde_json::Value::String(g.to_string()),
            Self::Null => serde_json::Value::Null,
            Self::Entry(entry) => entry.to_json(),
            Self::Collection(entries) => {
                serde_json::Value::Array(entries.iter().map(Entry::to_json).collect())
            }
        }
    }

    /// Decodes a wire-format (JSON) value.
    ///
    /// JSON numbers with no fractional representation decode as `Integer`,
    /// all others as `Double`. Objects decode as nested entries. Array
    /// elements that are not objects are skipped: ordered sequences carry
    /// entities only.
    #[must_use]
    pub fn from_json(value: &serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Self::Null,
            serde_json::Value::Bool(b) => Self::Boolean(*b),
            serde_json::Value::Number(n) => n
                .as_i64()
                .map_or_else(|| Self::Double(n.as_f64().unwrap_or(0.0)), Self::Integer),
            serde_json::Value::String(s) => Self::String(s.clone()),
            serde_json::Value::Object(_) => {
                Entry::from_json(value).map_or(Self::Null, Self::Entry)
            }
            serde_json::Value::Array(items) => {
                Self::Collection(items.iter().filter_map(Entry::from_json).collect())
            }
        }
    }
}

/// Formats a double so it always carries a decimal point.
fn format_double(d: f64) -> String {
    if d.is_finite() && d.fract() == 0.0 {
        format!("{d:.1}")
    } else {
        format!("{d}")
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Self::Integer(i64::from(i))
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Self::Integer(i)
    }
}

impl From<f64> for Value {
    fn from(d: f64) -> Self {
        Self::Double(d)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Boolean(b)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(dt: DateTime<Utc>) -> Self {
        Self::DateTime(dt)
    }
}

impl From<Uuid> for Value {
    fn from(g: Uuid) -> Self {
        Self::Guid(g)
    }
}

impl From<Entry> for Value {
    fn from(entry: Entry) -> Self {
        Self::Entry(entry)
    }
}

impl From<Vec<Entry>> for Value {
    fn from(entries: Vec<Entry>) -> Self {
        Self::Collection(entries)
    }
}

// Verify Value is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Value>();
};

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_string_literal_is_quoted() {
        assert_eq!(
            Value::from("Test1").to_literal(),
            Some("'Test1'".to_string())
        );
    }

    #[test]
    fn test_string_literal_doubles_internal_quotes() {
        assert_eq!(
            Value::from("O'Brien").to_literal(),
            Some("'O''Brien'".to_string())
        );
    }

    #[test]
    fn test_integer_literal_is_bare() {
        assert_eq!(Value::from(18).to_literal(), Some("18".to_string()));
        assert_eq!(Value::from(-5i64).to_literal(), Some("-5".to_string()));
    }

    #[test]
    fn test_double_literal_keeps_decimal_point() {
        assert_eq!(Value::from(1.0).to_literal(), Some("1.0".to_string()));
        assert_eq!(Value::from(2.5).to_literal(), Some("2.5".to_string()));
        assert_eq!(Value::from(-3.0).to_literal(), Some("-3.0".to_string()));
    }

    #[test]
    fn test_boolean_literal_is_lowercase() {
        assert_eq!(Value::from(true).to_literal(), Some("true".to_string()));
        assert_eq!(Value::from(false).to_literal(), Some("false".to_string()));
    }

    #[test]
    fn test_datetime_literal_uses_canonical_form() {
        let dt = Utc.with_ymd_and_hms(2002, 10, 10, 17, 0, 0).unwrap();
        assert_eq!(
            Value::from(dt).to_literal(),
            Some("datetime'2002-10-10T17:00:00'".to_string())
        );
    }

    #[test]
    fn test_guid_literal_is_bare_token() {
        let guid = Uuid::parse_str("0e3c7c6e-2f4a-4cf0-8b8a-8a41087f0b7b").unwrap();
        assert_eq!(
            Value::from(guid).to_literal(),
            Some("0e3c7c6e-2f4a-4cf0-8b8a-8a41087f0b7b".to_string())
        );
    }

    #[test]
    fn test_entry_and_collection_have_no_literal() {
        assert!(Value::Entry(Entry::new()).to_literal().is_none());
        assert!(Value::Collection(vec![]).to_literal().is_none());
    }

    #[test]
    fn test_values_of_different_kinds_are_unequal() {
        assert_ne!(Value::Integer(1), Value::Double(1.0));
        assert_ne!(Value::from("true"), Value::from(true));
        assert_ne!(Value::Null, Value::from(0));
    }

    #[test]
    fn test_json_round_trip_for_primitives() {
        assert_eq!(
            Value::from_json(&Value::from("abc").to_json()),
            Value::from("abc")
        );
        assert_eq!(Value::from_json(&Value::from(42).to_json()), Value::from(42));
        assert_eq!(
            Value::from_json(&Value::from(2.5).to_json()),
            Value::from(2.5)
        );
        assert_eq!(
            Value::from_json(&Value::from(true).to_json()),
            Value::from(true)
        );
        assert_eq!(Value::from_json(&Value::Null.to_json()), Value::Null);
    }

    #[test]
    fn test_datetime_decodes_as_string() {
        let dt = Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap();
        let decoded = Value::from_json(&Value::from(dt).to_json());
        assert!(matches!(decoded, Value::String(_)));
    }

    #[test]
    fn test_json_integer_and_double_split() {
        assert_eq!(Value::from_json(&serde_json::json!(7)), Value::Integer(7));
        assert_eq!(
            Value::from_json(&serde_json::json!(7.25)),
            Value::Double(7.25)
        );
    }

    #[test]
    fn test_kind_names() {
        assert_eq!(Value::Null.kind(), "null");
        assert_eq!(Value::from(1).kind(), "integer");
        assert_eq!(Value::Entry(Entry::new()).kind(), "entry");
    }
}

//! Resource URL building.
//!
//! This module turns a target collection, optional key, optional filter
//! predicate, and optional select list into a protocol-correct relative
//! URL. Building is pure and deterministic: identical logical inputs
//! always yield byte-identical output, which keeps request URLs cacheable
//! and trivially testable.
//!
//! # Addressing shapes
//!
//! - `Products` — the whole collection
//! - `Products(1)` — a single entity by key
//! - `Products(Latitude=1.0,Longitude=2.0)` — composite key, declaration
//!   order preserved
//! - `Products?$filter=Name%20eq%20'Test1'` — filtered collection
//!
//! The filter predicate grammar is opaque to this module; callers supply
//! protocol-correct predicate strings and they are percent-encoded as a
//! whole.

use crate::data::{Key, Value};
use crate::odata::errors::ValidationError;

/// Builds the relative URL for one resource access.
///
/// # Errors
///
/// Returns [`ValidationError::EmptyCollection`] for an empty collection
/// name, [`ValidationError::NullKeyComponent`] when a key component is
/// `null`, and [`ValidationError::UnsupportedKeyComponent`] when a key
/// component has no scalar literal form.
///
/// # Example
///
/// ```rust
/// use odata_client::{build_url, Key};
///
/// let url = build_url(
///     "Products",
///     Some(&Key::composite([("Latitude", 1.0), ("Longitude", 2.0)])),
///     None,
///     None,
/// )
/// .unwrap();
///
/// assert_eq!(url, "Products(Latitude=1.0,Longitude=2.0)");
/// ```
pub fn build_url(
    collection: &str,
    key: Option<&Key>,
    filter: Option<&str>,
    select: Option<&[String]>,
) -> Result<String, ValidationError> {
    if collection.is_empty() {
        return Err(ValidationError::EmptyCollection);
    }

    let mut url = urlencoding::encode(collection).into_owned();

    if let Some(key) = key {
        url.push('(');
        url.push_str(&format_key(key)?);
        url.push(')');
    }

    let mut query: Vec<String> = Vec::new();
    if let Some(filter) = filter {
        query.push(format!("$filter={}", urlencoding::encode(filter)));
    }
    if let Some(select) = select {
        if !select.is_empty() {
            let names: Vec<String> = select
                .iter()
                .map(|name| urlencoding::encode(name).into_owned())
                .collect();
            query.push(format!("$select={}", names.join(",")));
        }
    }

    if !query.is_empty() {
        url.push('?');
        url.push_str(&query.join("&"));
    }

    Ok(url)
}

/// Formats the parenthesized key content in declaration order.
fn format_key(key: &Key) -> Result<String, ValidationError> {
    let parts: Result<Vec<String>, ValidationError> = key
        .components()
        .map(|(name, value)| {
            let literal = encode_key_literal(value)?;
            Ok(name.map_or_else(|| literal.clone(), |name| {
                format!("{}={literal}", urlencoding::encode(name))
            }))
        })
        .collect();
    Ok(parts?.join(","))
}

/// Formats one key component as a percent-encoded literal.
///
/// Single quotes stay literal: the quoting (and quote doubling) is part of
/// the protocol's literal grammar, not of the URL encoding.
fn encode_key_literal(value: &Value) -> Result<String, ValidationError> {
    if value.is_null() {
        return Err(ValidationError::NullKeyComponent);
    }
    let literal = value
        .to_literal()
        .ok_or(ValidationError::UnsupportedKeyComponent { kind: value.kind() })?;
    Ok(urlencoding::encode(&literal).replace("%27", "'"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Entry;
    use chrono::TimeZone;
    use chrono::Utc;

    #[test]
    fn test_collection_only() {
        assert_eq!(build_url("Products", None, None, None).unwrap(), "Products");
    }

    #[test]
    fn test_collection_name_is_percent_encoded() {
        assert_eq!(
            build_url("Product Images", None, None, None).unwrap(),
            "Product%20Images"
        );
    }

    #[test]
    fn test_empty_collection_is_rejected() {
        assert!(matches!(
            build_url("", None, None, None),
            Err(ValidationError::EmptyCollection)
        ));
    }

    #[test]
    fn test_single_integer_key() {
        let url = build_url("Products", Some(&Key::single(1)), None, None).unwrap();
        assert_eq!(url, "Products(1)");
    }

    #[test]
    fn test_single_string_key_keeps_quotes() {
        let url = build_url("Products", Some(&Key::single("Test1")), None, None).unwrap();
        assert_eq!(url, "Products('Test1')");
    }

    #[test]
    fn test_string_key_with_space_is_encoded_inside_quotes() {
        let url = build_url("Products", Some(&Key::single("Test 1")), None, None).unwrap();
        assert_eq!(url, "Products('Test%201')");
    }

    #[test]
    fn test_string_key_doubles_internal_quotes() {
        let url = build_url("Products", Some(&Key::single("O'Brien")), None, None).unwrap();
        assert_eq!(url, "Products('O''Brien')");
    }

    #[test]
    fn test_composite_key_in_declaration_order() {
        let key = Key::composite([("Latitude", 1.0), ("Longitude", 2.0)]);
        let url = build_url("Coordinates", Some(&key), None, None).unwrap();
        assert_eq!(url, "Coordinates(Latitude=1.0,Longitude=2.0)");
    }

    #[test]
    fn test_composite_key_is_not_resorted() {
        let key = Key::composite([("Longitude", 2.0), ("Latitude", 1.0)]);
        let url = build_url("Coordinates", Some(&key), None, None).unwrap();
        assert_eq!(url, "Coordinates(Longitude=2.0,Latitude=1.0)");
    }

    #[test]
    fn test_datetime_key_uses_canonical_literal() {
        let dt = Utc.with_ymd_and_hms(2002, 10, 10, 17, 0, 0).unwrap();
        let url = build_url("Logs", Some(&Key::single(dt)), None, None).unwrap();
        assert_eq!(url, "Logs(datetime'2002-10-10T17%3A00%3A00')");
    }

    #[test]
    fn test_null_key_component_is_rejected() {
        let result = build_url("Products", Some(&Key::single(Value::Null)), None, None);
        assert!(matches!(result, Err(ValidationError::NullKeyComponent)));

        let composite = Key::composite([("A", Value::from(1)), ("B", Value::Null)]);
        let result = build_url("Products", Some(&composite), None, None);
        assert!(matches!(result, Err(ValidationError::NullKeyComponent)));
    }

    #[test]
    fn test_complex_key_component_is_rejected() {
        let key = Key::single(Value::Entry(Entry::new()));
        let result = build_url("Products", Some(&key), None, None);
        assert!(matches!(
            result,
            Err(ValidationError::UnsupportedKeyComponent { kind: "entry" })
        ));
    }

    #[test]
    fn test_filter_is_encoded_as_a_whole() {
        let url = build_url("Products", None, Some("Name eq 'Test1'"), None).unwrap();
        assert_eq!(url, "Products?$filter=Name%20eq%20%27Test1%27");
    }

    #[test]
    fn test_select_is_comma_joined() {
        let select = vec!["Name".to_string(), "Price".to_string()];
        let url = build_url("Products", None, None, Some(&select)).unwrap();
        assert_eq!(url, "Products?$select=Name,Price");
    }

    #[test]
    fn test_filter_precedes_select() {
        let select = vec!["Name".to_string()];
        let url = build_url("Products", None, Some("Price gt 10"), Some(&select)).unwrap();
        assert_eq!(url, "Products?$filter=Price%20gt%2010&$select=Name");
    }

    #[test]
    fn test_empty_select_adds_no_query() {
        let url = build_url("Products", None, None, Some(&[])).unwrap();
        assert_eq!(url, "Products");
    }

    #[test]
    fn test_building_is_deterministic() {
        let key = Key::composite([("Latitude", 1.0), ("Longitude", 2.0)]);
        let select = vec!["Name".to_string(), "Price".to_string()];

        let first = build_url("Products", Some(&key), Some("Price gt 10"), Some(&select)).unwrap();
        let second = build_url("Products", Some(&key), Some("Price gt 10"), Some(&select)).unwrap();

        assert_eq!(first, second);
    }
}

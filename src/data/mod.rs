//! The dynamic data model: values, entries, and keys.
//!
//! The engine works against schema-less entities, so the data model is a
//! small closed vocabulary rather than typed resource structs:
//!
//! - [`Value`]: a tagged union over every property kind the protocol carries
//! - [`Entry`]: a property-name-to-value mapping representing one entity
//! - [`Key`]: the value or named value set addressing one entity
//!
//! # Example
//!
//! ```rust
//! use odata_client::{Entry, Key, Value};
//!
//! let product = Entry::new()
//!     .with("Name", "Test1")
//!     .with("Price", 18);
//!
//! let key = Key::composite([("Latitude", 1.0), ("Longitude", 2.0)]);
//!
//! assert_eq!(product.get("Price"), Some(&Value::from(18)));
//! assert_eq!(key.describe(), "Latitude=1.0,Longitude=2.0");
//! ```

mod entry;
mod key;
mod value;

pub use entry::Entry;
pub use key::Key;
pub use value::Value;

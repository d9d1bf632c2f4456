//! Compiling a command chain into a wire request.
//!
//! The compiler is the point where intent becomes a concrete request: it
//! walks the chain's steps, resolves the effective key/filter/payload under
//! the last-wins policy, validates the combination against the terminal
//! verb, and produces one [`RequestDescriptor`]. Compilation is synchronous
//! and performs no network activity, so malformed chains fail before
//! anything is sent.

use crate::client::{Method, RequestDescriptor};
use crate::data::{Entry, Key};
use crate::odata::command::{Command, Step};
use crate::odata::diff::diff_entries;
use crate::odata::errors::ValidationError;
use crate::odata::url::build_url;

/// The terminal verb consuming a command chain.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Verb {
    /// Read one entity or a collection (GET).
    Find,
    /// Create a new entity (POST, full entry body).
    Insert,
    /// Change an existing entity (PATCH, partial body).
    Update,
    /// Remove an existing entity (DELETE, no body).
    Delete,
}

impl Verb {
    /// Returns the HTTP method this verb maps onto.
    #[must_use]
    pub const fn method(self) -> Method {
        match self {
            Self::Find => Method::Get,
            Self::Insert => Method::Post,
            Self::Update => Method::Patch,
            Self::Delete => Method::Delete,
        }
    }

    /// Returns the verb name used in error messages.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Find => "find",
            Self::Insert => "insert",
            Self::Update => "update",
            Self::Delete => "delete",
        }
    }
}

/// The payload a chain supplies for insert or update.
#[derive(Debug)]
pub(crate) enum Payload<'a> {
    /// An explicit entry: sent as-is.
    Explicit(&'a Entry),
    /// A tracked entry: resolved by diffing against its snapshot.
    Tracked {
        previous: Option<&'a Entry>,
        current: &'a Entry,
    },
}

impl Payload<'_> {
    /// Resolves the update body: the diff when a snapshot exists, the
    /// whole entry otherwise.
    fn update_body(&self) -> Entry {
        match self {
            Self::Explicit(entry) => (*entry).clone(),
            Self::Tracked {
                previous: Some(previous),
                current,
            } => diff_entries(previous, current),
            Self::Tracked {
                previous: None,
                current,
            } => (*current).clone(),
        }
    }

    /// Resolves the insert body: always the whole entry.
    fn insert_body(&self) -> Entry {
        match self {
            Self::Explicit(entry) => (*entry).clone(),
            Self::Tracked { current, .. } => (*current).clone(),
        }
    }
}

/// A chain's steps folded down to their effective values.
///
/// Later steps of the same kind replace earlier ones; `addressed_by_key`
/// records which of key/filter came later and therefore wins.
#[derive(Debug)]
pub(crate) struct Resolved<'a> {
    pub key: Option<&'a Key>,
    pub filter: Option<&'a str>,
    pub select: Option<&'a [String]>,
    pub payload: Option<Payload<'a>>,
    pub addressed_by_key: bool,
}

impl Resolved<'_> {
    /// Returns the effective `(key, filter)` pair under last-wins.
    pub fn effective_target(&self) -> (Option<&Key>, Option<&str>) {
        if self.addressed_by_key {
            (self.key, None)
        } else {
            (None, self.filter)
        }
    }

    /// Describes the effective target for diagnostics.
    pub fn describe_target(&self) -> String {
        if self.addressed_by_key {
            self.key.map_or_else(String::new, Key::describe)
        } else {
            self.filter.unwrap_or_default().to_string()
        }
    }
}

/// Folds a chain's steps into their effective values.
pub(crate) fn resolve(command: &Command) -> Resolved<'_> {
    let mut key = None;
    let mut filter = None;
    let mut select = None;
    let mut payload = None;
    let mut key_is_later = false;

    for step in command.steps() {
        match step {
            Step::Key(value) => {
                key = Some(value);
                key_is_later = true;
            }
            Step::Filter(predicate) => {
                filter = Some(predicate.as_str());
                key_is_later = false;
            }
            Step::Select(names) => select = Some(names.as_slice()),
            Step::Set(entry) => payload = Some(Payload::Explicit(entry)),
            Step::SetTracked { previous, current } => {
                payload = Some(Payload::Tracked {
                    previous: previous.as_ref(),
                    current,
                });
            }
        }
    }

    let addressed_by_key = key.is_some() && (filter.is_none() || key_is_later);
    Resolved {
        key,
        filter,
        select,
        payload,
        addressed_by_key,
    }
}

/// Compiles a command chain and terminal verb into one request descriptor.
///
/// # Errors
///
/// Returns [`ValidationError`] when the chain is malformed for the verb:
/// a key on an insert, a missing payload on insert/update, a missing
/// key/filter on update/delete, or an invalid key component.
///
/// # Example
///
/// ```rust
/// use odata_client::{compile, Command, Entry, Method, Verb};
///
/// let command = Command::for_collection("Products")
///     .key(1)
///     .set(Entry::new().with("Price", 123));
///
/// let descriptor = compile(&command, Verb::Update).unwrap();
/// assert_eq!(descriptor.method, Method::Patch);
/// assert_eq!(descriptor.url, "Products(1)");
/// ```
pub fn compile(command: &Command, verb: Verb) -> Result<RequestDescriptor, ValidationError> {
    let resolved = resolve(command);
    let collection = command.collection();

    match verb {
        Verb::Find => {
            let (key, filter) = resolved.effective_target();
            let url = build_url(collection, key, filter, resolved.select)?;
            Ok(RequestDescriptor::builder(Method::Get, url).build()?)
        }
        Verb::Insert => {
            if resolved.key.is_some() {
                return Err(ValidationError::KeyNotAllowed { verb: verb.name() });
            }
            let body = resolved
                .payload
                .as_ref()
                .ok_or(ValidationError::MissingPayload { verb: verb.name() })?
                .insert_body();
            let url = build_url(collection, None, None, None)?;
            Ok(RequestDescriptor::builder(Method::Post, url)
                .body(body.to_json())
                .build()?)
        }
        Verb::Update => {
            let (key, filter) = require_target(&resolved, verb)?;
            let body = resolved
                .payload
                .as_ref()
                .ok_or(ValidationError::MissingPayload { verb: verb.name() })?
                .update_body();
            let url = build_url(collection, key, filter, None)?;
            Ok(RequestDescriptor::builder(Method::Patch, url)
                .body(body.to_json())
                .build()?)
        }
        Verb::Delete => {
            let (key, filter) = require_target(&resolved, verb)?;
            let url = build_url(collection, key, filter, None)?;
            Ok(RequestDescriptor::builder(Method::Delete, url).build()?)
        }
    }
}

/// Requires a key or filter for verbs addressing an existing entity.
fn require_target<'a>(
    resolved: &'a Resolved<'_>,
    verb: Verb,
) -> Result<(Option<&'a Key>, Option<&'a str>), ValidationError> {
    let (key, filter) = resolved.effective_target();
    if key.is_none() && filter.is_none() {
        return Err(ValidationError::MissingTarget { verb: verb.name() });
    }
    Ok((key, filter))
}

//! Whole-object diffing for implicit updates.
//!
//! When a caller edits a full entity snapshot instead of naming the
//! properties to change, the engine computes the minimal property set to
//! send by comparing the edited entry against a previously observed
//! snapshot. This module provides that comparison plus [`TrackedEntry`],
//! a wrapper that captures the snapshot automatically.

use std::ops::{Deref, DerefMut};

use crate::data::{Entry, Value};

/// Computes the property subset that differs between two entries.
///
/// The result contains:
///
/// - properties added or changed in `current`, with their current value;
/// - properties present in `previous` but missing from `current`, as an
///   explicit `null` — the partial-update protocol clears a property by
///   nulling it.
///
/// Equality is structural and deep: nested entries and ordered sequences
/// compare recursively, and values of different kinds are never equal. A
/// changed nested entry is sent whole; partial updates replace complex
/// values wholesale.
///
/// # Example
///
/// ```rust
/// use odata_client::{diff_entries, Entry, Value};
///
/// let previous = Entry::new().with("Name", "Test1").with("Price", 18);
/// let current = Entry::new().with("Name", "Test1").with("Price", 123);
///
/// let changes = diff_entries(&previous, &current);
/// assert_eq!(changes.get("Price"), Some(&Value::from(123)));
/// assert!(changes.get("Name").is_none());
/// ```
#[must_use]
pub fn diff_entries(previous: &Entry, current: &Entry) -> Entry {
    let mut changes = Entry::new();

    for (name, value) in current {
        if previous.get(name) != Some(value) {
            changes.insert(name.clone(), value.clone());
        }
    }

    for (name, _) in previous {
        if !current.contains(name) {
            changes.insert(name.clone(), Value::Null);
        }
    }

    changes
}

/// An entry paired with the snapshot it will be diffed against.
///
/// Create with [`TrackedEntry::from_existing`] after observing an entity
/// (typically the result of a find) to capture the snapshot, then edit the
/// entry freely through `Deref`/`DerefMut`. When the tracked entry feeds an
/// update, only the changed properties are sent.
///
/// # Fallback without a snapshot
///
/// [`TrackedEntry::new`] creates a tracked entry with *no* snapshot. With
/// nothing to diff against, the whole current entry is sent. This changes
/// server-visible semantics: properties absent from the entry may be
/// cleared server-side rather than left untouched, so prefer
/// `from_existing` whenever a previous observation exists.
///
/// # Example
///
/// ```rust
/// use odata_client::{Entry, TrackedEntry, Value};
///
/// let observed = Entry::new().with("Name", "Test1").with("Price", 18);
/// let mut tracked = TrackedEntry::from_existing(observed);
///
/// tracked.insert("Price", 123);
///
/// let changes = tracked.changed_properties();
/// assert_eq!(changes.get("Price"), Some(&Value::from(123)));
/// assert!(changes.get("Name").is_none());
/// ```
#[derive(Clone, Debug)]
pub struct TrackedEntry {
    entry: Entry,
    snapshot: Option<Entry>,
}

impl TrackedEntry {
    /// Creates a tracked entry with no snapshot.
    ///
    /// `changed_properties` returns the whole entry until a snapshot is
    /// captured with [`TrackedEntry::mark_clean`].
    #[must_use]
    pub const fn new(entry: Entry) -> Self {
        Self {
            entry,
            snapshot: None,
        }
    }

    /// Creates a tracked entry whose current state is the snapshot.
    #[must_use]
    pub fn from_existing(entry: Entry) -> Self {
        let snapshot = Some(entry.clone());
        Self { entry, snapshot }
    }

    /// Returns `true` when no snapshot has been captured yet.
    #[must_use]
    pub const fn is_new(&self) -> bool {
        self.snapshot.is_none()
    }

    /// Returns `true` when the entry differs from its snapshot.
    ///
    /// Always `true` without a snapshot.
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.snapshot
            .as_ref()
            .map_or(true, |snapshot| snapshot != &self.entry)
    }

    /// Returns the property subset an update should send.
    ///
    /// With a snapshot this is exactly the diff (changed, added, and
    /// removed-as-null properties). Without one it is the whole current
    /// entry — the documented fallback, since there is nothing to diff
    /// against.
    #[must_use]
    pub fn changed_properties(&self) -> Entry {
        self.snapshot
            .as_ref()
            .map_or_else(|| self.entry.clone(), |snapshot| diff_entries(snapshot, &self.entry))
    }

    /// Captures the current state as the new snapshot.
    ///
    /// Call after a successful update so subsequent diffs start from the
    /// saved state.
    pub fn mark_clean(&mut self) {
        self.snapshot = Some(self.entry.clone());
    }

    /// Returns the current entry.
    #[must_use]
    pub const fn entry(&self) -> &Entry {
        &self.entry
    }

    /// Returns the snapshot, if one was captured.
    #[must_use]
    pub const fn snapshot(&self) -> Option<&Entry> {
        self.snapshot.as_ref()
    }

    /// Consumes the wrapper and returns the entry.
    #[must_use]
    pub fn into_entry(self) -> Entry {
        self.entry
    }
}

/// Provides transparent read access to the tracked entry.
impl Deref for TrackedEntry {
    type Target = Entry;

    fn deref(&self) -> &Self::Target {
        &self.entry
    }
}

/// Provides transparent mutable access; edits show up in the next diff.
impl DerefMut for TrackedEntry {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.entry
    }
}

// Verify TrackedEntry is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<TrackedEntry>();
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diff_of_identical_entries_is_empty() {
        let entry = Entry::new().with("Name", "Test1").with("Price", 18);
        assert!(diff_entries(&entry, &entry.clone()).is_empty());
    }

    #[test]
    fn test_diff_reports_changed_properties_only() {
        let previous = Entry::new().with("Name", "Test1").with("Price", 18);
        let current = Entry::new().with("Name", "Test1").with("Price", 123);

        let changes = diff_entries(&previous, &current);
        assert_eq!(changes.len(), 1);
        assert_eq!(changes.get("Price"), Some(&Value::from(123)));
    }

    #[test]
    fn test_diff_includes_added_properties() {
        let previous = Entry::new().with("Name", "Test1");
        let current = Entry::new().with("Name", "Test1").with("Rating", 5);

        let changes = diff_entries(&previous, &current);
        assert_eq!(changes.get("Rating"), Some(&Value::from(5)));
    }

    #[test]
    fn test_diff_marks_removed_properties_as_null() {
        let previous = Entry::new().with("Name", "Test1").with("Rating", 5);
        let current = Entry::new().with("Name", "Test1");

        let changes = diff_entries(&previous, &current);
        assert_eq!(changes.get("Rating"), Some(&Value::Null));
    }

    #[test]
    fn test_diff_treats_kind_changes_as_changes() {
        let previous = Entry::new().with("Price", 1);
        let current = Entry::new().with("Price", 1.0);

        let changes = diff_entries(&previous, &current);
        assert_eq!(changes.get("Price"), Some(&Value::from(1.0)));
    }

    #[test]
    fn test_diff_sends_changed_nested_entries_whole() {
        let previous =
            Entry::new().with("Supplier", Entry::new().with("City", "Austin").with("Zip", "73301"));
        let current =
            Entry::new().with("Supplier", Entry::new().with("City", "Dallas").with("Zip", "73301"));

        let changes = diff_entries(&previous, &current);
        assert_eq!(
            changes.get("Supplier"),
            Some(&Value::Entry(
                Entry::new().with("City", "Dallas").with("Zip", "73301")
            ))
        );
    }

    #[test]
    fn test_tracked_from_existing_starts_clean() {
        let tracked = TrackedEntry::from_existing(Entry::new().with("Price", 18));
        assert!(!tracked.is_new());
        assert!(!tracked.is_dirty());
        assert!(tracked.changed_properties().is_empty());
    }

    #[test]
    fn test_tracked_edit_shows_up_in_diff() {
        let mut tracked = TrackedEntry::from_existing(
            Entry::new().with("Name", "Test1").with("Price", 18),
        );
        tracked.insert("Price", 123);

        assert!(tracked.is_dirty());
        let changes = tracked.changed_properties();
        assert_eq!(changes.len(), 1);
        assert_eq!(changes.get("Price"), Some(&Value::from(123)));
    }

    #[test]
    fn test_tracked_without_snapshot_sends_everything() {
        let tracked = TrackedEntry::new(Entry::new().with("Name", "Test1").with("Price", 18));

        assert!(tracked.is_new());
        assert!(tracked.is_dirty());
        assert_eq!(tracked.changed_properties().len(), 2);
    }

    #[test]
    fn test_mark_clean_resets_the_diff() {
        let mut tracked = TrackedEntry::from_existing(Entry::new().with("Price", 18));
        tracked.insert("Price", 123);
        assert!(tracked.is_dirty());

        tracked.mark_clean();
        assert!(!tracked.is_dirty());
        assert!(tracked.changed_properties().is_empty());

        tracked.insert("Name", "Renamed");
        let changes = tracked.changed_properties();
        assert_eq!(changes.len(), 1);
        assert_eq!(changes.get("Name"), Some(&Value::from("Renamed")));
    }

    #[test]
    fn test_deref_mut_edits_are_tracked() {
        let mut tracked = TrackedEntry::from_existing(Entry::new().with("Price", 18));
        tracked.remove("Price");

        let changes = tracked.changed_properties();
        assert_eq!(changes.get("Price"), Some(&Value::Null));
    }
}

//! The record store: canonical records plus their derived aggregates.
//!
//! [`RosterStore`] owns the identifier → record map, the [`GroupIndex`] and the
//! [`ExtremaCache`] as one unit. Every mutation updates the record, then the index,
//! then invalidates the cache, inside a single `&mut self` call, so the three can
//! never be observed out of step. Sharing a store across threads means wrapping the
//! whole store in one lock.

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use tracing::{trace, warn};

use crate::algo::radix_order;
use crate::cache::{Extrema, ExtremaCache, Leader};
use crate::core::{GroupStats, Record};
use crate::error::{Result, RosterError};
use crate::index::GroupIndex;

/// In-memory student roster keyed by identifier.
///
/// # Examples
///
/// ```
/// use roster::{Record, RosterStore};
///
/// let mut store = RosterStore::new();
/// store.insert(Record::new("a@x", "G1", 8.0)).unwrap();
/// store.insert(Record::new("b@x", "G1", 4.0)).unwrap();
/// store.insert(Record::new("c@x", "G2", 9.0)).unwrap();
///
/// assert_eq!(store.group_with_most_members(), Some("G1"));
/// assert_eq!(store.group_with_highest_average(), Some("G2"));
///
/// assert!(store.move_group("b@x", "G2").unwrap());
/// assert_eq!(store.group_with_most_members(), Some("G2"));
/// assert_eq!(store.group_with_highest_average(), Some("G1"));
/// ```
#[derive(Clone, Debug, Default)]
pub struct RosterStore {
    records: HashMap<String, Record>,
    groups: GroupIndex,
    extrema: ExtremaCache,
}

impl RosterStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            records: HashMap::with_capacity(capacity),
            ..Self::default()
        }
    }

    /// Builds a store by inserting every record in order.
    pub fn from_records<I: IntoIterator<Item = Record>>(records: I) -> Result<Self> {
        let records = records.into_iter();
        let mut store = Self::with_capacity(records.size_hint().0);
        for record in records {
            store.insert(record)?;
        }
        Ok(store)
    }

    /// Inserts `record`, replacing any record with the same identifier.
    ///
    /// A replaced record's group contribution is withdrawn before the new one is
    /// added. Returns the replaced record. A NaN or infinite score is rejected
    /// with [`RosterError::NonFiniteScore`] and leaves the store untouched.
    pub fn insert(&mut self, record: Record) -> Result<Option<Record>> {
        if !record.score.is_finite() {
            return Err(RosterError::NonFiniteScore {
                id: record.id,
                score: record.score,
            });
        }
        let replaced = match self.records.entry(record.id.clone()) {
            Entry::Occupied(mut slot) => {
                let old = slot.get();
                self.groups.remove_member(&old.group, old.score)?;
                self.groups.add_member(&record.group, record.score);
                Some(slot.insert(record))
            }
            Entry::Vacant(slot) => {
                self.groups.add_member(&record.group, record.score);
                slot.insert(record);
                None
            }
        };
        self.extrema.invalidate();
        Ok(replaced)
    }

    /// Removes and returns the record for `id`, if present.
    pub fn remove(&mut self, id: &str) -> Result<Option<Record>> {
        let Some(record) = self.records.get(id) else {
            return Ok(None);
        };
        self.groups.remove_member(&record.group, record.score)?;
        self.extrema.invalidate();
        Ok(self.records.remove(id))
    }

    pub fn get(&self, id: &str) -> Option<&Record> {
        self.records.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.records.contains_key(id)
    }

    /// Moves the record for `id` into `new_group`.
    ///
    /// Returns `Ok(false)` without touching anything when `id` is absent, and
    /// `Ok(true)` when the record is (or already was) in `new_group`. An error
    /// means the aggregate index had lost track of the record's current group.
    pub fn move_group(&mut self, id: &str, new_group: &str) -> Result<bool> {
        let Some(record) = self.records.get_mut(id) else {
            trace!(id, "move_group: no such record");
            return Ok(false);
        };
        if record.group == new_group {
            return Ok(true);
        }

        self.groups.transfer(&record.group, new_group, record.score)?;
        trace!(id, from = %record.group, to = new_group, "moved record");
        record.group = new_group.to_owned();
        self.extrema.invalidate();
        Ok(true)
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// All identifiers, in unspecified order.
    pub fn identifiers(&self) -> impl Iterator<Item = &str> + '_ {
        self.records.keys().map(String::as_str)
    }

    /// All group labels with at least one member, in unspecified order.
    pub fn group_labels(&self) -> impl Iterator<Item = &str> + '_ {
        self.groups.labels()
    }

    pub fn records(&self) -> impl Iterator<Item = &Record> + '_ {
        self.records.values()
    }

    pub fn group_stats(&self, group: &str) -> Option<GroupStats> {
        self.groups.get(group)
    }

    /// Read-only view of the aggregate index.
    pub fn groups(&self) -> &GroupIndex {
        &self.groups
    }

    /// Whether the next extremum query will be answered without a rebuild.
    pub fn extrema_cached(&self) -> bool {
        self.extrema.is_valid()
    }

    /// Both extrema, rebuilding the cache first if a mutation invalidated it.
    pub fn extrema(&mut self) -> &Extrema {
        self.extrema.get_or_rebuild(&self.groups)
    }

    pub fn most_members(&mut self) -> Option<&Leader<usize>> {
        self.extrema().most_members.as_ref()
    }

    pub fn highest_average(&mut self) -> Option<&Leader<f64>> {
        self.extrema().highest_average.as_ref()
    }

    /// Label of the largest group, or `None` for an empty store.
    pub fn group_with_most_members(&mut self) -> Option<&str> {
        self.most_members().map(|leader| leader.group.as_str())
    }

    /// Label of the group with the best mean score, or `None` for an empty store.
    pub fn group_with_highest_average(&mut self) -> Option<&str> {
        self.highest_average().map(|leader| leader.group.as_str())
    }

    /// Clones every record, in unspecified order.
    pub fn snapshot(&self) -> Vec<Record> {
        self.records.values().cloned().collect()
    }

    /// Clones every record ordered by birth `(month, day)`.
    ///
    /// Records sharing a birthday keep their snapshot order. Fails if any record
    /// carries a month outside `1..=12` or a day outside `1..=31`.
    pub fn sorted_snapshot(&self) -> Result<Vec<Record>> {
        let refs: Vec<&Record> = self.records.values().collect();
        let order = radix_order(&refs).inspect_err(|err| {
            if let RosterError::KeyOutOfRange { index, .. } = err {
                warn!(id = %refs[*index].id, "{err}");
            }
        })?;
        Ok(order.into_iter().map(|i| refs[i].clone()).collect())
    }

    pub fn clear(&mut self) {
        self.records.clear();
        self.groups.clear();
        self.extrema.invalidate();
    }
}

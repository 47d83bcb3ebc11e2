//! Incrementally maintained per-group aggregates.

use std::collections::HashMap;

use crate::core::GroupStats;
use crate::error::{Result, RosterError};

/// Maps each group label to its member count and score sum.
///
/// Entries exist only while a group has at least one member: removing the last
/// member deletes the entry, so no scan ever sees an empty group.
#[derive(Clone, Debug, Default)]
pub struct GroupIndex {
    groups: HashMap<String, GroupStats>,
}

impl GroupIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Counts one more member with `score` in `group`, creating the entry if needed.
    pub fn add_member(&mut self, group: &str, score: f64) {
        // Only new groups allocate a label.
        if let Some(stats) = self.groups.get_mut(group) {
            stats.count += 1;
            stats.sum += score;
            return;
        }
        self.groups
            .insert(group.to_owned(), GroupStats { count: 1, sum: score });
    }

    /// Takes one member with `score` out of `group`, dropping the entry at zero.
    ///
    /// Removing from a group the index does not hold is a caller bug and is
    /// reported as [`RosterError::UnknownGroup`] without touching the index.
    pub fn remove_member(&mut self, group: &str, score: f64) -> Result<()> {
        let Some(stats) = self.groups.get_mut(group) else {
            return Err(RosterError::UnknownGroup(group.to_owned()));
        };
        if stats.count > 1 {
            stats.count -= 1;
            stats.sum -= score;
        } else {
            self.groups.remove(group);
        }
        Ok(())
    }

    /// Moves one member's `score` from `from` to `to`.
    ///
    /// The removal is checked first, so a failed move leaves the index untouched.
    pub fn transfer(&mut self, from: &str, to: &str, score: f64) -> Result<()> {
        self.remove_member(from, score)?;
        self.add_member(to, score);
        Ok(())
    }

    pub fn get(&self, group: &str) -> Option<GroupStats> {
        self.groups.get(group).copied()
    }

    /// Iterates `(label, stats)` pairs in unspecified order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, GroupStats)> + '_ {
        self.groups.iter().map(|(label, stats)| (label.as_str(), *stats))
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> + '_ {
        self.groups.keys().map(String::as_str)
    }

    /// Number of distinct groups.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Sum of member counts across all groups.
    pub fn total_members(&self) -> usize {
        self.groups.values().map(|stats| stats.count).sum()
    }

    pub fn clear(&mut self) {
        self.groups.clear();
    }
}

impl<'a> Extend<(&'a str, f64)> for GroupIndex {
    fn extend<I: IntoIterator<Item = (&'a str, f64)>>(&mut self, iter: I) {
        iter.into_iter()
            .for_each(|(group, score)| self.add_member(group, score));
    }
}

impl<'a> FromIterator<(&'a str, f64)> for GroupIndex {
    fn from_iter<I: IntoIterator<Item = (&'a str, f64)>>(iter: I) -> Self {
        let mut index = Self::new();
        index.extend(iter);
        index
    }
}


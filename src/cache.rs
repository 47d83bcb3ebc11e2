//! Lazily rebuilt cache of the two group extrema.
//!
//! The cache is either [`ExtremaCache::Invalid`] or holds a complete [`Extrema`]
//! computed from the current [`GroupIndex`]. There is no stale-but-readable state:
//! any index mutation must call [`ExtremaCache::invalidate`], and the next query
//! rebuilds in one pass over the groups (not the records).
//!
//! Ties are broken deterministically: among groups with an equal count (or equal
//! average) the lexicographically smallest label wins, independent of hash order.

use tracing::{debug, trace};

use crate::core::{GroupStats, Record};
use crate::index::GroupIndex;

/// A winning group together with the metric it won on.
#[derive(Clone, Debug, PartialEq)]
pub struct Leader<M> {
    pub group: String,
    pub value: M,
}

/// The two argmax results over the group aggregates.
///
/// Both are `None` exactly when there are no groups.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Extrema {
    pub most_members: Option<Leader<usize>>,
    pub highest_average: Option<Leader<f64>>,
}

impl Extrema {
    /// Computes both extrema in a single pass over `(label, stats)` entries.
    pub fn scan<'a, I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, GroupStats)>,
    {
        let mut most: Option<(&str, usize)> = None;
        let mut best: Option<(&str, f64)> = None;

        for (label, stats) in entries {
            let count = stats.count;
            let takes_count = match most {
                None => true,
                Some((held, top)) => count > top || (count == top && label < held),
            };
            if takes_count {
                most = Some((label, count));
            }

            let average = stats.average();
            let takes_average = match best {
                None => true,
                Some((held, top)) => average > top || (average == top && label < held),
            };
            if takes_average {
                best = Some((label, average));
            }
        }

        Self {
            most_members: most.map(|(group, value)| Leader {
                group: group.to_owned(),
                value,
            }),
            highest_average: best.map(|(group, value)| Leader {
                group: group.to_owned(),
                value,
            }),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.most_members.is_none()
    }
}

/// Cached [`Extrema`] over a [`GroupIndex`].
#[derive(Clone, Debug, Default)]
pub enum ExtremaCache {
    #[default]
    Invalid,
    Valid(Extrema),
}

impl ExtremaCache {
    pub fn new() -> Self {
        Self::Invalid
    }

    /// Drops the cached result. Must follow every change to the index.
    #[inline]
    pub fn invalidate(&mut self) {
        if self.is_valid() {
            trace!("extrema cache invalidated");
        }
        *self = Self::Invalid;
    }

    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid(_))
    }

    /// The cached result, if any, without rebuilding.
    pub fn peek(&self) -> Option<&Extrema> {
        match self {
            Self::Valid(extrema) => Some(extrema),
            Self::Invalid => None,
        }
    }

    /// Returns the cached extrema, rebuilding from `index` first if invalid.
    pub fn get_or_rebuild(&mut self, index: &GroupIndex) -> &Extrema {
        match self {
            Self::Valid(extrema) => extrema,
            Self::Invalid => {
                *self = Self::Valid(Extrema::scan(index.entries()));
                debug!(groups = index.len(), "rebuilt group extrema");
                self.get_or_rebuild(index)
            }
        }
    }
}

/// Recomputes the extrema straight from records, bypassing any index or cache.
///
/// Uses the same tie-break as the cached path, so both always agree.
pub fn rescan_extrema<'a, I>(records: I) -> Extrema
where
    I: IntoIterator<Item = &'a Record>,
{
    let index: GroupIndex = records
        .into_iter()
        .map(|record| (record.group.as_str(), record.score))
        .collect();
    Extrema::scan(index.entries())
}

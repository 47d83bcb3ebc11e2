//! # Roster
//!
//! `roster` is an in-memory store of student records keyed by a unique identifier
//! (an email address). Records belong to a group and carry a score. On top of the
//! plain map it keeps two structures that make the interesting queries cheap:
//!
//! - **Group aggregates**: a per-group member count and score sum, updated in `O(1)`
//!   on every insert and group move. Empty groups are dropped.
//! - **Lazy extrema**: the group with the most members and the group with the highest
//!   average score are cached. A mutation only invalidates the cache; the next query
//!   rebuilds it in one pass over the groups, not the records.
//!
//! Records can also be ordered by birthday (`month`, then `day`) with a stable
//! two-pass LSD radix sort in `O(n)`, with no comparisons.
//!
//! ## Usage
//!
//! ```rust
//! use roster::{Record, RosterStore};
//!
//! let mut store = RosterStore::new();
//! store.insert(Record::new("a@x", "G1", 8.0).with_birth(2001, 3, 15)).unwrap();
//! store.insert(Record::new("b@x", "G1", 4.0).with_birth(2002, 1, 20)).unwrap();
//! store.insert(Record::new("c@x", "G2", 9.0).with_birth(2001, 3, 2)).unwrap();
//!
//! assert_eq!(store.group_with_most_members(), Some("G1"));
//! assert_eq!(store.group_with_highest_average(), Some("G2"));
//!
//! let ids: Vec<String> = store
//!     .sorted_snapshot()
//!     .unwrap()
//!     .into_iter()
//!     .map(|r| r.id)
//!     .collect();
//! assert_eq!(ids, vec!["b@x", "c@x", "a@x"]);
//! ```
//!
//! ### Custom keys
//!
//! Any type with two small bounded integer keys can be sorted by implementing
//! [`CompositeKey`], or ad hoc with [`radix_order_by`](algo::radix_order_by).
//!
//! ## Ties
//!
//! When several groups share the top count (or the top average), the
//! lexicographically smallest label is reported. The answer never depends on hash
//! iteration order.
//!
//! ## Threading
//!
//! The store is single-owner. Mutations touch the record map, the aggregates and
//! the cache together, so concurrent use needs one lock around the whole
//! [`RosterStore`]. Sorting works on a snapshot and needs no lock of its own.

pub mod algo;
pub mod cache;
pub mod config;
pub mod core;
pub mod delimited;
pub mod error;
pub mod index;
pub mod store;
pub mod workload;

pub use crate::algo::{radix_order, radix_sort_mut, radix_sorted};
pub use crate::cache::{Extrema, Leader};
pub use crate::core::{CompositeKey, GroupStats, Record};
pub use crate::error::{Result, RosterError};
pub use crate::store::RosterStore;

pub mod prelude {
    pub use crate::algo::{radix_order, radix_order_by, radix_sort_mut, radix_sorted};
    pub use crate::cache::{Extrema, Leader};
    pub use crate::core::{BirthDate, CompositeKey, GroupStats, KeySpec, Record};
    pub use crate::error::RosterError;
    pub use crate::store::RosterStore;
}

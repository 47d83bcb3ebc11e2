//! Error type shared by the roster store, the sorter and the delimited collaborators.

use std::io;

use thiserror::Error;

/// Errors raised by roster operations.
///
/// Ordinary misses are not errors: an absent identifier is reported as `None`/`false`
/// and an empty roster has no extrema (`None`). The variants here cover caller contract
/// violations and the I/O performed by the ingestion/serialization helpers.
#[derive(Debug, Error)]
pub enum RosterError {
    /// A sort key fell outside the declared `[1, max]` range.
    #[error("record #{index}: {key} key {value} is outside 1..={max}")]
    KeyOutOfRange {
        index: usize,
        key: &'static str,
        value: u8,
        max: u8,
    },
    /// A record carried a NaN or infinite score.
    #[error("record '{id}': score {score} is not finite")]
    NonFiniteScore { id: String, score: f64 },
    /// A member was removed from a group the index does not track.
    #[error("group '{0}' has no members in the aggregate index")]
    UnknownGroup(String),
    /// A delimited row could not be turned into a record.
    #[error("line {line}: {reason}")]
    Malformed { line: usize, reason: String },
    #[error(transparent)]
    Io(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, RosterError>;

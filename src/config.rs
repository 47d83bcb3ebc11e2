use std::time::Duration;

/// What to do with a delimited row that cannot be turned into a record.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MalformedPolicy {
    /// Log the row at `warn` and continue.
    #[default]
    Skip,
    /// Stop ingestion with [`RosterError::Malformed`](crate::error::RosterError::Malformed).
    Fail,
}

/// Controls how delimited student rows are read.
#[derive(Clone, Debug)]
pub struct IngestOptions {
    /// Field separator, used for both reading and writing.
    pub delimiter: char,
    /// Whether the first line is a header to be skipped.
    pub has_header: bool,
    /// Handling of short rows and non-numeric year/month/day/score fields.
    pub malformed: MalformedPolicy,
}

impl Default for IngestOptions {
    fn default() -> Self {
        Self {
            delimiter: ',',
            has_header: true,
            malformed: MalformedPolicy::default(),
        }
    }
}

/// Relative weights of the three operations issued by the workload harness.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OpMix {
    /// Weight of "group with most members" queries.
    pub most_members: u32,
    /// Weight of group moves for a random record.
    pub move_group: u32,
    /// Weight of "group with highest average" queries.
    pub highest_average: u32,
}

impl OpMix {
    pub fn total(&self) -> u32 {
        self.most_members + self.move_group + self.highest_average
    }
}

impl Default for OpMix {
    fn default() -> Self {
        Self {
            most_members: 5,
            move_group: 1,
            highest_average: 100,
        }
    }
}

/// How the workload harness answers extremum queries.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Strategy {
    /// Through the store's lazily rebuilt extrema cache.
    #[default]
    Cached,
    /// By regrouping every record on each query.
    Rescan,
}

/// Top-level workload harness configuration.
#[derive(Clone, Debug)]
pub struct WorkloadConfig {
    /// Wall-clock budget for the run.
    pub duration: Duration,
    /// Optional cap on issued operations; the run stops at whichever limit hits first.
    pub max_ops: Option<u64>,
    /// Operation weights.
    pub mix: OpMix,
    /// RNG seed; `None` draws one from the OS.
    pub seed: Option<u64>,
    pub strategy: Strategy,
}

impl Default for WorkloadConfig {
    fn default() -> Self {
        Self {
            duration: Duration::from_secs(10),
            max_ops: None,
            mix: OpMix::default(),
            seed: None,
            strategy: Strategy::default(),
        }
    }
}

//! Randomized operation mix for measuring query throughput.
//!
//! Each step draws one of three operations by weight from [`OpMix`](crate::config::OpMix): a
//! most-members query, a group move for a random record, or a highest-average
//! query. Identifier and group pools are captured once when the run starts.

use std::hint::black_box;
use std::time::{Duration, Instant};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{info, warn};

use crate::cache::rescan_extrema;
use crate::config::{Strategy, WorkloadConfig};
use crate::core::Record;
use crate::error::Result;
use crate::store::RosterStore;

/// Operation counts and timing of one workload run.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct WorkloadReport {
    pub elapsed: Duration,
    pub most_members: u64,
    pub move_group: u64,
    pub highest_average: u64,
}

impl WorkloadReport {
    pub fn total(&self) -> u64 {
        self.most_members + self.move_group + self.highest_average
    }

    pub fn ops_per_sec(&self) -> f64 {
        let secs = self.elapsed.as_secs_f64();
        if secs == 0.0 {
            return 0.0;
        }
        self.total() as f64 / secs
    }
}

/// Runs the configured operation mix against `store`.
///
/// Stops when `config.duration` has elapsed or `config.max_ops` operations were
/// issued. An empty store, or a mix whose weights sum to zero, yields an empty report.
pub fn run_workload(store: &mut RosterStore, config: &WorkloadConfig) -> Result<WorkloadReport> {
    let ids: Vec<String> = store.identifiers().map(str::to_owned).collect();
    let groups: Vec<String> = store.group_labels().map(str::to_owned).collect();
    let mix = config.mix;
    let weight = mix.total();

    if ids.is_empty() || weight == 0 {
        warn!(records = ids.len(), weight, "nothing to run");
        return Ok(WorkloadReport::default());
    }

    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    let mut report = WorkloadReport::default();
    let start = Instant::now();

    while start.elapsed() < config.duration {
        if config.max_ops.is_some_and(|max| report.total() >= max) {
            break;
        }

        let pick = rng.random_range(0..weight);
        if pick < mix.most_members {
            match config.strategy {
                Strategy::Cached => {
                    black_box(store.group_with_most_members());
                }
                Strategy::Rescan => {
                    black_box(rescan_extrema(store.records()).most_members);
                }
            }
            report.most_members += 1;
        } else if pick < mix.most_members + mix.move_group {
            let id = &ids[rng.random_range(0..ids.len())];
            let group = &groups[rng.random_range(0..groups.len())];
            store.move_group(id, group)?;
            report.move_group += 1;
        } else {
            match config.strategy {
                Strategy::Cached => {
                    black_box(store.group_with_highest_average());
                }
                Strategy::Rescan => {
                    black_box(rescan_extrema(store.records()).highest_average);
                }
            }
            report.highest_average += 1;
        }
    }

    report.elapsed = start.elapsed();
    info!(
        total = report.total(),
        elapsed_ms = report.elapsed.as_millis() as u64,
        strategy = ?config.strategy,
        "workload finished"
    );
    Ok(report)
}

const NAMES: [&str; 8] = [
    "Ivan", "Olena", "Taras", "Maria", "Andrii", "Sofiia", "Petro", "Iryna",
];
const SURNAMES: [&str; 8] = [
    "Kravchenko",
    "Shevchenko",
    "Bondarenko",
    "Tkachenko",
    "Melnyk",
    "Koval",
    "Boiko",
    "Lysenko",
];

/// Generates `count` valid records spread over `groups` group labels.
///
/// Identifiers are unique. Birth days stay within `1..=28` and scores are
/// multiples of `0.01` in `0.0..=10.0`.
pub fn synthetic_records<R: Rng>(count: usize, groups: usize, rng: &mut R) -> Vec<Record> {
    let groups = groups.max(1);
    (0..count)
        .map(|i| {
            let name = NAMES[rng.random_range(0..NAMES.len())];
            let surname = SURNAMES[rng.random_range(0..SURNAMES.len())];
            let group = format!("GR-{:02}", rng.random_range(0..groups));
            let score = rng.random_range(0..=1000u32) as f64 / 100.0;
            Record::new(
                format!("{}.{}{i}@student.org", name.to_lowercase(), surname.to_lowercase()),
                group,
                score,
            )
            .with_name(name, surname)
            .with_birth(
                rng.random_range(1995..=2006),
                rng.random_range(1..=12),
                rng.random_range(1..=28),
            )
            .with_phone(format!("+380{:09}", rng.random_range(0..1_000_000_000u32)))
        })
        .collect()
}

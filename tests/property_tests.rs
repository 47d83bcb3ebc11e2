//! Property-based tests for the roster store and the birthday sort.
//!
//! These tests verify invariants that should hold for any operation sequence:
//! - Group member counts add up to the number of records
//! - No group entry is ever empty
//! - Cached extrema equal a from-scratch recomputation
//! - The radix sort agrees with a stable comparison sort

use proptest::prelude::*;
use roster::cache::rescan_extrema;
use roster::prelude::*;

#[derive(Clone, Debug)]
enum Op {
    Insert { id: u8, group: u8, score: i8 },
    Move { id: u8, group: u8 },
    Remove { id: u8 },
    Query,
}

fn arb_op() -> impl Strategy<Value = Op> {
    // Small id/group domains force collisions, replacements and emptied groups.
    prop_oneof![
        3 => (0u8..24, 0u8..6, -40i8..=40).prop_map(|(id, group, score)| Op::Insert { id, group, score }),
        4 => (0u8..24, 0u8..6).prop_map(|(id, group)| Op::Move { id, group }),
        1 => (0u8..24).prop_map(|id| Op::Remove { id }),
        2 => Just(Op::Query),
    ]
}

// Quarter-point scores keep every sum exact, so incremental and rescanned
// averages compare equal.
fn record(id: u8, group: u8, score: i8) -> Record {
    Record::new(format!("s{id}"), format!("G{group}"), f64::from(score) / 4.0)
}

fn apply(store: &mut RosterStore, op: &Op) {
    match *op {
        Op::Insert { id, group, score } => {
            store.insert(record(id, group, score)).unwrap();
        }
        Op::Move { id, group } => {
            let present = store.contains(&format!("s{id}"));
            let moved = store
                .move_group(&format!("s{id}"), &format!("G{group}"))
                .unwrap();
            assert_eq!(moved, present);
        }
        Op::Remove { id } => {
            store.remove(&format!("s{id}")).unwrap();
        }
        Op::Query => {
            store.extrema();
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn counts_sum_to_record_count(ops in prop::collection::vec(arb_op(), 0..80)) {
        let mut store = RosterStore::new();
        for op in &ops {
            apply(&mut store, op);
            prop_assert_eq!(store.groups().total_members(), store.len());
        }
    }

    #[test]
    fn no_group_is_empty(ops in prop::collection::vec(arb_op(), 0..80)) {
        let mut store = RosterStore::new();
        for op in &ops {
            apply(&mut store, op);
            for (label, stats) in store.groups().entries() {
                prop_assert!(stats.count > 0, "group {} has count {}", label, stats.count);
            }
        }
    }

    #[test]
    fn index_matches_records(ops in prop::collection::vec(arb_op(), 0..80)) {
        let mut store = RosterStore::new();
        for op in &ops {
            apply(&mut store, op);
        }
        for (label, stats) in store.groups().entries() {
            let members: Vec<&Record> = store.records().filter(|r| r.group == label).collect();
            prop_assert_eq!(stats.count, members.len());
            prop_assert_eq!(stats.sum, members.iter().map(|r| r.score).sum::<f64>());
        }
    }

    #[test]
    fn cache_matches_rescan(ops in prop::collection::vec(arb_op(), 0..80)) {
        let mut store = RosterStore::new();
        for op in &ops {
            apply(&mut store, op);
            let expected = rescan_extrema(store.records());
            prop_assert_eq!(store.extrema(), &expected);
        }
    }

    #[test]
    fn repeated_move_is_idempotent(
        ops in prop::collection::vec(arb_op(), 0..40),
        id in 0u8..24,
        group in 0u8..6,
    ) {
        let mut store = RosterStore::new();
        for op in &ops {
            apply(&mut store, op);
        }
        let snapshot = |store: &RosterStore| {
            let mut entries: Vec<(String, GroupStats)> = store
                .groups()
                .entries()
                .map(|(label, stats)| (label.to_owned(), stats))
                .collect();
            entries.sort_by(|a, b| a.0.cmp(&b.0));
            entries
        };

        apply(&mut store, &Op::Move { id, group });
        let first = snapshot(&store);
        apply(&mut store, &Op::Move { id, group });
        prop_assert_eq!(first, snapshot(&store));
    }

    #[test]
    fn radix_matches_stable_sort(
        keys in prop::collection::vec((1u8..=12, 1u8..=31), 0..300),
    ) {
        let tagged: Vec<(usize, BirthDate)> = keys
            .iter()
            .enumerate()
            .map(|(i, &(month, day))| (i, BirthDate::new(2000, month, day)))
            .collect();
        let dates: Vec<BirthDate> = tagged.iter().map(|(_, d)| *d).collect();

        let order = radix_order(&dates).unwrap();

        let mut expected = tagged.clone();
        expected.sort_by_key(|(_, d)| (d.month, d.day));
        let expected: Vec<usize> = expected.into_iter().map(|(i, _)| i).collect();
        prop_assert_eq!(order, expected);
    }
}

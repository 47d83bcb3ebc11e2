use roster::core::CompositeKey;
use roster::prelude::*;

// Simulate a calendar type owned by another crate.
#[derive(Clone, Debug, PartialEq)]
struct Shift {
    worker: &'static str,
    week: u8,
    weekday: u8,
}

// Implement CompositeKey for the external struct.
// This proves the trait is implementable by "outside crates".
impl CompositeKey for Shift {
    const PRIMARY_MAX: u8 = 53;
    const SECONDARY_MAX: u8 = 7;
    const PRIMARY_NAME: &'static str = "week";
    const SECONDARY_NAME: &'static str = "weekday";

    fn primary(&self) -> u8 {
        self.week
    }

    fn secondary(&self) -> u8 {
        self.weekday
    }
}

fn shift(worker: &'static str, week: u8, weekday: u8) -> Shift {
    Shift {
        worker,
        week,
        weekday,
    }
}

#[test]
fn test_external_struct_compatibility() {
    let shifts = vec![
        shift("ana", 40, 3),
        shift("bo", 2, 7),
        shift("cy", 40, 1),
        shift("di", 2, 7),
    ];

    let indices = radix_order(&shifts).unwrap();

    // sorted: bo (1), di (3), cy (2), ana (0)
    assert_eq!(indices, vec![1, 3, 2, 0]);
}

#[test]
fn test_external_struct_uses_its_own_names_and_ranges() {
    let shifts = vec![shift("ana", 54, 1)];

    let err = radix_order(&shifts).unwrap_err();

    assert!(matches!(
        err,
        RosterError::KeyOutOfRange {
            key: "week",
            max: 53,
            ..
        }
    ));
}

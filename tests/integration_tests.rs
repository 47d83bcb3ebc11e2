use rand::Rng;
use rand::SeedableRng;
use rand::rngs::StdRng;
use roster::prelude::*;

fn birthday(month: u8, day: u8) -> BirthDate {
    BirthDate::new(2000, month, day)
}

fn keys(dates: &[BirthDate]) -> Vec<(u8, u8)> {
    dates.iter().map(|d| (d.month, d.day)).collect()
}

#[test]
fn test_basic_birthday_order() {
    let input = vec![birthday(3, 15), birthday(1, 20), birthday(3, 2), birthday(1, 20)];

    let indices = radix_order(&input).unwrap();

    // Both (1,20) entries keep their input order.
    assert_eq!(indices, vec![1, 3, 2, 0]);
}

#[test]
fn test_stability_on_records() {
    let input = vec![
        Record::new("a", "G", 1.0).with_birth(2001, 3, 15),
        Record::new("b", "G", 1.0).with_birth(1999, 1, 20),
        Record::new("c", "G", 1.0).with_birth(2003, 3, 2),
        Record::new("d", "G", 1.0).with_birth(1990, 1, 20),
    ];

    let sorted = radix_sorted(&input).unwrap();
    let ids: Vec<&str> = sorted.iter().map(|r| r.id.as_str()).collect();

    assert_eq!(ids, vec!["b", "d", "c", "a"]);
}

#[test]
fn test_day_is_less_significant_than_month() {
    // A late day in an early month must come before an early day in a later month.
    let input = vec![birthday(2, 1), birthday(1, 31), birthday(12, 1), birthday(11, 30)];

    let sorted = radix_sorted(&input).unwrap();

    assert_eq!(keys(&sorted), vec![(1, 31), (2, 1), (11, 30), (12, 1)]);
}

#[test]
fn test_fuzz_random_against_stable_sort() {
    let mut rng = StdRng::seed_from_u64(7);

    for _ in 0..200 {
        let count = rng.random_range(0..500);
        let input: Vec<(BirthDate, usize)> = (0..count)
            .map(|i| (birthday(rng.random_range(1..=12), rng.random_range(1..=31)), i))
            .collect();

        let order = radix_order_by(
            &input,
            KeySpec::new("day", 31, |e: &(BirthDate, usize)| e.0.day),
            KeySpec::new("month", 12, |e: &(BirthDate, usize)| e.0.month),
        )
        .unwrap();

        // slice::sort_by_key is stable, so the tags must match exactly.
        let mut expected = input.clone();
        expected.sort_by_key(|e| (e.0.month, e.0.day));

        let actual: Vec<(BirthDate, usize)> = order.iter().map(|&i| input[i]).collect();
        assert_eq!(actual, expected);
    }
}

#[test]
fn test_fuzz_random_mut() {
    let mut rng = StdRng::seed_from_u64(42);

    for _ in 0..2_000 {
        let count = rng.random_range(0..40);
        let mut input: Vec<Record> = (0..count)
            .map(|i| {
                Record::new(format!("id{i}"), "G", 0.0).with_birth(
                    2000,
                    rng.random_range(1..=12),
                    rng.random_range(1..=31),
                )
            })
            .collect();

        let mut expected = input.clone();
        expected.sort_by_key(|r| (r.birth.month, r.birth.day));

        radix_sort_mut(&mut input).unwrap();
        assert_eq!(input, expected);
    }
}

#[test]
fn test_edge_cases_mut() {
    // 1. All same
    let mut input = vec![birthday(6, 6); 50];
    let expected = input.clone();
    radix_sort_mut(&mut input).unwrap();
    assert_eq!(input, expected);

    // 2. Reversed
    let mut input: Vec<BirthDate> = (1..=12)
        .flat_map(|m| (1..=31).map(move |d| birthday(m, d)))
        .rev()
        .collect();
    let mut expected = input.clone();
    expected.sort_by_key(|d| (d.month, d.day));
    radix_sort_mut(&mut input).unwrap();
    assert_eq!(input, expected);

    // 3. Sorted
    let mut input: Vec<BirthDate> = (1..=12).map(|m| birthday(m, m)).collect();
    let expected = input.clone();
    radix_sort_mut(&mut input).unwrap();
    assert_eq!(input, expected);

    // 4. Single
    let mut input = vec![birthday(12, 31)];
    radix_sort_mut(&mut input).unwrap();
    assert_eq!(input, vec![birthday(12, 31)]);
}

#[test]
fn test_output_is_permutation() {
    let mut rng = StdRng::seed_from_u64(3);
    let input: Vec<BirthDate> = (0..1_000)
        .map(|_| birthday(rng.random_range(1..=12), rng.random_range(1..=31)))
        .collect();

    let mut order = radix_order(&input).unwrap();
    order.sort_unstable();

    assert_eq!(order, (0..input.len()).collect::<Vec<_>>());
}

#[test]
fn test_borrowed_records() {
    let owned = vec![
        Record::new("late", "G", 0.0).with_birth(2000, 9, 9),
        Record::new("early", "G", 0.0).with_birth(2000, 2, 9),
    ];
    let refs: Vec<&Record> = owned.iter().collect();

    assert_eq!(radix_order(&refs).unwrap(), vec![1, 0]);
}

#[test]
fn test_empty() {
    let input: Vec<Record> = vec![];
    let indices = radix_order(&input).unwrap();
    assert!(indices.is_empty());

    let mut input: Vec<BirthDate> = vec![];
    radix_sort_mut(&mut input).unwrap();
    assert!(input.is_empty());
}

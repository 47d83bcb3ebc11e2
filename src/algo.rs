//! Composite LSD radix sort over small bounded integer keys.
//!
//! Items are ordered ascending by `(primary, secondary)` with ties kept in input order.
//! Two stable bucket passes do the work:
//! - **Pass 1** distributes by the secondary key (e.g. day of month).
//! - **Pass 2** distributes the result by the primary key (e.g. month).
//!
//! The passes must run least significant first. Each pass is a counting sort over the
//! declared key range, so the whole sort is `O(n + D + M)` with `O(n)` scratch space.
//!
//! The main entry points are [`radix_order`], [`radix_sorted`] and [`radix_sort_mut`].

use crate::core::{CompositeKey, KeySpec};
use crate::error::{Result, RosterError};
use cuneiform::cuneiform;

/// Bucket slots per pass. Keys are `u8`, so one slot per possible value.
const KEY_BUCKETS: usize = 256;

// Cache-aligned histogram.
#[cuneiform]
struct BucketCounts {
    data: [usize; KEY_BUCKETS],
}

/// Computes the stable order of `items` by two explicit key extractors.
///
/// Returns indices such that visiting `items` in that order yields ascending
/// `(primary, secondary)` keys, with equal keys in their original relative order.
///
/// Every key is validated before any pass runs. A key of `0` or above its
/// [`KeySpec::max`] yields [`RosterError::KeyOutOfRange`] naming the first offending item.
///
/// # Examples
///
/// ```
/// use roster::algo::radix_order_by;
/// use roster::core::KeySpec;
///
/// let slots = [(3u8, 15u8), (1, 20), (3, 2), (1, 20)];
/// let order = radix_order_by(
///     &slots,
///     KeySpec::new("day", 31, |s: &(u8, u8)| s.1),
///     KeySpec::new("month", 12, |s: &(u8, u8)| s.0),
/// )
/// .unwrap();
///
/// assert_eq!(order, vec![1, 3, 2, 0]);
/// ```
pub fn radix_order_by<T, S, P>(
    items: &[T],
    secondary: KeySpec<S>,
    primary: KeySpec<P>,
) -> Result<Vec<usize>>
where
    S: Fn(&T) -> u8,
    P: Fn(&T) -> u8,
{
    if items.is_empty() {
        return Ok(vec![]);
    }

    items.iter().enumerate().try_for_each(|(index, item)| {
        check_key(index, item, &secondary)?;
        check_key(index, item, &primary)
    })?;

    let order: Vec<usize> = (0..items.len()).collect();
    let order = bucket_pass(items, &order, &secondary);
    Ok(bucket_pass(items, &order, &primary))
}

/// Computes the stable `(primary, secondary)` order of items implementing [`CompositeKey`].
///
/// # Examples
///
/// ```
/// use roster::{radix_order, Record};
///
/// let records = vec![
///     Record::new("a@x", "G1", 1.0).with_birth(2001, 3, 15),
///     Record::new("b@x", "G1", 1.0).with_birth(2001, 1, 20),
/// ];
///
/// assert_eq!(radix_order(&records).unwrap(), vec![1, 0]);
/// ```
pub fn radix_order<T: CompositeKey>(items: &[T]) -> Result<Vec<usize>> {
    radix_order_by(
        items,
        KeySpec::new(T::SECONDARY_NAME, T::SECONDARY_MAX, T::secondary),
        KeySpec::new(T::PRIMARY_NAME, T::PRIMARY_MAX, T::primary),
    )
}

/// Returns a sorted copy of `items`, leaving the input untouched.
pub fn radix_sorted<T: CompositeKey + Clone>(items: &[T]) -> Result<Vec<T>> {
    let order = radix_order(items)?;
    Ok(order.into_iter().map(|i| items[i].clone()).collect())
}

/// Sorts a mutable slice in-place.
///
/// Computes the order with [`radix_order`] and then applies the permutation by
/// swapping each item straight to its destination. On error the slice is left unchanged.
pub fn radix_sort_mut<T: CompositeKey>(data: &mut [T]) -> Result<()> {
    let order = radix_order(data)?;
    apply_permutation(data, order);
    Ok(())
}

fn check_key<T, F: Fn(&T) -> u8>(index: usize, item: &T, spec: &KeySpec<F>) -> Result<()> {
    let value = (spec.extract)(item);
    if value == 0 || value > spec.max {
        return Err(RosterError::KeyOutOfRange {
            index,
            key: spec.name,
            value,
            max: spec.max,
        });
    }
    Ok(())
}

/// One stable counting pass over `order` by the key in `spec`.
///
/// 1. Counts how many items fall in each bucket.
/// 2. Turns the counts into bucket start offsets (prefix sum over `1..=max`).
/// 3. Scatters indices into a new buffer, preserving their relative order.
fn bucket_pass<T, F: Fn(&T) -> u8>(items: &[T], order: &[usize], spec: &KeySpec<F>) -> Vec<usize> {
    let mut counts = BucketCounts {
        data: [0; KEY_BUCKETS],
    };
    let counts = &mut counts.data;

    order.iter().for_each(|&i| {
        counts[(spec.extract)(&items[i]) as usize] += 1;
    });

    // Bucket 0 is never populated; keys were validated.
    let mut offsets = [0usize; KEY_BUCKETS];
    let mut sum = 0;
    offsets
        .iter_mut()
        .zip(counts.iter())
        .take(spec.max as usize + 1)
        .for_each(|(offset, &count)| {
            *offset = sum;
            sum += count;
        });

    let mut out = vec![0usize; order.len()];
    order.iter().for_each(|&i| {
        let bucket = (spec.extract)(&items[i]) as usize;
        out[offsets[bucket]] = i;
        offsets[bucket] += 1;
    });
    out
}

/// Rearranges `data` so that `data[k]` becomes the old `data[order[k]]`.
///
/// `dest[i]` tracks where the item currently at `i` belongs. Each swap settles
/// one item, so at most `n - 1` swaps run.
fn apply_permutation<T>(data: &mut [T], order: Vec<usize>) {
    let mut dest = vec![0usize; order.len()];
    for (k, &from) in order.iter().enumerate() {
        dest[from] = k;
    }

    for i in 0..data.len() {
        while dest[i] != i {
            let target = dest[i];
            data.swap(i, target);
            dest.swap(i, target);
        }
    }
}

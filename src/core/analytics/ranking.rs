//! Stable ranking and table truncation
//!
//! Sorting returns a new vector and never mutates the aggregated
//! collection. Truncation happens strictly after sorting so the cut
//! reflects the requested order.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

/// Sort direction for table columns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SortDirection {
    /// Smallest values first
    Ascending,
    /// Largest values first
    Descending,
}

/// Stable sort by comparator
///
/// `Vec::sort_by` is stable, and flipping the operands for descending
/// order leaves equal elements at `Ordering::Equal`, so ties keep their
/// insertion order in both directions and repeated sorts of a tied column
/// are deterministic.
pub fn sorted_by<T, F>(rows: &[T], direction: SortDirection, mut cmp: F) -> Vec<T>
where
    T: Clone,
    F: FnMut(&T, &T) -> Ordering,
{
    let mut out = rows.to_vec();
    match direction {
        SortDirection::Ascending => out.sort_by(|a, b| cmp(a, b)),
        SortDirection::Descending => out.sort_by(|a, b| cmp(b, a)),
    }
    out
}

/// Stable sort by key
pub fn sorted_by_key<T, K, F>(rows: &[T], direction: SortDirection, mut key: F) -> Vec<T>
where
    T: Clone,
    K: Ord,
    F: FnMut(&T) -> K,
{
    sorted_by(rows, direction, |a, b| key(a).cmp(&key(b)))
}

/// Largest `n` rows by key
///
/// Ranking runs over fully summed values: callers aggregate first, then
/// rank.
pub fn top_n<T, K, F>(rows: &[T], n: usize, key: F) -> Vec<T>
where
    T: Clone,
    K: Ord,
    F: FnMut(&T) -> K,
{
    truncated(&sorted_by_key(rows, SortDirection::Descending, key), n)
}

/// First `limit` rows of an already-sorted table
pub fn truncated<T: Clone>(rows: &[T], limit: usize) -> Vec<T> {
    rows.iter().take(limit).cloned().collect()
}

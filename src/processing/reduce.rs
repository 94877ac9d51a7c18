//! Reduction primitives shared by every statistic.

use std::collections::BTreeMap;

/// Most frequent value in `values`, or `None` when there are no values.
///
/// Ties are broken by natural order: among values sharing the highest count, the smallest
/// (per [`Ord`]) wins. Numbers therefore resolve ascending and strings lexicographically.
pub fn mode<T, I>(values: I) -> Option<T>
where
    T: Ord,
    I: IntoIterator<Item = T>,
{
    let counts = value_counts(values);
    let mut best: Option<(T, usize)> = None;
    // Ascending iteration plus a strict `>` keeps the smallest of tied values.
    for (value, count) in counts {
        if best.as_ref().map_or(true, |(_, best_count)| count > *best_count) {
            best = Some((value, count));
        }
    }
    best.map(|(value, _)| value)
}

/// Occurrence count per distinct value, keyed in ascending order.
pub fn value_counts<T, I>(values: I) -> BTreeMap<T, usize>
where
    T: Ord,
    I: IntoIterator<Item = T>,
{
    let mut counts = BTreeMap::new();
    for v in values {
        *counts.entry(v).or_insert(0) += 1;
    }
    counts
}

/// Sum of `values`; `0.0` when empty.
pub fn sum<I>(values: I) -> f64
where
    I: IntoIterator<Item = f64>,
{
    values.into_iter().sum()
}

/// Arithmetic mean of `values`, or `None` when empty.
pub fn mean<I>(values: I) -> Option<f64>
where
    I: IntoIterator<Item = f64>,
{
    let (total, n) = values
        .into_iter()
        .fold((0.0, 0usize), |(total, n), v| (total + v, n + 1));
    (n > 0).then(|| total / n as f64)
}

/// Minimum and maximum of `values`, or `None` when empty. NaNs are skipped.
pub fn min_max<I>(values: I) -> Option<(f64, f64)>
where
    I: IntoIterator<Item = f64>,
{
    values
        .into_iter()
        .filter(|v| !v.is_nan())
        .fold(None, |acc, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
}

use std::collections::BTreeMap;

use crate::analyzers::types::Ranked;

/// Computes the arithmetic mean of a slice of values. Returns 0.0 for empty input.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Occurrence count of every distinct value, keyed in ascending order.
pub fn counts<T: Ord>(values: impl IntoIterator<Item = T>) -> BTreeMap<T, usize> {
    let mut counts = BTreeMap::new();
    for value in values {
        *counts.entry(value).or_insert(0) += 1;
    }
    counts
}

/// Most frequent value and its count. Ties go to the lowest value.
///
/// Returns `None` for empty input.
pub fn mode<T: Ord>(values: impl IntoIterator<Item = T>) -> Option<Ranked<T>> {
    let mut best: Option<Ranked<T>> = None;
    for (value, count) in counts(values) {
        match &best {
            Some(b) if b.count >= count => {}
            _ => best = Some(Ranked { value, count }),
        }
    }
    best
}

/// Every distinct value with its count, most frequent first.
///
/// Equal counts keep ascending value order.
pub fn value_counts<T: Ord>(values: impl IntoIterator<Item = T>) -> Vec<Ranked<T>> {
    let mut ranked: Vec<_> = counts(values)
        .into_iter()
        .map(|(value, count)| Ranked { value, count })
        .collect();
    ranked.sort_by(|a, b| b.count.cmp(&a.count));
    ranked
}

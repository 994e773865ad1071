//! Set and sequence helpers shared by the engines.
//!
//! All helpers are total: empty inputs give empty (or vacuously true)
//! outputs.

use std::hash::Hash;

use rustc_hash::FxHashSet;

/// True iff every element of `subset` is in `set`.
pub fn is_superset<T, I>(set: &FxHashSet<T>, subset: I) -> bool
where
    T: Eq + Hash,
    I: IntoIterator<Item = T>,
{
    subset.into_iter().all(|item| set.contains(&item))
}

/// True iff any element of `items` is in `set`.
pub fn intersects<T, I>(set: &FxHashSet<T>, items: I) -> bool
where
    T: Eq + Hash,
    I: IntoIterator<Item = T>,
{
    items.into_iter().any(|item| set.contains(&item))
}

/// Elements of `a` also present in `b`, in `a`'s order, without repeats.
pub fn intersection<T>(a: &[T], b: &[T]) -> Vec<T>
where
    T: Clone + Eq + Hash,
{
    let lookup: FxHashSet<&T> = b.iter().collect();
    let mut seen = FxHashSet::default();
    a.iter()
        .filter(|item| lookup.contains(item) && seen.insert(*item))
        .cloned()
        .collect()
}

/// Keep the first item for each key, preserving input order.
pub fn dedup_by_key<T, K, F>(items: impl IntoIterator<Item = T>, mut key_fn: F) -> Vec<T>
where
    K: Eq + Hash,
    F: FnMut(&T) -> K,
{
    let mut seen = FxHashSet::default();
    items
        .into_iter()
        .filter(|item| seen.insert(key_fn(item)))
        .collect()
}

/// Concatenate nested sequences in order.
pub fn flatten<T>(nested: impl IntoIterator<Item = Vec<T>>) -> Vec<T> {
    nested.into_iter().flatten().collect()
}

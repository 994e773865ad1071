//! Stable random ordering per collection.
//!
//! The first request for a collection takes the leading `reservoir_size`
//! cards, shuffles them (Fisher–Yates), then reservoir-samples
//! `sample_size` of them. The sample is cached under the collection id and
//! every later request for that id returns it verbatim, whatever cards or
//! sizes it passes. Callers must use a fresh id (or [`SamplingCache::clear`])
//! when the underlying cards change.
//!
//! The cache is a plain owned value. Share it across threads by wrapping it
//! in a lock; every operation needs `&mut self`.

use im::Vector;
use rustc_hash::FxHashMap;
use tracing::debug;

use crate::cards::Card;
use crate::core::{CollectionId, CollectionRng};

/// Memoized random samples keyed by collection id.
///
/// ## Example
///
/// ```
/// use card_collection::cards::Card;
/// use card_collection::collection::SamplingCache;
///
/// let cards: Vec<Card> = (0..20).map(|i| Card::new(i.to_string())).collect();
/// let mut cache = SamplingCache::new(42);
///
/// let first = cache.random_sort(&cards, "home".into(), 5, 10);
/// let again = cache.random_sort(&cards[..3], "home".into(), 1, 1);
///
/// assert_eq!(first.len(), 5);
/// assert_eq!(first, again);
/// ```
#[derive(Clone, Debug)]
pub struct SamplingCache {
    entries: FxHashMap<CollectionId, Vector<Card>>,
    rng: CollectionRng,
}

impl SamplingCache {
    /// Create an empty cache drawing from a seeded RNG.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self::with_rng(CollectionRng::new(seed))
    }

    /// Create an empty cache drawing from `rng`.
    #[must_use]
    pub fn with_rng(rng: CollectionRng) -> Self {
        Self {
            entries: FxHashMap::default(),
            rng,
        }
    }

    /// Random sample for `collection_id`, computed once and then reused.
    ///
    /// Length is `min(sample_size, reservoir_size, cards.len())` on the
    /// first call. The returned vector is a cheap clone of the cached one.
    pub fn random_sort(
        &mut self,
        cards: &[Card],
        collection_id: CollectionId,
        sample_size: usize,
        reservoir_size: usize,
    ) -> Vector<Card> {
        if let Some(cached) = self.entries.get(&collection_id) {
            debug!(collection = %collection_id, cards = cached.len(), "sampling cache hit");
            return cached.clone();
        }

        let mut stream: Vec<Card> = cards.iter().take(reservoir_size).cloned().collect();
        self.rng.shuffle(&mut stream);
        let sample: Vector<Card> = reservoir_sample(stream, sample_size, &mut self.rng)
            .into_iter()
            .collect();

        debug!(
            collection = %collection_id,
            input = cards.len(),
            sampled = sample.len(),
            "sampling cache miss"
        );
        self.entries.insert(collection_id, sample.clone());
        sample
    }

    /// Cached sample for `collection_id`, if any.
    #[must_use]
    pub fn get(&self, collection_id: &CollectionId) -> Option<&Vector<Card>> {
        self.entries.get(collection_id)
    }

    /// Check whether `collection_id` has a cached sample.
    #[must_use]
    pub fn contains(&self, collection_id: &CollectionId) -> bool {
        self.entries.contains_key(collection_id)
    }

    /// Drop one cached sample so the next request reshuffles.
    pub fn invalidate(&mut self, collection_id: &CollectionId) -> bool {
        self.entries.remove(collection_id).is_some()
    }

    /// Drop every cached sample.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Number of cached collections.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if nothing is cached.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Select `sample_size` items from `stream` (Algorithm R).
///
/// The first `sample_size` items seed the reservoir. Item `i` after that
/// replaces slot `j` when a uniform draw `j` in `[0, i]` is below
/// `sample_size`.
pub fn reservoir_sample<T>(stream: Vec<T>, sample_size: usize, rng: &mut CollectionRng) -> Vec<T> {
    let mut reservoir: Vec<T> = Vec::with_capacity(sample_size.min(stream.len()));

    for (i, item) in stream.into_iter().enumerate() {
        if i < sample_size {
            reservoir.push(item);
            continue;
        }
        let j = rng.random_index(0, i + 1);
        if let Some(slot) = reservoir.get_mut(j) {
            *slot = item;
        }
    }
    reservoir
}

#[cfg(test)]
mod tests {
    use super::*;
    use rustc_hash::FxHashSet;

    fn deck(n: usize) -> Vec<Card> {
        (0..n).map(|i| Card::new(format!("card-{i}"))).collect()
    }

    #[test]
    fn test_sample_length() {
        let cards = deck(30);
        let mut cache = SamplingCache::new(1);

        assert_eq!(cache.random_sort(&cards, "a".into(), 5, 20).len(), 5);
        assert_eq!(cache.random_sort(&cards, "b".into(), 25, 10).len(), 10);
        assert_eq!(cache.random_sort(&cards[..4], "c".into(), 8, 10).len(), 4);
        assert_eq!(cache.random_sort(&[], "d".into(), 8, 10).len(), 0);
        assert_eq!(cache.random_sort(&cards, "e".into(), 0, 10).len(), 0);
    }

    #[test]
    fn test_sample_drawn_from_reservoir_prefix() {
        let cards = deck(100);
        let prefix: FxHashSet<_> = cards[..10].iter().map(|c| c.id.clone()).collect();
        let mut cache = SamplingCache::new(7);

        let sample = cache.random_sort(&cards, "p".into(), 6, 10);
        let ids: FxHashSet<_> = sample.iter().map(|c| c.id.clone()).collect();

        assert_eq!(ids.len(), 6, "no duplicates");
        assert!(ids.is_subset(&prefix));
    }

    #[test]
    fn test_cache_hit_ignores_new_arguments() {
        let mut cache = SamplingCache::new(3);
        let first = cache.random_sort(&deck(20), "home".into(), 5, 20);
        let second = cache.random_sort(&deck(3), "home".into(), 2, 2);

        assert_eq!(first, second);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_distinct_ids_cached_separately() {
        let cards = deck(20);
        let mut cache = SamplingCache::new(3);
        cache.random_sort(&cards, 1u64.into(), 5, 20);
        cache.random_sort(&cards, 2u64.into(), 5, 20);

        assert_eq!(cache.len(), 2);
        assert!(cache.contains(&CollectionId::from(1u64)));
        assert!(cache.get(&CollectionId::from(2u64)).is_some());
    }

    #[test]
    fn test_invalidate_and_clear() {
        let cards = deck(10);
        let mut cache = SamplingCache::new(5);
        let id = CollectionId::new("x");

        cache.random_sort(&cards, id.clone(), 3, 10);
        assert!(cache.invalidate(&id));
        assert!(!cache.invalidate(&id));

        let fresh = cache.random_sort(&cards[..2], id.clone(), 3, 10);
        assert_eq!(fresh.len(), 2);

        cache.clear();
        assert!(cache.is_empty());
    }

    #[test]
    fn test_same_seed_same_sample() {
        let cards = deck(40);
        let mut a = SamplingCache::new(99);
        let mut b = SamplingCache::new(99);

        assert_eq!(
            a.random_sort(&cards, "s".into(), 10, 30),
            b.random_sort(&cards, "s".into(), 10, 30)
        );
    }

    #[test]
    fn test_reservoir_sample_small_stream() {
        let mut rng = CollectionRng::new(1);
        assert_eq!(reservoir_sample(vec![1, 2, 3], 5, &mut rng), vec![1, 2, 3]);
        assert!(reservoir_sample(Vec::<u8>::new(), 5, &mut rng).is_empty());
    }

    #[test]
    fn test_reservoir_sample_roughly_uniform() {
        let mut rng = CollectionRng::new(2024);
        let mut counts = [0u32; 10];
        for _ in 0..5000 {
            for item in reservoir_sample((0..10usize).collect(), 3, &mut rng) {
                counts[item] += 1;
            }
        }
        // expected 1500 each
        for count in counts {
            assert!((1300..1700).contains(&count), "count {count} out of range");
        }
    }
}

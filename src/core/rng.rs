//! Seeded randomness for collection sampling.
//!
//! Every draw goes through `next_unit`, a uniform float in `[0, 1)`, and
//! integers are derived from it the same way everywhere:
//! `floor(rand * (end - start)) + start`.
//!
//! ```
//! use card_collection::core::CollectionRng;
//!
//! let mut a = CollectionRng::new(7);
//! let mut b = CollectionRng::new(7);
//! assert_eq!(a.random_index(0, 1000), b.random_index(0, 1000));
//! ```

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Deterministic RNG used by the sampling engine.
#[derive(Clone, Debug)]
pub struct CollectionRng {
    inner: ChaCha8Rng,
}

impl CollectionRng {
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Uniform float in `[0, 1)`.
    pub fn next_unit(&mut self) -> f64 {
        self.inner.gen::<f64>()
    }

    /// Uniform integer in `[start, end)`. Returns `start` when the range
    /// is empty.
    pub fn random_index(&mut self, start: usize, end: usize) -> usize {
        if end <= start {
            return start;
        }
        let span = (end - start) as f64;
        let offset = (self.next_unit() * span).floor() as usize;
        // rand * span can round up to span for very large spans
        start + offset.min(end - start - 1)
    }

    /// Shuffle a slice in place (Fisher–Yates, back to front).
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        for i in (1..slice.len()).rev() {
            let j = self.random_index(0, i + 1);
            slice.swap(i, j);
        }
    }
}

//! Randomness seam for the simulated worker.
//!
//! Every draw goes through [`Randomness`] so tests can swap the thread-local
//! generator for a seeded one and get reproducible delays and greetings.

use std::ops::Range;
use std::sync::Mutex;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Uniform integer source, safe to call from many tasks at once.
pub trait Randomness: Send + Sync {
    /// Uniform draw from `range` (half-open). Empty ranges yield `range.start`.
    fn gen_range(&self, range: Range<u64>) -> u64;
}

/// Production source backed by `rand::thread_rng()`.
///
/// Each runtime thread owns its own generator, so concurrent callers never
/// contend on shared state.
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadRandomness;

impl Randomness for ThreadRandomness {
    fn gen_range(&self, range: Range<u64>) -> u64 {
        if range.is_empty() {
            return range.start;
        }
        rand::thread_rng().gen_range(range)
    }
}

/// Deterministic source for tests and reproducible runs.
#[derive(Debug)]
pub struct SeededRandomness {
    rng: Mutex<StdRng>,
}

impl SeededRandomness {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl Randomness for SeededRandomness {
    fn gen_range(&self, range: Range<u64>) -> u64 {
        if range.is_empty() {
            return range.start;
        }
        // A poisoned lock still holds a usable generator.
        let mut rng = self.rng.lock().unwrap_or_else(|e| e.into_inner());
        rng.gen_range(range)
    }
}

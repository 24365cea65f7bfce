//! Deterministic per-tracker RNG.
//!
//! # Determinism strategy
//!
//! Each tracker gets its own independent `SmallRng` seeded by:
//!
//!   seed = global_seed XOR (tracker_id * MIXING_CONSTANT)
//!
//! The mixing constant is the 64-bit fractional part of the golden ratio,
//! which spreads consecutive tracker IDs uniformly across the seed space.
//! This means:
//!
//! - Trackers never share RNG state (no contention, no ordering dependency
//!   between workers).
//! - Jittered travel and dwell times for a given tracker depend only on the
//!   run's seed and the tracker's ID, not on which worker advanced it or in
//!   what order — a run with the same inputs produces the same schedule
//!   within each worker.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::TrackerId;

/// 64-bit fractional golden-ratio constant for seed mixing.
const MIXING_CONSTANT: u64 = 0x9e37_79b9_7f4a_7c15;

/// Per-tracker deterministic RNG.
///
/// Owned by exactly one tracker; the type is `Send` but deliberately not
/// `Clone`, so RNG state cannot be accidentally forked mid-run.
#[derive(Debug)]
pub struct TrackerRng(SmallRng);

impl TrackerRng {
    /// Seed deterministically from the run's global seed and a tracker ID.
    pub fn new(global_seed: u64, tracker: TrackerId) -> Self {
        let seed = global_seed ^ (tracker.0 as u64).wrapping_mul(MIXING_CONSTANT);
        TrackerRng(SmallRng::seed_from_u64(seed))
    }

    /// Generate a value uniformly in `range`.
    #[inline]
    pub fn gen_range<T, R>(&mut self, range: R) -> T
    where
        T: rand::distributions::uniform::SampleUniform,
        R: rand::distributions::uniform::SampleRange<T>,
    {
        self.0.gen_range(range)
    }

    /// Multiply `secs` by a uniform factor in `[1 - frac, 1 + frac]`.
    ///
    /// Used for travel and dwell jitter.  Always returns at least 1 second so
    /// jitter can never produce a zero-length interval.
    pub fn jitter_secs(&mut self, secs: i64, frac: f64) -> i64 {
        let factor = self.0.gen_range(1.0 - frac..=1.0 + frac);
        ((secs as f64 * factor) as i64).max(1)
    }
}

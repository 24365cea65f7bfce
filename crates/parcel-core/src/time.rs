//! Simulated time model.
//!
//! # Design
//!
//! Simulated time is a Unix timestamp in whole seconds, wrapped in the
//! `SimTime` newtype.  The simulation epoch (`startTime`) comes either from
//! configuration or from the store's `current_time()` at bootstrap; every
//! tracker's next-wake-time is an absolute `SimTime` at or after that epoch.
//!
//! Using integer seconds as the canonical unit keeps all schedule arithmetic
//! exact (no floating-point drift) and comparisons O(1).  Sub-second
//! resolution is pointless for package logistics, where the shortest
//! modelled interval is a dwell of minutes.
//!
//! There is deliberately no global clock type: simulated time is carried by
//! the entities themselves (each tracker knows when it next runs) and is
//! never synchronized across workers.

use std::fmt;

/// An absolute simulated timestamp, in Unix seconds.
///
/// Stored as `i64` so timestamps before 1970 (and arbitrary offsets in
/// tests) are representable without surprises.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[derive(serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct SimTime(pub i64);

impl SimTime {
    pub const ZERO: SimTime = SimTime(0);

    /// The timestamp `secs` seconds after `self`.
    #[inline]
    pub fn offset_secs(self, secs: i64) -> SimTime {
        SimTime(self.0 + secs)
    }

    /// Seconds elapsed from `earlier` to `self` (negative if `earlier` is
    /// actually later).
    #[inline]
    pub fn since(self, earlier: SimTime) -> i64 {
        self.0 - earlier.0
    }

    /// The later of two timestamps.
    #[inline]
    pub fn max(self, other: SimTime) -> SimTime {
        if other.0 > self.0 { other } else { self }
    }
}

impl std::ops::Add<i64> for SimTime {
    type Output = SimTime;
    #[inline]
    fn add(self, rhs: i64) -> SimTime {
        SimTime(self.0 + rhs)
    }
}

impl std::ops::Sub for SimTime {
    type Output = i64;
    #[inline]
    fn sub(self, rhs: SimTime) -> i64 {
        self.0 - rhs.0
    }
}

impl fmt::Display for SimTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "t={}", self.0)
    }
}

//! The `Tracker` trait — the capability the scheduler consumes.

use parcel_core::{SimTime, TrackerId, TrackingEvent};
use parcel_sched::Wake;
use parcel_spatial::LocationIndex;

use crate::TrackResult;

/// What a tracker wants after an advance.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Next {
    /// Re-insert into the wake heap at this timestamp.
    ///
    /// The scheduler accepts `WakeAt(now)` (zero-duration transition) and
    /// clamps anything *earlier* than `now` up to `now` — simulated time
    /// never rewinds for a single tracker.
    WakeAt(SimTime),

    /// Terminal state reached; remove from scheduling.  One-way.
    Retire,
}

/// The result of one advance: at most one outbound event plus scheduling
/// intent.
#[derive(Debug)]
pub struct Step {
    pub event: Option<TrackingEvent>,
    pub next:  Next,
}

impl Step {
    /// An event-bearing step that reschedules at `wake`.
    pub fn emit(event: TrackingEvent, wake: SimTime) -> Self {
        Self { event: Some(event), next: Next::WakeAt(wake) }
    }

    /// A terminal step carrying a final event.
    pub fn finish(event: TrackingEvent) -> Self {
        Self { event: Some(event), next: Next::Retire }
    }
}

/// A schedulable package entity.
///
/// The `Wake` supertrait exposes the initial next-wake-time so a worker can
/// heapify its partition in one pass; after that, wake times flow through
/// [`Next::WakeAt`].  `Send` because whole trackers move onto worker
/// threads at launch (each tracker is owned by exactly one worker for the
/// entire run).
pub trait Tracker: Wake + Send {
    /// Dense per-process identifier, assigned at load time.
    fn id(&self) -> TrackerId;

    /// Store-assigned package identifier, for logs and exception events.
    fn package_id(&self) -> &str;

    /// Advance the package to its next state.
    ///
    /// `now` is the wake time this tracker was popped at.  Implementations
    /// must return a wake time `>= now` (zero-duration transitions allowed)
    /// and must not retain references into `index`.
    fn advance(&mut self, index: &LocationIndex, now: SimTime) -> TrackResult<Step>;
}

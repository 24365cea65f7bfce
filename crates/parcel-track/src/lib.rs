//! `parcel-track` — tracker advance contract and package itinerary physics.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                      |
//! |-------------|---------------------------------------------------------------|
//! | [`tracker`] | `Tracker` trait, `Step`, `Next` — what the scheduler consumes |
//! | [`package`] | `PackageTracker` — the concrete itinerary implementation      |
//! | [`error`]   | `TrackError`, `TrackResult<T>`                                |
//!
//! # Design notes
//!
//! The scheduler (parcel-sim) never looks inside a tracker.  Its whole
//! contract is [`Tracker::advance`]: "given the read-only location index and
//! the time you were popped, mutate yourself, give me at most one event, and
//! tell me when to run you again — or that you're done."  Advance must be a
//! pure function of the tracker's own state, `now`, and the index (the
//! per-tracker RNG is part of that state), so the worker loop can reason
//! about ordering without inspecting internals.
//!
//! Advance errors are *per-entity*: the worker retires the offending
//! tracker and keeps going.  Nothing in this crate can take a worker down.

pub mod error;
pub mod package;
pub mod tracker;

#[cfg(test)]
mod tests;

pub use error::{TrackError, TrackResult};
pub use package::{PackageTracker, trackers_from_records};
pub use tracker::{Next, Step, Tracker};

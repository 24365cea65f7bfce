//! `parcel-core` — foundational types for the `parcel_sim` logistics simulator.
//!
//! This crate is a dependency of every other `parcel-*` crate.  It
//! intentionally has no `parcel-*` dependencies and minimal external ones
//! (only `rand`, `serde`, and `thiserror`).
//!
//! # What lives here
//!
//! | Module     | Contents                                              |
//! |------------|-------------------------------------------------------|
//! | [`ids`]    | `TrackerId`, `LocationId`                             |
//! | [`geo`]    | `GeoPoint`, haversine distance                        |
//! | [`time`]   | `SimTime` — simulated Unix-seconds timestamps         |
//! | [`rng`]    | `TrackerRng` — deterministic per-tracker RNG          |
//! | [`event`]  | `TrackingEvent`, `EventKind`                          |
//! | [`record`] | `PackageRecord` — one active-package row              |
//! | [`config`] | `SimConfig`, `PhysicsConfig`                          |
//! | [`error`]  | `CoreError`, `CoreResult`                             |

pub mod config;
pub mod error;
pub mod event;
pub mod geo;
pub mod ids;
pub mod record;
pub mod rng;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::{PhysicsConfig, SimConfig};
pub use error::{CoreError, CoreResult};
pub use event::{EventKind, TrackingEvent};
pub use geo::GeoPoint;
pub use ids::{LocationId, TrackerId};
pub use record::PackageRecord;
pub use rng::TrackerRng;
pub use time::SimTime;

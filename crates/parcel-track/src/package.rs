//! `PackageTracker` — concrete itinerary physics for one package.
//!
//! # Itinerary model
//!
//! At load time each package gets a fixed stop list derived from its record
//! and the location index:
//!
//! ```text
//! origin → nearest hub to origin → nearest hub to destination → destination
//! ```
//!
//! with degenerate hops collapsed (same hub serving both ends, origin that
//! *is* a hub, and so on).  The tracker then walks the list with a
//! teleport-at-arrival movement model: it logically sits at a stop until
//! its departure wake fires, then is "en route" until its arrival wake.
//!
//! # Event sequence
//!
//! For a four-stop itinerary the emitted feed reads like a carrier's scans:
//!
//! | Transition                  | Event            |
//! |-----------------------------|------------------|
//! | depart origin               | `picked_up`      |
//! | reach intermediate facility | `arrived_at`     |
//! | depart intermediate         | `departed`       |
//! | depart final facility       | `out_for_delivery`|
//! | reach destination           | `delivered` (terminal) |
//!
//! Travel time is haversine distance over a per-leg speed (linehaul between
//! hubs, van speed otherwise) with ±jitter; dwell at facilities is likewise
//! jittered.  All intervals are strictly positive, so per-tracker wake
//! times are strictly increasing.

use parcel_core::{
    EventKind, LocationId, PackageRecord, PhysicsConfig, SimConfig, SimTime, TrackerId,
    TrackerRng, TrackingEvent,
};
use parcel_sched::Wake;
use parcel_spatial::{LocationIndex, LocationKind, LocationRecord};

use crate::tracker::{Step, Tracker};
use crate::{TrackError, TrackResult};

// ── Phase ─────────────────────────────────────────────────────────────────────

/// Where the package is relative to its stop list.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Phase {
    /// Dwelling at `stops[i]`; next advance departs toward `stops[i + 1]`.
    AtStop(usize),
    /// Travelling; next advance arrives at `stops[to]`.
    EnRoute { to: usize },
}

// ── PackageTracker ────────────────────────────────────────────────────────────

/// One in-flight package with a fixed itinerary.
#[derive(Debug)]
pub struct PackageTracker {
    id:         TrackerId,
    package_id: String,
    stops:      Vec<LocationId>,
    phase:      Phase,
    next_wake:  SimTime,
    rng:        TrackerRng,
    physics:    PhysicsConfig,
}

/// Append `id` unless it equals the current tail (collapses degenerate hops).
fn push_stop(stops: &mut Vec<LocationId>, id: LocationId) {
    if stops.last() != Some(&id) {
        stops.push(id);
    }
}

impl PackageTracker {
    /// Build a tracker from one active-package record.
    ///
    /// `epoch` is the simulation start; the tracker's first wake is spread
    /// uniformly over `physics.initial_stagger_secs` after the later of the
    /// epoch and the record's own timestamp.
    ///
    /// Fails if the record references a location the index doesn't know —
    /// the caller treats that as fatal at load time (no partial population)
    /// but as per-entity during a run.
    pub fn from_record(
        config: &SimConfig,
        index:  &LocationIndex,
        epoch:  SimTime,
        id:     TrackerId,
        record: PackageRecord,
    ) -> TrackResult<Self> {
        let origin = index.require(record.origin).map_err(|source| {
            TrackError::UnknownLocation { package_id: record.package_id.clone(), source }
        })?;
        let dest = index.require(record.destination).map_err(|source| {
            TrackError::UnknownLocation { package_id: record.package_id.clone(), source }
        })?;

        // origin → hub near origin → hub near destination → destination,
        // collapsing consecutive duplicates.
        let mut stops = vec![origin.id];
        if let Some(hub) = index.nearest_of_kind(origin.pos, LocationKind::Hub) {
            push_stop(&mut stops, hub.id);
        }
        if let Some(hub) = index.nearest_of_kind(dest.pos, LocationKind::Hub) {
            push_stop(&mut stops, hub.id);
        }
        push_stop(&mut stops, dest.id);

        let mut rng = TrackerRng::new(config.seed, id);
        let start = epoch.max(record.recorded_at);
        let stagger = config.physics.initial_stagger_secs.max(0);
        let first_wake = start + rng.gen_range(0..=stagger);

        Ok(Self {
            id,
            package_id: record.package_id,
            stops,
            phase: Phase::AtStop(0),
            next_wake: first_wake,
            rng,
            physics: config.physics.clone(),
        })
    }

    /// Read-only view of the itinerary, in travel order.
    pub fn stops(&self) -> &[LocationId] {
        &self.stops
    }

    // ── Interval helpers ──────────────────────────────────────────────────

    fn travel_secs(&mut self, from: &LocationRecord, to: &LocationRecord) -> i64 {
        let linehaul = from.kind == LocationKind::Hub && to.kind == LocationKind::Hub;
        let speed = if linehaul {
            self.physics.linehaul_speed_mps
        } else {
            self.physics.pickup_speed_mps
        };
        let nominal = (from.pos.distance_m(to.pos) / speed).ceil() as i64;
        self.rng.jitter_secs(nominal.max(60), self.physics.jitter_frac)
    }

    fn dwell_secs(&mut self) -> i64 {
        self.rng
            .jitter_secs(self.physics.hub_dwell_secs.max(1), self.physics.jitter_frac)
    }

    fn event(&self, kind: EventKind, at: &LocationRecord, time: SimTime) -> TrackingEvent {
        TrackingEvent {
            package_id: self.package_id.clone(),
            time,
            kind,
            location: at.id,
            position: at.pos,
        }
    }

    fn require<'a>(
        &self,
        index: &'a LocationIndex,
        id: LocationId,
    ) -> TrackResult<&'a LocationRecord> {
        index.require(id).map_err(|source| TrackError::UnknownLocation {
            package_id: self.package_id.clone(),
            source,
        })
    }
}

impl Wake for PackageTracker {
    fn wake_at(&self) -> SimTime {
        self.next_wake
    }
}

impl Tracker for PackageTracker {
    fn id(&self) -> TrackerId {
        self.id
    }

    fn package_id(&self) -> &str {
        &self.package_id
    }

    fn advance(&mut self, index: &LocationIndex, now: SimTime) -> TrackResult<Step> {
        match self.phase {
            // ── Departure (or degenerate single-stop delivery) ────────────
            Phase::AtStop(i) => {
                let here = self.require(index, self.stops[i])?;

                if i + 1 >= self.stops.len() {
                    // Origin == destination: deliver in place.
                    return Ok(Step::finish(self.event(EventKind::Delivered, here, now)));
                }

                let here = here.clone();
                let next = self.require(index, self.stops[i + 1])?.clone();

                let kind = if i == 0 {
                    EventKind::PickedUp
                } else if i + 1 == self.stops.len() - 1 {
                    EventKind::OutForDelivery
                } else {
                    EventKind::Departed
                };

                let wake = now + self.travel_secs(&here, &next);
                self.phase = Phase::EnRoute { to: i + 1 };
                self.next_wake = wake;
                Ok(Step::emit(self.event(kind, &here, now), wake))
            }

            // ── Arrival ───────────────────────────────────────────────────
            Phase::EnRoute { to } => {
                let here = self.require(index, self.stops[to])?.clone();

                if to + 1 >= self.stops.len() {
                    return Ok(Step::finish(self.event(EventKind::Delivered, &here, now)));
                }

                let wake = now + self.dwell_secs();
                self.phase = Phase::AtStop(to);
                self.next_wake = wake;
                Ok(Step::emit(self.event(EventKind::ArrivedAt, &here, now), wake))
            }
        }
    }
}

// ── Batch construction ────────────────────────────────────────────────────────

/// Build the full tracker population from store records.
///
/// Tracker ids are assigned densely in record order.  Any bad record fails
/// the whole load — the orchestrator treats this as fatal-configuration
/// (no partial population is started).
pub fn trackers_from_records(
    config:  &SimConfig,
    index:   &LocationIndex,
    epoch:   SimTime,
    records: Vec<PackageRecord>,
) -> TrackResult<Vec<PackageTracker>> {
    records
        .into_iter()
        .enumerate()
        .map(|(i, record)| {
            PackageTracker::from_record(config, index, epoch, TrackerId(i as u32), record)
        })
        .collect()
}

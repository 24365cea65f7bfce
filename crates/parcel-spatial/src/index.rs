//! The read-only location index.
//!
//! # Data layout
//!
//! Records are stored in a flat `Vec` (insertion order) with two access
//! paths on top:
//!
//! - an `FxHashMap<LocationId, usize>` for O(1) identity lookups, and
//! - an R-tree (via `rstar`) over `(lat, lon)` for nearest-facility queries.
//!
//! Built once from the store's location table at bootstrap and never
//! mutated again; trackers consult it concurrently from every worker.

use rstar::{AABB, PointDistance, RTree, RTreeObject};
use rustc_hash::FxHashMap;

use parcel_core::{GeoPoint, LocationId};

use crate::records::{LocationKind, LocationRecord};
use crate::{SpatialError, SpatialResult};

// ── R-tree entry ──────────────────────────────────────────────────────────────

/// Entry stored in the R-tree: a 2-D `[lat, lon]` point with the position of
/// the record in the flat `Vec`.
#[derive(Clone)]
struct LocationEntry {
    point: [f32; 2], // [lat, lon]
    slot:  usize,
}

impl RTreeObject for LocationEntry {
    type Envelope = AABB<[f32; 2]>;
    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.point)
    }
}

impl PointDistance for LocationEntry {
    /// Squared Euclidean distance in lat/lon space.  Sufficient for
    /// nearest-facility queries at regional scale (error < 0.1 % at ≤ 60° lat).
    fn distance_2(&self, point: &[f32; 2]) -> f32 {
        let dlat = self.point[0] - point[0];
        let dlon = self.point[1] - point[1];
        dlat * dlat + dlon * dlon
    }
}

// ── LocationIndex ─────────────────────────────────────────────────────────────

/// Immutable snapshot of the logistics network's locations.
pub struct LocationIndex {
    records: Vec<LocationRecord>,
    by_id:   FxHashMap<LocationId, usize>,
    tree:    RTree<LocationEntry>,
}

impl LocationIndex {
    /// Build the index from store rows.  O(n log n) for the R-tree bulk load.
    ///
    /// Duplicate location ids are a data error and fatal at startup — a
    /// tracker routed through an ambiguous id would emit nonsense events.
    pub fn build(records: Vec<LocationRecord>) -> SpatialResult<Self> {
        let mut by_id = FxHashMap::default();
        by_id.reserve(records.len());

        for (slot, rec) in records.iter().enumerate() {
            if by_id.insert(rec.id, slot).is_some() {
                return Err(SpatialError::DuplicateLocation(rec.id));
            }
        }

        let entries: Vec<LocationEntry> = records
            .iter()
            .enumerate()
            .map(|(slot, rec)| LocationEntry {
                point: [rec.pos.lat, rec.pos.lon],
                slot,
            })
            .collect();

        Ok(Self {
            records,
            by_id,
            tree: RTree::bulk_load(entries),
        })
    }

    // ── Dimensions ────────────────────────────────────────────────────────

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Iterator over all records in load order.
    pub fn iter(&self) -> impl Iterator<Item = &LocationRecord> {
        self.records.iter()
    }

    // ── Identity lookups ──────────────────────────────────────────────────

    /// The record for `id`, if it exists.
    #[inline]
    pub fn get(&self, id: LocationId) -> Option<&LocationRecord> {
        self.by_id.get(&id).map(|&slot| &self.records[slot])
    }

    /// Like [`get`][Self::get] but with a typed error for route building.
    pub fn require(&self, id: LocationId) -> SpatialResult<&LocationRecord> {
        self.get(id).ok_or(SpatialError::LocationNotFound(id))
    }

    // ── Proximity lookups ─────────────────────────────────────────────────

    /// The location nearest to `pos`, of any kind.
    ///
    /// Returns `None` only if the index is empty.
    pub fn nearest(&self, pos: GeoPoint) -> Option<&LocationRecord> {
        self.tree
            .nearest_neighbor(&[pos.lat, pos.lon])
            .map(|e| &self.records[e.slot])
    }

    /// The nearest location of the given `kind`, scanning outward from `pos`.
    ///
    /// Returns `None` if no location of that kind exists anywhere.
    pub fn nearest_of_kind(&self, pos: GeoPoint, kind: LocationKind) -> Option<&LocationRecord> {
        self.tree
            .nearest_neighbor_iter(&[pos.lat, pos.lon])
            .map(|e| &self.records[e.slot])
            .find(|rec| rec.kind == kind)
    }
}

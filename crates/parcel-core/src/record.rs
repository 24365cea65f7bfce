//! Active-package records as loaded from the persistent store.

use crate::{LocationId, SimTime};

/// One row of the `active_packages` table: a package that still has tracking
/// events ahead of it.
///
/// Rows are partitioned between simulator processes by `simulator_id`; the
/// store only returns rows owned by the querying process.
#[derive(Clone, Debug, PartialEq, Eq)]
#[derive(serde::Serialize, serde::Deserialize)]
pub struct PackageRecord {
    /// Free-form package identifier (barcode-style).
    pub package_id: String,

    /// Where the package enters the network.
    pub origin: LocationId,

    /// Where the package must end up.
    pub destination: LocationId,

    /// When the record was written.  Trackers enter the simulation no
    /// earlier than this.
    pub recorded_at: SimTime,
}

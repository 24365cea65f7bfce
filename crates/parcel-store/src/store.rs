//! The `Store` trait — exactly the read surface the orchestrator consumes.

use parcel_core::{PackageRecord, SimTime};
use parcel_spatial::LocationRecord;

use crate::StoreResult;

/// Read-only view of the persistent store.
///
/// All four calls happen on the orchestrator thread during bootstrap,
/// before any worker starts; implementations don't need to be `Sync`.
/// Connection teardown is `Drop`.
pub trait Store {
    /// Succeeds once every table the simulator reads exists.
    ///
    /// Polled with retry during bootstrap — "not ready yet" is the normal
    /// first answer when the seeding service hasn't run.
    fn check_tables(&self) -> StoreResult<()>;

    /// The store's current wall-clock time, used as the simulation epoch
    /// when the configuration doesn't pin one.
    fn current_time(&self) -> StoreResult<SimTime>;

    /// Every location in the logistics network.
    fn locations(&self) -> StoreResult<Vec<LocationRecord>>;

    /// The active packages owned by `simulator_id`, in stable order.
    fn active_packages(&self, simulator_id: &str) -> StoreResult<Vec<PackageRecord>>;
}

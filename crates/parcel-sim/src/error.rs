//! Error types for parcel-sim.
//!
//! Everything here is fatal-at-bootstrap: once workers are running, the
//! loop isolates per-tracker failures and counts producer failures instead
//! of surfacing them as `SimError`.

use thiserror::Error;

use parcel_core::CoreError;
use parcel_spatial::SpatialError;
use parcel_store::StoreError;
use parcel_track::TrackError;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("configuration error: {0}")]
    Config(#[from] CoreError),

    #[error("store error: {0}")]
    Store(#[from] StoreError),

    #[error("location index error: {0}")]
    Spatial(#[from] SpatialError),

    #[error("tracker load error: {0}")]
    Track(#[from] TrackError),

    /// Shutdown was signalled while bootstrap was still retrying.  Not a
    /// failure of anything — the operator asked the process to stop before
    /// its dependencies came up.
    #[error("shutdown signalled during bootstrap ({while_doing})")]
    ShutdownDuringBootstrap { while_doing: &'static str },
}

pub type SimResult<T> = Result<T, SimError>;

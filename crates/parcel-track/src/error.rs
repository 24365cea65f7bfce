//! Tracker error type.

use thiserror::Error;

use parcel_spatial::SpatialError;

/// Errors produced while building or advancing a tracker.
#[derive(Debug, Error)]
pub enum TrackError {
    #[error("package {package_id}: {source}")]
    UnknownLocation {
        package_id: String,
        #[source]
        source: SpatialError,
    },
}

pub type TrackResult<T> = Result<T, TrackError>;

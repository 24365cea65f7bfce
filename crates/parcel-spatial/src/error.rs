//! Spatial-subsystem error type.

use thiserror::Error;

use parcel_core::LocationId;

/// Errors produced by `parcel-spatial`.
#[derive(Debug, Error)]
pub enum SpatialError {
    #[error("location {0} not found in index")]
    LocationNotFound(LocationId),

    #[error("duplicate location id {0} in store data")]
    DuplicateLocation(LocationId),
}

pub type SpatialResult<T> = Result<T, SpatialError>;

//! `parcel-spatial` — location records and the read-only location index.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                |
//! |-------------|---------------------------------------------------------|
//! | [`records`] | `LocationRecord`, `LocationKind`                        |
//! | [`index`]   | `LocationIndex` (R-tree + id map), built once, read-only|
//! | [`error`]   | `SpatialError`, `SpatialResult<T>`                      |
//!
//! The index is built exactly once at bootstrap from the store's location
//! table and then shared immutably (`Arc`) by every worker — no writers
//! exist after construction, so concurrent reads need no locking.

pub mod error;
pub mod index;
pub mod records;


pub use error::{SpatialError, SpatialResult};
pub use index::LocationIndex;
pub use records::{LocationKind, LocationRecord};

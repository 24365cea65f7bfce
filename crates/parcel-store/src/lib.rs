//! `parcel-store` — the simulator's read side of the persistent store.
//!
//! # Crate layout
//!
//! | Module     | Contents                                            |
//! |------------|-----------------------------------------------------|
//! | [`store`]  | `Store` trait — the interface the orchestrator uses |
//! | [`sqlite`] | `SqliteStore` — rusqlite-backed implementation      |
//! | [`error`]  | `StoreError`, `StoreResult<T>`                      |
//!
//! The simulator only ever *reads* two tables: `locations` (the logistics
//! network) and `active_packages` (the population to simulate, partitioned
//! by `simulator_id`).  Another service owns writes; the one concession to
//! that boundary here is [`sqlite::SqliteStore::init_schema`] and the
//! insert helpers, which exist for tests and demo seeding.

pub mod error;
pub mod sqlite;
pub mod store;


pub use error::{StoreError, StoreResult};
pub use sqlite::SqliteStore;
pub use store::Store;

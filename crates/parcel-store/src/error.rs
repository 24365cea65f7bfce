//! Error types for parcel-store.

use thiserror::Error;

/// Errors that can occur talking to the persistent store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// Expected tables are not present yet.  The orchestrator polls past
    /// this during bootstrap; the seeding service may simply not have run.
    #[error("schema not ready: table `{missing}` does not exist")]
    SchemaNotReady { missing: &'static str },

    /// A row's `kind` column holds a label this build doesn't know.
    #[error("location {id}: unknown kind label `{label}`")]
    UnknownKind { id: i64, label: String },
}

/// Alias for `Result<T, StoreError>`.
pub type StoreResult<T> = Result<T, StoreError>;

//! Error types for parcel-output.

use thiserror::Error;

/// Errors that can occur while producing tracking events.
#[derive(Debug, Error)]
pub enum ProducerError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV write error: {0}")]
    Csv(#[from] ::csv::Error),

    #[error("JSON encode error: {0}")]
    Json(#[from] serde_json::Error),

    /// The consuming side went away (channel receiver dropped).
    #[error("event channel closed")]
    Closed,
}

/// Alias for `Result<T, ProducerError>`.
pub type ProducerResult<T> = Result<T, ProducerError>;

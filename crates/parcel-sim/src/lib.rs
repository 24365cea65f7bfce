//! `parcel-sim` — the simulation engine: worker loops and bootstrap.
//!
//! # Crate layout
//!
//! | Module           | Contents                                             |
//! |------------------|------------------------------------------------------|
//! | [`shutdown`]     | `ShutdownFlag` — broadcast-once cancellation         |
//! | [`partition`]    | contiguous balanced splitting of the population      |
//! | [`retry`]        | `RetryPolicy` — indefinite fixed-delay bootstrap     |
//! | [`worker`]       | `WorkerState`, `run_worker`, `WorkerReport`          |
//! | [`orchestrator`] | `run_simulation` — bootstrap, launch, join, summary  |
//! | [`error`]        | `SimError`, `SimResult<T>`                           |
//!
//! # Threading model
//!
//! One OS thread per worker, launched under `std::thread::scope`.  Each
//! worker owns its partition's wake heap and its producer outright and runs
//! single-threaded with no locks; the only shared state is the read-only
//! location index (`Arc`) and the shutdown flag (one atomic).  The scope
//! join doubles as the completion barrier: shared resources outlive every
//! worker by construction.

pub mod error;
pub mod orchestrator;
pub mod partition;
pub mod retry;
pub mod shutdown;
pub mod worker;


pub use error::{SimError, SimResult};
pub use orchestrator::{RunSummary, run_simulation};
pub use partition::partition;
pub use retry::RetryPolicy;
pub use shutdown::ShutdownFlag;
pub use worker::{ExitReason, WorkerReport, WorkerState, run_worker};

//! Bootstrap and launch.
//!
//! `run_simulation` is the whole process lifecycle minus the surface the
//! binary owns (config files, signal handler, producer selection):
//!
//! 1. connect to the store — indefinite fixed-delay retry;
//! 2. poll the schema check the same way;
//! 3. resolve the epoch, load locations and active packages, build the
//!    index and the tracker population (all fatal on failure — a process
//!    that can't load its inputs must not half-start);
//! 4. partition trackers into contiguous shares, one per worker;
//! 5. heapify each share and open that worker's producer;
//! 6. run every worker under one `std::thread::scope`; the join is the
//!    completion barrier.
//!
//! The function is generic over the store, tracker, and producer so tests
//! can run the full lifecycle in-process against fakes.

use std::sync::Arc;
use std::time::Duration;

use tracing::info;

use parcel_core::{PackageRecord, SimConfig, SimTime};
use parcel_output::{Producer, ProducerResult};
use parcel_sched::WakeHeap;
use parcel_spatial::LocationIndex;
use parcel_store::{Store, StoreResult};
use parcel_track::{TrackResult, Tracker};

use crate::partition::partition;
use crate::retry::RetryPolicy;
use crate::shutdown::ShutdownFlag;
use crate::worker::{WorkerReport, WorkerState, run_worker};
use crate::SimResult;

// ── Summary ───────────────────────────────────────────────────────────────────

/// What the run did, assembled after the completion barrier.
#[derive(Debug)]
pub struct RunSummary {
    pub epoch:     SimTime,
    pub locations: usize,
    pub trackers:  usize,
    pub workers:   Vec<WorkerReport>,
}

impl RunSummary {
    pub fn events_sent(&self) -> u64 {
        self.workers.iter().map(|w| w.events_sent).sum()
    }

    pub fn retired(&self) -> u64 {
        self.workers.iter().map(|w| w.retired).sum()
    }

    /// True when any worker stopped for the shutdown flag rather than an
    /// empty heap.
    pub fn cancelled(&self) -> bool {
        self.workers
            .iter()
            .any(|w| w.reason == crate::worker::ExitReason::Cancelled)
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

/// Bootstrap the simulation and run it to completion or cancellation.
///
/// `connect` is called under retry until it yields a store; `open_producer`
/// likewise, once per worker.  `build_trackers` failures are fatal: a
/// malformed population means the inputs are wrong, not the infrastructure.
pub fn run_simulation<S, T, P, FS, FT, FP>(
    config:         &SimConfig,
    shutdown:       ShutdownFlag,
    mut connect:    FS,
    build_trackers: FT,
    mut open_producer: FP,
) -> SimResult<RunSummary>
where
    S: Store,
    T: Tracker,
    P: Producer,
    FS: FnMut() -> StoreResult<S>,
    FT: FnOnce(&SimConfig, &LocationIndex, SimTime, Vec<PackageRecord>) -> TrackResult<Vec<T>>,
    FP: FnMut(usize) -> ProducerResult<P>,
{
    config.validate()?;
    let delay = Duration::from_secs(config.retry_delay_secs);

    // ── Store bootstrap ───────────────────────────────────────────────────
    let store = RetryPolicy::new(delay, "store connection").run(&shutdown, || connect())?;
    RetryPolicy::new(delay, "schema check").run(&shutdown, || store.check_tables())?;

    // ── Inputs ────────────────────────────────────────────────────────────
    let epoch = match config.start_time() {
        Some(t) => t,
        None => store.current_time()?,
    };

    let index = Arc::new(LocationIndex::build(store.locations()?)?);
    let records = store.active_packages(&config.simulator_id)?;
    let trackers = build_trackers(config, &index, epoch, records)?;

    let locations = index.len();
    let population = trackers.len();
    let workers = worker_count(config);
    info!(
        simulator_id = %config.simulator_id,
        %epoch,
        locations,
        trackers = population,
        workers,
        "bootstrap complete",
    );

    // ── Partition and launch ──────────────────────────────────────────────
    let mut states = Vec::with_capacity(workers);
    for (worker_id, share) in partition(trackers, workers).into_iter().enumerate() {
        let producer = RetryPolicy::new(delay, "producer open")
            .run(&shutdown, || open_producer(worker_id))?;
        states.push(WorkerState {
            worker_id,
            heap: WakeHeap::from_batch(share),
            producer,
            index: Arc::clone(&index),
            shutdown: shutdown.clone(),
        });
    }

    let reports: Vec<WorkerReport> = std::thread::scope(|scope| {
        let handles: Vec<_> = states
            .into_iter()
            .map(|state| scope.spawn(move || run_worker(state)))
            .collect();
        handles
            .into_iter()
            .map(|h| match h.join() {
                Ok(report) => report,
                Err(panic) => std::panic::resume_unwind(panic),
            })
            .collect()
    });

    let summary = RunSummary { epoch, locations, trackers: population, workers: reports };
    info!(
        events_sent = summary.events_sent(),
        retired = summary.retired(),
        cancelled = summary.cancelled(),
        "simulation finished",
    );
    Ok(summary)
}

/// Configured worker count, or every available core.
fn worker_count(config: &SimConfig) -> usize {
    match config.num_workers {
        Some(n) => n,
        None => std::thread::available_parallelism().map_or(1, |n| n.get()),
    }
}

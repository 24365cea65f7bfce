//! The per-worker simulation loop.
//!
//! A worker owns one contiguous share of the tracker population for the
//! whole run.  Its loop is a straight event-queue drain:
//!
//! 1. poll the shutdown flag (non-blocking, once per iteration);
//! 2. pop the earliest tracker from the wake heap;
//! 3. advance it to the popped timestamp;
//! 4. send the resulting event, if any;
//! 5. re-insert at the tracker's requested wake, or retire it.
//!
//! The loop exits when the heap empties (partition fully simulated) or the
//! flag is set (remaining trackers are abandoned — shutdown is
//! best-effort, and the population is rebuilt from the store on the next
//! start anyway).

use std::sync::Arc;

use tracing::{debug, info, warn};

use parcel_core::{EventKind, GeoPoint, LocationId, SimTime, TrackingEvent};
use parcel_output::Producer;
use parcel_sched::WakeHeap;
use parcel_spatial::LocationIndex;
use parcel_track::{Next, Tracker};

use crate::shutdown::ShutdownFlag;

// ── Reports ───────────────────────────────────────────────────────────────────

/// Why a worker's loop ended.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ExitReason {
    /// The wake heap drained: every owned tracker reached a terminal state.
    Completed,
    /// The shutdown flag was set; queued trackers were abandoned.
    Cancelled,
}

/// Final accounting for one worker, returned through the scope join.
#[derive(Clone, Debug)]
pub struct WorkerReport {
    pub worker_id:      usize,
    pub reason:         ExitReason,
    /// Successful `advance` calls.
    pub advanced:       u64,
    /// Trackers that reached a terminal state (including errored ones).
    pub retired:        u64,
    pub events_sent:    u64,
    /// Per-tracker `advance` failures, each of which retired its tracker.
    pub advance_errors: u64,
    /// Producer failures.  Events are best-effort; these are counted, not
    /// propagated.
    pub send_errors:    u64,
    /// Trackers still queued when a cancelled worker stopped.
    pub abandoned:      usize,
}

// ── WorkerState ───────────────────────────────────────────────────────────────

/// Everything one worker thread owns.
pub struct WorkerState<T, P> {
    pub worker_id: usize,
    pub heap:      WakeHeap<T>,
    pub producer:  P,
    pub index:     Arc<LocationIndex>,
    pub shutdown:  ShutdownFlag,
}

// ── Loop ──────────────────────────────────────────────────────────────────────

/// Drive one worker to completion or cancellation.
pub fn run_worker<T: Tracker, P: Producer>(mut state: WorkerState<T, P>) -> WorkerReport {
    let worker = state.worker_id;
    let mut report = WorkerReport {
        worker_id:      worker,
        reason:         ExitReason::Completed,
        advanced:       0,
        retired:        0,
        events_sent:    0,
        advance_errors: 0,
        send_errors:    0,
        abandoned:      0,
    };

    loop {
        if state.shutdown.is_signaled() {
            report.reason = ExitReason::Cancelled;
            report.abandoned = state.heap.len();
            break;
        }

        let Some((now, mut tracker)) = state.heap.pop_min() else {
            break;
        };

        match tracker.advance(&state.index, now) {
            Ok(step) => {
                report.advanced += 1;
                if let Some(event) = step.event {
                    send(&mut state.producer, &event, worker, &mut report);
                }
                match step.next {
                    Next::WakeAt(wake) => {
                        let wake = clamp_wake(wake, now, worker);
                        state.heap.push(wake, tracker);
                    }
                    Next::Retire => report.retired += 1,
                }
            }
            Err(err) => {
                // Per-tracker failure: retire this one, keep the rest going.
                report.advance_errors += 1;
                report.retired += 1;
                warn!(worker, package_id = tracker.package_id(), %err, "tracker advance failed, retiring");
                let exception = TrackingEvent {
                    package_id: tracker.package_id().to_string(),
                    time:       now,
                    kind:       EventKind::Exception,
                    location:   LocationId::INVALID,
                    position:   GeoPoint::new(0.0, 0.0),
                };
                send(&mut state.producer, &exception, worker, &mut report);
            }
        }
    }

    if let Err(err) = state.producer.close() {
        warn!(worker, %err, "producer close failed");
    }

    info!(
        worker,
        reason = ?report.reason,
        advanced = report.advanced,
        retired = report.retired,
        events_sent = report.events_sent,
        advance_errors = report.advance_errors,
        send_errors = report.send_errors,
        abandoned = report.abandoned,
        "worker finished",
    );
    report
}

/// Blocking send; failures are counted, never fatal.  An in-flight send is
/// allowed to finish even when shutdown has been signalled — the flag is
/// only consulted at iteration boundaries.
fn send<P: Producer>(
    producer: &mut P,
    event:    &TrackingEvent,
    worker:   usize,
    report:   &mut WorkerReport,
) {
    match producer.send(event) {
        Ok(()) => report.events_sent += 1,
        Err(err) => {
            report.send_errors += 1;
            warn!(worker, package_id = %event.package_id, %err, "event send failed");
        }
    }
}

/// Requested wakes in the past are clamped to `now`: per-tracker time never
/// rewinds.  Equal-to-now is a legitimate zero-duration transition.
fn clamp_wake(wake: SimTime, now: SimTime, worker: usize) -> SimTime {
    if wake < now {
        debug!(worker, %wake, %now, "wake before current time, clamping");
        now
    } else {
        wake
    }
}

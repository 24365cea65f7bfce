//! The `Producer` trait implemented by all event backends.

use parcel_core::TrackingEvent;

use crate::ProducerResult;

/// Outbound side of the tracking-event feed.
///
/// One instance per worker thread, owned for the whole run.  `send` may
/// block when the backend applies backpressure; the worker loop finishes
/// an in-flight send even when shutdown has been signalled.
pub trait Producer: Send {
    /// Publish one event.
    fn send(&mut self, event: &TrackingEvent) -> ProducerResult<()>;

    /// Flush and release the backend.
    ///
    /// Idempotent — safe to call more than once.
    fn close(&mut self) -> ProducerResult<()>;
}

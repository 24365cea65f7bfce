//! Bounded in-process channel backend.
//!
//! Wraps a `std::sync::mpsc::SyncSender`: the bounded buffer gives real
//! backpressure, which is what the worker loop's blocking-send semantics
//! are written against.  Tests and the in-process event collector use this.

use std::sync::mpsc::{Receiver, SyncSender, sync_channel};

use parcel_core::TrackingEvent;

use crate::producer::Producer;
use crate::{ProducerError, ProducerResult};

/// Sends tracking events into a bounded channel.
pub struct ChannelProducer {
    tx: SyncSender<TrackingEvent>,
}

impl ChannelProducer {
    /// A producer/receiver pair with the given channel capacity.
    pub fn bounded(capacity: usize) -> (Self, Receiver<TrackingEvent>) {
        let (tx, rx) = sync_channel(capacity);
        (Self { tx }, rx)
    }

    /// Wrap an existing sender (several producers can feed one receiver).
    pub fn from_sender(tx: SyncSender<TrackingEvent>) -> Self {
        Self { tx }
    }
}

impl Producer for ChannelProducer {
    fn send(&mut self, event: &TrackingEvent) -> ProducerResult<()> {
        // Blocks while the channel is full; errors only once the receiver
        // is gone, at which point every later send fails the same way.
        self.tx.send(event.clone()).map_err(|_| ProducerError::Closed)
    }

    fn close(&mut self) -> ProducerResult<()> {
        Ok(())
    }
}

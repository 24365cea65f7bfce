//! Outbound tracking event payloads.
//!
//! One `TrackingEvent` describes one state transition of one package —
//! pickup, hub arrival/departure, delivery — exactly as a real carrier's
//! scan feed would.  Events are handed to a `Producer` (parcel-output) and
//! serialized there; the serde derives define the wire shape.

use crate::{GeoPoint, LocationId, SimTime};

/// The kind of state transition an event describes.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[derive(serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    /// Package collected at its origin location.
    PickedUp,
    /// Package left an intermediate facility.
    Departed,
    /// Package arrived at an intermediate facility.
    ArrivedAt,
    /// Package left the final facility, on the last leg.
    OutForDelivery,
    /// Package reached its destination.  Terminal.
    Delivered,
    /// Simulation could not advance the package (malformed route data).
    /// Terminal; emitted so downstream consumers see the package leave the
    /// active population rather than silently stall.
    Exception,
}

impl EventKind {
    /// `true` for kinds after which no further events are emitted.
    #[inline]
    pub fn is_terminal(self) -> bool {
        matches!(self, EventKind::Delivered | EventKind::Exception)
    }

    /// Stable label used in CSV output and log lines.
    pub fn as_str(self) -> &'static str {
        match self {
            EventKind::PickedUp       => "picked_up",
            EventKind::Departed       => "departed",
            EventKind::ArrivedAt      => "arrived_at",
            EventKind::OutForDelivery => "out_for_delivery",
            EventKind::Delivered      => "delivered",
            EventKind::Exception      => "exception",
        }
    }
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One synthetic tracking event, ready for the downstream stream.
#[derive(Clone, Debug, PartialEq)]
#[derive(serde::Serialize, serde::Deserialize)]
pub struct TrackingEvent {
    /// Store-assigned package identifier (barcode-style string).
    pub package_id: String,

    /// Simulated timestamp at which the transition occurred.
    pub time: SimTime,

    /// What happened.
    pub kind: EventKind,

    /// Location at which it happened.  `LocationId::INVALID` for
    /// [`EventKind::Exception`] events whose location could not be resolved.
    pub location: LocationId,

    /// Coordinates of `location`, denormalized so consumers don't need the
    /// location table.
    pub position: GeoPoint,
}

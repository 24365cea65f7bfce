//! Location records as loaded from the persistent store.

use parcel_core::{GeoPoint, LocationId};

/// The role a location plays in the logistics network.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[derive(serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LocationKind {
    /// Origin facility where packages enter the network.
    Warehouse,
    /// Intermediate sorting facility on linehaul routes.
    Hub,
    /// Final delivery address or pickup point.
    DeliveryPoint,
}

impl LocationKind {
    /// Stable label used in the store's `kind` column.
    pub fn as_str(self) -> &'static str {
        match self {
            LocationKind::Warehouse     => "warehouse",
            LocationKind::Hub           => "hub",
            LocationKind::DeliveryPoint => "delivery_point",
        }
    }

    /// Inverse of [`as_str`][Self::as_str].
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "warehouse"      => Some(LocationKind::Warehouse),
            "hub"            => Some(LocationKind::Hub),
            "delivery_point" => Some(LocationKind::DeliveryPoint),
            _                => None,
        }
    }
}

impl std::fmt::Display for LocationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One row of the store's `locations` table.
#[derive(Clone, Debug, PartialEq)]
#[derive(serde::Serialize, serde::Deserialize)]
pub struct LocationRecord {
    pub id:   LocationId,
    pub name: String,
    pub kind: LocationKind,
    pub pos:  GeoPoint,
}

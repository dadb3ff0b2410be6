//! Serializable projection of [`ParkingLot`] for the `/status` endpoint.
//!
//! The registry hands out a list; the wire format is an object keyed by
//! license plate, with each value repeating the plate alongside the type and
//! entry time.

use std::collections::BTreeMap;

use parking_rs::{ParkedVehicle, ParkingLot};
use serde::Serialize;

/// Plate-keyed view of every parked vehicle.
#[derive(Debug, Serialize)]
#[serde(transparent)]
pub struct LotSnapshot {
    pub vehicles: BTreeMap<String, ParkedVehicle>,
}

impl LotSnapshot {
    /// Build a snapshot from one atomic copy of the registry.
    pub fn from_lot(lot: &ParkingLot) -> Self {
        let vehicles = lot
            .snapshot()
            .into_iter()
            .map(|v| (v.license_plate.clone(), v))
            .collect();
        Self { vehicles }
    }
}

//! Vehicle classes, hourly rates, and the occupancy record.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ParkingError;

const MILLIS_PER_HOUR: f64 = 3_600_000.0;

/// Billing category of a vehicle.
///
/// Serialized as the lowercase name (`"bike"`, `"car"`, `"truck"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VehicleType {
    Bike,
    Car,
    Truck,
}

impl VehicleType {
    /// Every known class, cheapest first.
    pub const ALL: [VehicleType; 3] = [VehicleType::Bike, VehicleType::Car, VehicleType::Truck];

    /// Price per hour parked, in currency units.
    pub fn hourly_rate(self) -> f64 {
        match self {
            VehicleType::Bike => 1.0,
            VehicleType::Car => 2.0,
            VehicleType::Truck => 3.0,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            VehicleType::Bike => "bike",
            VehicleType::Car => "car",
            VehicleType::Truck => "truck",
        }
    }
}

impl fmt::Display for VehicleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VehicleType {
    type Err = ParkingError;

    /// Exact, case-sensitive match. Unknown names are rejected rather than
    /// billed at some fallback rate.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "bike" => Ok(VehicleType::Bike),
            "car" => Ok(VehicleType::Car),
            "truck" => Ok(VehicleType::Truck),
            other => Err(ParkingError::InvalidVehicleType(other.to_string())),
        }
    }
}

/// One vehicle currently in the lot.
///
/// Serializes as `{"licensePlate", "type", "entryTime"}` with `entryTime`
/// in whole seconds since the Unix epoch.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParkedVehicle {
    pub license_plate: String,
    #[serde(rename = "type")]
    pub vehicle_type: VehicleType,
    #[serde(with = "chrono::serde::ts_seconds")]
    pub entry_time: DateTime<Utc>,
}

impl ParkedVehicle {
    pub fn new(
        license_plate: impl Into<String>,
        vehicle_type: VehicleType,
        entry_time: DateTime<Utc>,
    ) -> Self {
        Self {
            license_plate: license_plate.into(),
            vehicle_type,
            entry_time,
        }
    }

    /// Fractional hours between entry and `now`, at millisecond resolution.
    ///
    /// Clamped to zero if `now` precedes the entry time.
    pub fn hours_parked(&self, now: DateTime<Utc>) -> f64 {
        let elapsed = now.signed_duration_since(self.entry_time);
        elapsed.num_milliseconds().max(0) as f64 / MILLIS_PER_HOUR
    }

    /// What this vehicle owes if it leaves at `now`. No rounding, no minimum.
    pub fn cost_at(&self, now: DateTime<Utc>) -> f64 {
        self.hours_parked(now) * self.vehicle_type.hourly_rate()
    }
}

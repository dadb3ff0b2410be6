//! Error type shared by every registry operation.

use thiserror::Error;

/// Why a registry operation was rejected.
///
/// None of these are faults: each one leaves the registry exactly as it was
/// before the call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParkingError {
    /// A required field was empty or blank. Carries the field name.
    #[error("{0} must not be empty")]
    InvalidInput(&'static str),
    /// The vehicle type string does not name a known class.
    #[error("unknown vehicle type: {0}")]
    InvalidVehicleType(String),
    /// A vehicle with this plate is already in the lot.
    #[error("vehicle {0} is already parked")]
    AlreadyParked(String),
    /// No vehicle with this plate is in the lot.
    #[error("vehicle {0} not found")]
    NotFound(String),
}

//! In-memory occupancy registry for a parking lot.
//!
//! `parking-rs` keeps track of which vehicles are currently parked and bills
//! them by the hour when they leave. It has no I/O of its own; pair it with
//! `parking-web` (or any other front end) to expose it.
//!
//! # Quick start
//!
//! ```
//! use parking_rs::{ParkingError, ParkingLot};
//!
//! let lot = ParkingLot::new();
//! lot.park("ABC123", "car").unwrap();
//!
//! assert_eq!(
//!     lot.park("ABC123", "bike"),
//!     Err(ParkingError::AlreadyParked("ABC123".into())),
//! );
//!
//! let departure = lot.remove("ABC123").unwrap();
//! assert!(departure.cost >= 0.0);
//! assert!(lot.is_empty());
//! ```
//!
//! # Billing
//!
//! | Type  | Rate per hour |
//! |-------|---------------|
//! | bike  | 1.0           |
//! | car   | 2.0           |
//! | truck | 3.0           |
//!
//! Cost is `hours parked × rate`, with fractional hours and no rounding.
//! Time comes from a [`Clock`]; swap in a [`ManualClock`] to make billing
//! deterministic.

pub mod clock;
mod error;
pub mod lot;
pub mod vehicle;

pub use clock::{Clock, ManualClock, SystemClock};
pub use error::ParkingError;
pub use lot::{Departure, ParkingLot};
pub use vehicle::{ParkedVehicle, VehicleType};

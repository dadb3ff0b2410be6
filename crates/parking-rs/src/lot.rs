//! The occupancy registry.
//!
//! [`ParkingLot`] is the single authoritative table of vehicles currently in
//! the lot. Every operation takes the same mutex for its whole duration, so
//! admission, departure, and snapshots are each atomic with respect to one
//! another:
//!
//! - two departures of the same plate can never both succeed,
//! - a departing vehicle is billed and removed in one step,
//! - a snapshot never shows a half-applied change.

use std::collections::BTreeMap;
use std::collections::btree_map::Entry;
use std::sync::{Arc, Mutex, MutexGuard};

use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use crate::clock::{Clock, SystemClock};
use crate::error::ParkingError;
use crate::vehicle::{ParkedVehicle, VehicleType};

/// Outcome of a successful [`ParkingLot::remove`].
#[derive(Debug, Clone, PartialEq)]
pub struct Departure {
    /// The record as it was while parked.
    pub vehicle: ParkedVehicle,
    /// The instant the vehicle was billed.
    pub exit_time: DateTime<Utc>,
    /// Amount owed for the stay.
    pub cost: f64,
}

/// In-memory registry of parked vehicles, keyed by license plate.
///
/// Share it between request handlers as `Arc<ParkingLot>`.
pub struct ParkingLot {
    vehicles: Mutex<BTreeMap<String, ParkedVehicle>>,
    clock: Arc<dyn Clock>,
}

impl Default for ParkingLot {
    fn default() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }
}

impl ParkingLot {
    /// An empty lot billed against wall-clock time.
    pub fn new() -> Self {
        Self::default()
    }

    /// An empty lot that reads time from `clock`.
    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            vehicles: Mutex::new(BTreeMap::new()),
            clock,
        }
    }

    fn vehicles(&self) -> MutexGuard<'_, BTreeMap<String, ParkedVehicle>> {
        // Every operation commits its change in one step, so a panic in
        // another holder cannot leave the map half-updated.
        self.vehicles.lock().unwrap_or_else(|e| {
            warn!("parking lot mutex was poisoned; recovering");
            e.into_inner()
        })
    }

    /// Admit a vehicle, parsing its type from a string.
    ///
    /// Fails with [`ParkingError::InvalidInput`] for a blank plate or type,
    /// [`ParkingError::InvalidVehicleType`] for an unknown type, and
    /// [`ParkingError::AlreadyParked`] if the plate is already in the lot.
    pub fn park(
        &self,
        license_plate: &str,
        vehicle_type: &str,
    ) -> Result<ParkedVehicle, ParkingError> {
        if vehicle_type.trim().is_empty() {
            return Err(ParkingError::InvalidInput("type"));
        }
        let vehicle_type = vehicle_type.parse::<VehicleType>()?;
        self.park_vehicle(license_plate, vehicle_type)
    }

    /// Admit a vehicle of a known type.
    ///
    /// The entry time is read from the lot's clock. An existing record for
    /// the same plate is never overwritten.
    pub fn park_vehicle(
        &self,
        license_plate: &str,
        vehicle_type: VehicleType,
    ) -> Result<ParkedVehicle, ParkingError> {
        if license_plate.trim().is_empty() {
            return Err(ParkingError::InvalidInput("licensePlate"));
        }

        let mut vehicles = self.vehicles();
        match vehicles.entry(license_plate.to_string()) {
            Entry::Occupied(_) => {
                debug!(plate = license_plate, "rejected: already parked");
                Err(ParkingError::AlreadyParked(license_plate.to_string()))
            }
            Entry::Vacant(slot) => {
                let vehicle = ParkedVehicle::new(license_plate, vehicle_type, self.clock.now());
                slot.insert(vehicle.clone());
                info!(plate = license_plate, vehicle_type = %vehicle_type, "vehicle parked");
                Ok(vehicle)
            }
        }
    }

    /// Bill and remove a vehicle.
    ///
    /// The exit time is sampled once, under the lock, and the record is gone
    /// by the time this returns. The record is not archived.
    pub fn remove(&self, license_plate: &str) -> Result<Departure, ParkingError> {
        if license_plate.trim().is_empty() {
            return Err(ParkingError::InvalidInput("licensePlate"));
        }

        let mut vehicles = self.vehicles();
        let Some(vehicle) = vehicles.remove(license_plate) else {
            debug!(plate = license_plate, "rejected: not found");
            return Err(ParkingError::NotFound(license_plate.to_string()));
        };
        let exit_time = self.clock.now();
        let cost = vehicle.cost_at(exit_time);
        drop(vehicles);

        info!(
            plate = license_plate,
            vehicle_type = %vehicle.vehicle_type,
            cost,
            "vehicle removed"
        );
        Ok(Departure {
            vehicle,
            exit_time,
            cost,
        })
    }

    /// Point-in-time copy of every parked vehicle, in plate order.
    pub fn snapshot(&self) -> Vec<ParkedVehicle> {
        self.vehicles().values().cloned().collect()
    }

    /// Copy of a single record, if the plate is parked.
    pub fn get(&self, license_plate: &str) -> Option<ParkedVehicle> {
        self.vehicles().get(license_plate).cloned()
    }

    /// Number of vehicles in the lot.
    pub fn len(&self) -> usize {
        self.vehicles().len()
    }

    /// Whether the lot is empty.
    pub fn is_empty(&self) -> bool {
        self.vehicles().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use std::thread;

    use chrono::TimeDelta;

    use super::*;
    use crate::clock::ManualClock;

    fn lot_at(start_secs: i64) -> (ParkingLot, Arc<ManualClock>) {
        let clock = Arc::new(ManualClock::new(
            DateTime::from_timestamp(start_secs, 0).unwrap(),
        ));
        (ParkingLot::with_clock(clock.clone()), clock)
    }

    #[test]
    fn park_then_list_contains_vehicle_once() {
        let (lot, _clock) = lot_at(1_700_000_000);
        let parked = lot.park("ABC123", "car").unwrap();
        assert_eq!(parked.vehicle_type, VehicleType::Car);
        assert_eq!(parked.entry_time.timestamp(), 1_700_000_000);

        let snap = lot.snapshot();
        assert_eq!(snap.len(), 1);
        assert_eq!(snap[0].license_plate, "ABC123");
        assert_eq!(snap[0].vehicle_type, VehicleType::Car);
    }

    #[test]
    fn second_park_is_rejected_and_original_kept() {
        let (lot, clock) = lot_at(1_000);
        lot.park("X1", "bike").unwrap();
        clock.advance(TimeDelta::minutes(5));

        let err = lot.park("X1", "car").unwrap_err();
        assert_eq!(err, ParkingError::AlreadyParked("X1".into()));

        let kept = lot.get("X1").unwrap();
        assert_eq!(kept.vehicle_type, VehicleType::Bike);
        assert_eq!(kept.entry_time.timestamp(), 1_000);
        assert_eq!(lot.len(), 1);
    }

    #[test]
    fn unknown_type_is_rejected() {
        let (lot, _clock) = lot_at(0);
        let err = lot.park("V1", "spaceship").unwrap_err();
        assert_eq!(err, ParkingError::InvalidVehicleType("spaceship".into()));
        assert!(lot.is_empty());
    }

    #[test]
    fn blank_fields_are_rejected() {
        let (lot, _clock) = lot_at(0);
        assert_eq!(
            lot.park("", "car").unwrap_err(),
            ParkingError::InvalidInput("licensePlate")
        );
        assert_eq!(
            lot.park("ABC", "  ").unwrap_err(),
            ParkingError::InvalidInput("type")
        );
        assert_eq!(
            lot.remove(" ").unwrap_err(),
            ParkingError::InvalidInput("licensePlate")
        );
        assert!(lot.is_empty());
    }

    #[test]
    fn remove_missing_vehicle_is_not_found() {
        let (lot, _clock) = lot_at(0);
        lot.park("KEEP", "truck").unwrap();

        let err = lot.remove("GONE").unwrap_err();
        assert_eq!(err, ParkingError::NotFound("GONE".into()));
        assert_eq!(lot.snapshot().len(), 1);
    }

    #[test]
    fn remove_bills_elapsed_time_and_forgets_vehicle() {
        let (lot, clock) = lot_at(0);
        lot.park("T1", "truck").unwrap();
        clock.advance(TimeDelta::minutes(150));

        let departure = lot.remove("T1").unwrap();
        assert!((departure.cost - 7.5).abs() < 1e-9);
        assert_eq!(departure.vehicle.license_plate, "T1");
        assert_eq!(departure.exit_time.timestamp(), 150 * 60);
        assert!(lot.get("T1").is_none());
        assert!(lot.snapshot().is_empty());

        // Not archived: a second removal finds nothing.
        assert_eq!(
            lot.remove("T1").unwrap_err(),
            ParkingError::NotFound("T1".into())
        );
    }

    #[test]
    fn immediate_removal_costs_about_nothing() {
        let lot = ParkingLot::new();
        lot.park("ABC123", "car").unwrap();
        let snap = lot.snapshot();
        assert_eq!(snap[0].vehicle_type, VehicleType::Car);

        let departure = lot.remove("ABC123").unwrap();
        assert!(departure.cost >= 0.0);
        assert!(departure.cost < 0.01);
        assert!(lot.is_empty());
    }

    #[test]
    fn equal_stays_cost_more_for_bigger_vehicles() {
        let (lot, clock) = lot_at(0);
        lot.park("B", "bike").unwrap();
        lot.park("C", "car").unwrap();
        lot.park("T", "truck").unwrap();
        clock.advance(TimeDelta::hours(2));

        let bike = lot.remove("B").unwrap().cost;
        let car = lot.remove("C").unwrap().cost;
        let truck = lot.remove("T").unwrap().cost;
        assert!(bike < car);
        assert!(car < truck);
    }

    #[test]
    fn snapshot_is_ordered_and_detached() {
        let (lot, _clock) = lot_at(0);
        lot.park("ZZZ", "car").unwrap();
        lot.park("AAA", "bike").unwrap();
        lot.park("MMM", "truck").unwrap();

        let snap = lot.snapshot();
        let plates: Vec<&str> = snap.iter().map(|v| v.license_plate.as_str()).collect();
        assert_eq!(plates, ["AAA", "MMM", "ZZZ"]);

        lot.remove("AAA").unwrap();
        lot.park("NEW", "car").unwrap();
        assert_eq!(snap.len(), 3);
        assert_eq!(snap[0].license_plate, "AAA");
    }

    #[test]
    fn plate_can_return_after_leaving() {
        let (lot, clock) = lot_at(0);
        lot.park("R1", "bike").unwrap();
        lot.remove("R1").unwrap();
        clock.advance(TimeDelta::hours(1));

        let again = lot.park("R1", "car").unwrap();
        assert_eq!(again.vehicle_type, VehicleType::Car);
        assert_eq!(again.entry_time.timestamp(), 3600);
    }

    #[test]
    fn concurrent_removals_succeed_exactly_once() {
        let lot = Arc::new(ParkingLot::new());
        lot.park("RACE", "car").unwrap();

        let handles: Vec<_> = (0..16)
            .map(|_| {
                let lot = lot.clone();
                thread::spawn(move || lot.remove("RACE"))
            })
            .collect();

        let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        let successes = results.iter().filter(|r| r.is_ok()).count();
        let not_found = results
            .iter()
            .filter(|r| matches!(r, Err(ParkingError::NotFound(_))))
            .count();
        assert_eq!(successes, 1);
        assert_eq!(not_found, 15);
        assert!(lot.is_empty());
    }

    #[test]
    fn concurrent_parks_admit_exactly_once() {
        let lot = Arc::new(ParkingLot::new());

        let handles: Vec<_> = (0..16)
            .map(|i| {
                let lot = lot.clone();
                let ty = VehicleType::ALL[i % 3];
                thread::spawn(move || lot.park_vehicle("SAME", ty))
            })
            .collect();

        let successes = handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .filter(Result::is_ok)
            .count();
        assert_eq!(successes, 1);
        assert_eq!(lot.len(), 1);
    }
}

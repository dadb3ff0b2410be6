//! REST endpoint handlers.
//!
//! Bodies are parsed from raw bytes rather than through axum's `Json`
//! extractor so that a missing `Content-Type` header or a wrong-typed field
//! both surface as the same `400 Invalid input`.

use std::sync::Arc;

use axum::Json;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use parking_rs::{ParkingError, ParkingLot};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::snapshot::LotSnapshot;

pub const PARKED_MESSAGE: &str = "Vehicle parked successfully";
pub const REMOVED_MESSAGE: &str = "Vehicle removed successfully";

/// Shared application state passed to all handlers via axum's `State` extractor.
#[derive(Clone)]
pub struct AppState {
    pub lot: Arc<ParkingLot>,
}

/// Request body for POST /park.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParkRequest {
    pub license_plate: String,
    #[serde(rename = "type")]
    pub vehicle_type: String,
}

/// Request body for POST /remove.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoveRequest {
    pub license_plate: String,
}

/// Response body for a successful POST /remove.
#[derive(Debug, Serialize)]
pub struct RemoveResponse {
    pub message: &'static str,
    pub cost: f64,
}

/// A rejected request, rendered as a status code and a plain-text body.
#[derive(Debug)]
pub enum ApiError {
    /// The body was not JSON, or a field was missing or not a string.
    Malformed,
    /// The registry refused the operation.
    Parking(ParkingError),
}

impl From<ParkingError> for ApiError {
    fn from(err: ParkingError) -> Self {
        ApiError::Parking(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::Malformed | ApiError::Parking(ParkingError::InvalidInput(_)) => {
                (StatusCode::BAD_REQUEST, "Invalid input")
            }
            ApiError::Parking(ParkingError::InvalidVehicleType(_)) => {
                (StatusCode::BAD_REQUEST, "Invalid vehicle type")
            }
            ApiError::Parking(ParkingError::AlreadyParked(_)) => {
                (StatusCode::BAD_REQUEST, "Vehicle already parked")
            }
            ApiError::Parking(ParkingError::NotFound(_)) => {
                (StatusCode::NOT_FOUND, "Vehicle not found")
            }
        };
        (status, body).into_response()
    }
}

fn parse_body<T: DeserializeOwned>(body: &Bytes) -> Result<T, ApiError> {
    serde_json::from_slice(body).map_err(|e| {
        debug!(error = %e, "rejected malformed body");
        ApiError::Malformed
    })
}

/// POST /park — Admit a vehicle.
///
/// Returns 200 with a text confirmation, or 400 if the body is malformed,
/// the type is unknown, or the plate is already parked.
pub async fn post_park(
    State(app): State<AppState>,
    body: Bytes,
) -> Result<&'static str, ApiError> {
    let req: ParkRequest = parse_body(&body)?;
    app.lot.park(&req.license_plate, &req.vehicle_type)?;
    Ok(PARKED_MESSAGE)
}

/// POST /remove — Bill and release a vehicle.
///
/// Returns 200 with `{message, cost}`, 400 if the body is malformed, or 404
/// if the plate is not parked.
pub async fn post_remove(
    State(app): State<AppState>,
    body: Bytes,
) -> Result<Json<RemoveResponse>, ApiError> {
    let req: RemoveRequest = parse_body(&body)?;
    let departure = app.lot.remove(&req.license_plate)?;
    Ok(Json(RemoveResponse {
        message: REMOVED_MESSAGE,
        cost: departure.cost,
    }))
}

/// GET /status — Every parked vehicle, keyed by plate.
pub async fn get_status(State(app): State<AppState>) -> Json<LotSnapshot> {
    Json(LotSnapshot::from_lot(&app.lot))
}

//! HTTP interface for the `parking-rs` occupancy registry.
//!
//! `parking-web` wraps a shared [`ParkingLot`] in an axum router with three
//! endpoints:
//!
//! | Route     | Method | Body                              | Success                     |
//! |-----------|--------|-----------------------------------|-----------------------------|
//! | `/park`   | POST   | `{"licensePlate": .., "type": ..}` | 200 text confirmation       |
//! | `/remove` | POST   | `{"licensePlate": ..}`             | 200 `{"message", "cost"}`   |
//! | `/status` | GET    | —                                 | 200 object keyed by plate   |
//!
//! Rejections are plain text: 400 for malformed bodies, unknown vehicle
//! types and duplicate plates, 404 for removing a plate that is not parked.
//!
//! # Quick start
//!
//! ```ignore
//! use std::sync::Arc;
//! use parking_rs::ParkingLot;
//! use parking_web::{WebConfig, spawn_web};
//!
//! let lot = Arc::new(ParkingLot::new());
//! let addr = spawn_web(lot, WebConfig::default()).await?;
//! println!("Parking lot API: http://{addr}");
//! ```

mod api;
mod server;
pub mod snapshot;

pub use api::{PARKED_MESSAGE, REMOVED_MESSAGE};
pub use server::{build_router, start_server};
pub use snapshot::LotSnapshot;

use std::io;
use std::net::SocketAddr;
use std::sync::Arc;

use parking_rs::ParkingLot;

/// Configuration for the web server.
pub struct WebConfig {
    /// Address to bind to. Default: `127.0.0.1:8080`.
    pub bind_addr: SocketAddr,
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 8080)),
        }
    }
}

/// Spawn the web server on a Tokio task and return the bound address.
///
/// The server runs until the Tokio runtime shuts down. Pass the same
/// `Arc<ParkingLot>` elsewhere to inspect or drive the registry directly.
pub async fn spawn_web(lot: Arc<ParkingLot>, config: WebConfig) -> io::Result<SocketAddr> {
    let router = server::build_router(lot);
    server::start_server(router, config.bind_addr).await
}

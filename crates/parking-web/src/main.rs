//! Parking lot API server.
//!
//! # Usage
//!
//! ```bash
//! cargo run -p parking-web
//! cargo run -p parking-web -- --port 3000
//! RUST_LOG=debug cargo run -p parking-web -- --host 0.0.0.0
//! ```
//!
//! Then:
//!
//! ```bash
//! curl -X POST localhost:8080/park -d '{"licensePlate":"ABC123","type":"car"}'
//! curl localhost:8080/status
//! curl -X POST localhost:8080/remove -d '{"licensePlate":"ABC123"}'
//! ```

use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;

use clap::Parser;
use parking_rs::ParkingLot;
use parking_web::{WebConfig, spawn_web};
use tracing::info;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Track parked vehicles and bill them by the hour over HTTP.
#[derive(Parser)]
#[command(about = "Parking lot occupancy and billing API")]
struct Args {
    /// Interface to listen on.
    #[arg(long, default_value = "127.0.0.1")]
    host: IpAddr,

    /// Port to listen on.
    #[arg(long, default_value_t = 8080)]
    port: u16,
}

#[tokio::main]
async fn main() -> Result<(), String> {
    let args = Args::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = WebConfig {
        bind_addr: SocketAddr::new(args.host, args.port),
    };
    let lot = Arc::new(ParkingLot::new());
    let addr = spawn_web(lot, config)
        .await
        .map_err(|e| format!("failed to bind {}:{}: {e}", args.host, args.port))?;

    info!(%addr, "parking lot API listening");
    println!("Parking lot API: http://{addr}");

    tokio::signal::ctrl_c()
        .await
        .map_err(|e| format!("failed to wait for Ctrl-C: {e}"))?;
    info!("shutting down");
    Ok(())
}

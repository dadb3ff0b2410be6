//! Axum server setup and router construction.

use std::io;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use parking_rs::ParkingLot;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::error;

use crate::api::{self, AppState};

/// Build the full axum router.
///
/// The router serves:
/// - `POST /park`
/// - `POST /remove`
/// - `GET /status`
pub fn build_router(lot: Arc<ParkingLot>) -> Router {
    let app_state = AppState { lot };

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/park", post(api::post_park))
        .route("/remove", post(api::post_remove))
        .route("/status", get(api::get_status))
        .with_state(app_state)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

/// Bind `bind_addr`, serve `router` on a background task, and return the
/// bound address.
///
/// Binding to port 0 picks a free port; the returned address has the real one.
pub async fn start_server(router: Router, bind_addr: SocketAddr) -> io::Result<SocketAddr> {
    let listener = tokio::net::TcpListener::bind(bind_addr).await?;
    let addr = listener.local_addr()?;

    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, router).await {
            error!(error = %e, "server exited");
        }
    });

    Ok(addr)
}

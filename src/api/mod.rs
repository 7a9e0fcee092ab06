//! HTTP transport for the billing engine.
//!
//! Endpoints:
//! - `POST /calculate` — normalizes the request body into a
//!   `ConsumptionPayload` and returns the invoice as JSON
//! - `OPTIONS /calculate` — CORS preflight, 204 No Content
//! - `GET /tariffs` — the active tariff schedule, for display-side
//!   consumers that render rate tables

mod handlers;
mod types;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};

use crate::config::TariffSchedule;

/// Immutable application state shared across all request handlers.
///
/// The schedule is loaded once at startup and wrapped in `Arc` — no locks
/// needed since every request only reads it.
pub struct AppState {
    /// Active tariff schedule used for every calculation.
    pub schedule: TariffSchedule,
}

/// Builds the axum router with all API routes.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route(
            "/calculate",
            post(handlers::calculate_bill).options(handlers::preflight),
        )
        .route("/tariffs", get(handlers::get_tariffs))
        .with_state(state)
}

/// Binds to the given address and serves the API.
///
/// # Panics
///
/// Panics if the TCP listener cannot bind to `addr`.
pub async fn serve(state: Arc<AppState>, addr: SocketAddr) {
    let app = router(state);
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .unwrap_or_else(|e| panic!("failed to bind to {addr}: {e}"));
    eprintln!("API server listening on http://{addr}");
    axum::serve(listener, app)
        .await
        .unwrap_or_else(|e| panic!("server error: {e}"));
}

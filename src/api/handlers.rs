//! Request handlers for the API endpoints.

use std::sync::Arc;

use axum::Json;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::http::header::{
    ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS, ACCESS_CONTROL_ALLOW_ORIGIN,
};
use axum::response::IntoResponse;

use crate::billing::calculate;
use crate::billing::types::Invoice;
use crate::config::TariffSchedule;

use super::AppState;
use super::types::{ErrorResponse, normalize_request};

/// Computes a bill from a JSON consumption request.
///
/// `POST /calculate` → 200 + `Invoice` JSON
/// Malformed JSON, a non-object body, or an unrecognized group tag → 400
/// + `ErrorResponse`.
pub async fn calculate_bill(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<impl IntoResponse, (StatusCode, Json<ErrorResponse>)> {
    let value: serde_json::Value = serde_json::from_slice(&body).map_err(|e| {
        (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: format!("malformed JSON body: {e}"),
            }),
        )
    })?;

    let payload = normalize_request(value)
        .map_err(|error| (StatusCode::BAD_REQUEST, Json(ErrorResponse { error })))?;

    let invoice: Invoice = calculate(&state.schedule, &payload);
    Ok(([(ACCESS_CONTROL_ALLOW_ORIGIN, "*")], Json(invoice)))
}

/// Answers a CORS preflight for the calculate endpoint.
///
/// `OPTIONS /calculate` → 204 No Content
pub async fn preflight() -> impl IntoResponse {
    (
        StatusCode::NO_CONTENT,
        [
            (ACCESS_CONTROL_ALLOW_ORIGIN, "*"),
            (ACCESS_CONTROL_ALLOW_METHODS, "POST, OPTIONS"),
            (ACCESS_CONTROL_ALLOW_HEADERS, "content-type"),
        ],
    )
}

/// Returns the active tariff schedule.
///
/// `GET /tariffs` → 200 + `TariffSchedule` JSON
pub async fn get_tariffs(State(state): State<Arc<AppState>>) -> Json<TariffSchedule> {
    Json(state.schedule.clone())
}

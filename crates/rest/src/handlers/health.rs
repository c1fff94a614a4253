//! Health check endpoint handler.
//!
//! Provides a simple health check endpoint for monitoring and load balancers.

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use payments_persistence::core::ItemStore;
use tracing::{debug, warn};

use crate::state::AppState;

/// Handler for the health check endpoint.
///
/// Asks the store to reach its backend.
///
/// # HTTP Request
///
/// `GET /health`
///
/// # Response
///
/// - `200 OK` - `{"status":"up"}`
/// - `503 Service Unavailable` - `{"status":"down"}`
pub async fn health_handler<S>(State(state): State<AppState<S>>) -> Response
where
    S: ItemStore + Send + Sync,
{
    debug!("Processing health check request");

    match state.store().check().await {
        Ok(()) => (StatusCode::OK, Json(serde_json::json!({"status": "up"}))).into_response(),
        Err(e) => {
            warn!(
                backend = state.store().backend_name(),
                error = %e,
                "Health check failed"
            );
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(serde_json::json!({"status": "down"})),
            )
                .into_response()
        }
    }
}

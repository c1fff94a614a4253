//! Repository administration handlers.
//!
//! Mounted under `/admin/repo` only when the server runs with admin enabled.

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use payments_persistence::core::ItemStore;
use tracing::{debug, info};

use crate::error::RestResult;
use crate::state::AppState;

/// Reports how many payments are visible.
///
/// # HTTP Request
///
/// `GET /admin/repo`
///
/// # Response
///
/// - `200 OK` - `{"count": N}`
pub async fn repo_info_handler<S>(State(state): State<AppState<S>>) -> RestResult<Response>
where
    S: ItemStore + Send + Sync,
{
    debug!("Processing repository info request");

    let info = state.store().info().await?;
    Ok(Json(info).into_response())
}

/// Physically removes every payment, deleted ones included.
///
/// # HTTP Request
///
/// `DELETE /admin/repo`
///
/// # Response
///
/// - `204 No Content` - Repository emptied
pub async fn repo_clear_handler<S>(State(state): State<AppState<S>>) -> RestResult<Response>
where
    S: ItemStore + Send + Sync,
{
    let removed = state.store().delete_all().await?;
    info!(removed = removed, "Repository cleared");

    Ok(StatusCode::NO_CONTENT.into_response())
}

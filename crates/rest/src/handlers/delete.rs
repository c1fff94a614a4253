//! Delete interaction handler.
//!
//! `DELETE [base]/payments/{id}?version=N`

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use payments_persistence::core::ItemStore;
use tracing::debug;

use crate::error::{RestError, RestResult};
use crate::extractors::ExpectedVersion;
use crate::state::AppState;

/// Handler for the delete interaction.
///
/// Soft-deletes the payment if it is still at `version`. The id stays
/// reserved afterwards.
///
/// # Response
///
/// - `204 No Content` - Payment deleted
/// - `400 Bad Request` - `version` missing or not an integer
/// - `404 Not Found` - No such payment
/// - `409 Conflict` - Stale version, or the payment was deleted concurrently
pub async fn delete_handler<S>(
    State(state): State<AppState<S>>,
    Path(id): Path<String>,
    ExpectedVersion(version): ExpectedVersion,
) -> RestResult<Response>
where
    S: ItemStore + Send + Sync,
{
    debug!(id = %id, version = version, "Processing delete request");

    let mut item = state.store().fetch(&id).await?;
    item.version = version;

    state
        .store()
        .delete(&item)
        .await
        .map_err(|e| RestError::conflict_from(state.store(), e))?;

    debug!(id = %id, "Payment deleted");

    Ok(StatusCode::NO_CONTENT.into_response())
}

//! Update interaction handler.
//!
//! `PUT [base]/payments/{id}`

use axum::{
    Json,
    extract::{Path, State},
    response::{IntoResponse, Response},
};
use payments_persistence::core::ItemStore;
use tracing::debug;

use crate::error::{RestError, RestResult};
use crate::extractors::PaymentBody;
use crate::responses::PaymentResponse;
use crate::state::AppState;
use crate::translator;

/// Handler for the update interaction.
///
/// The body's `version` is the version the client last saw. The store only
/// applies the update if the payment is still at that version.
///
/// # Response
///
/// - `200 OK` - The payment at its new version
/// - `400 Bad Request` - Malformed body, failed validation, or a body id that
///   differs from the path id
/// - `404 Not Found` - No such payment
/// - `409 Conflict` - Stale version, or the payment was deleted concurrently
pub async fn update_handler<S>(
    State(state): State<AppState<S>>,
    Path(id): Path<String>,
    PaymentBody(payment): PaymentBody,
) -> RestResult<Response>
where
    S: ItemStore + Send + Sync,
{
    debug!(id = %id, version = payment.version, "Processing update request");

    payment.validate()?;

    if payment.id != id {
        return Err(RestError::bad_request(format!(
            "Payment id {} does not match path id {}",
            payment.id, id
        )));
    }

    state.store().fetch(&id).await?;

    let item = translator::to_stored(&payment)?;
    let updated = state
        .store()
        .update(&item)
        .await
        .map_err(|e| RestError::conflict_from(state.store(), e))?;

    debug!(id = %id, version = updated.version, "Payment updated");

    let payment = translator::from_stored(updated)?;
    Ok(Json(PaymentResponse::new(payment, state.links())).into_response())
}

//! Fetch interaction handler.
//!
//! `GET [base]/payments/{id}`

use axum::{
    Json,
    extract::{Path, State},
    response::{IntoResponse, Response},
};
use payments_persistence::core::ItemStore;
use tracing::debug;

use crate::error::RestResult;
use crate::responses::PaymentResponse;
use crate::state::AppState;
use crate::translator;

/// Handler for the fetch interaction.
///
/// # Response
///
/// - `200 OK` - The payment
/// - `404 Not Found` - No such payment, or it was deleted
pub async fn fetch_handler<S>(
    State(state): State<AppState<S>>,
    Path(id): Path<String>,
) -> RestResult<Response>
where
    S: ItemStore + Send + Sync,
{
    debug!(id = %id, "Processing fetch request");

    let item = state.store().fetch(&id).await?;
    let payment = translator::from_stored(item)?;

    Ok(Json(PaymentResponse::new(payment, state.links())).into_response())
}

//! Create interaction handler.
//!
//! `POST [base]/payments`

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use payments_persistence::core::ItemStore;
use tracing::debug;

use crate::error::RestResult;
use crate::extractors::PaymentBody;
use crate::responses::PaymentResponse;
use crate::state::AppState;
use crate::translator;

/// Handler for the create interaction.
///
/// The client chooses the id. The stored payment always starts at version 0,
/// whatever version the body carries.
///
/// # Response
///
/// - `201 Created` - The payment at version 0
/// - `400 Bad Request` - Malformed body or failed validation
/// - `409 Conflict` - The id is taken, including by a deleted payment
///
/// # Example
///
/// ```http
/// POST /v1/payments HTTP/1.1
/// Content-Type: application/json
///
/// {"data": {"id": "p1", "type": "Payment", "organisation_id": "org1",
///           "attributes": {"amount": "10.00"}}}
/// ```
pub async fn create_handler<S>(
    State(state): State<AppState<S>>,
    PaymentBody(payment): PaymentBody,
) -> RestResult<Response>
where
    S: ItemStore + Send + Sync,
{
    debug!(id = %payment.id, "Processing create request");

    payment.validate()?;

    let item = translator::to_stored(&payment)?;
    let created = state.store().create(&item).await?;

    debug!(id = %created.id, version = created.version, "Payment created");

    let payment = translator::from_stored(created)?;
    Ok((
        StatusCode::CREATED,
        Json(PaymentResponse::new(payment, state.links())),
    )
        .into_response())
}

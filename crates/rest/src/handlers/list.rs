//! List interaction handler.
//!
//! `GET [base]/payments?from=F&to=T`

use axum::{
    Json,
    extract::State,
    response::{IntoResponse, Response},
};
use payments_persistence::core::ItemStore;
use tracing::debug;

use crate::error::RestResult;
use crate::extractors::ListWindow;
use crate::responses::PaymentsResponse;
use crate::state::AppState;
use crate::translator;

/// Handler for the list interaction.
///
/// Returns at most `max_page_size` payments ordered by id, with `self`,
/// `next` and, past the first window, `prev` links.
///
/// # Response
///
/// - `200 OK` - The window, possibly empty
/// - `400 Bad Request` - `to` is not greater than `from`
pub async fn list_handler<S>(
    State(state): State<AppState<S>>,
    window: ListWindow,
) -> RestResult<Response>
where
    S: ItemStore + Send + Sync,
{
    debug!(
        from = window.from(),
        to = window.to(),
        limit = window.limit(),
        "Processing list request"
    );

    let items = state.store().list(window.from(), window.limit()).await?;
    let data = translator::from_stored_all(items)?;

    debug!(count = data.len(), "Listed payments");

    let body = PaymentsResponse {
        data,
        links: state.links().for_window(&window),
    };
    Ok(Json(body).into_response())
}

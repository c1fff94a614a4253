//! Payment route configuration.
//!
//! Defines all routes for the payments API.

use axum::{
    Router,
    routing::get,
};
use payments_persistence::core::ItemStore;

use crate::handlers;
use crate::state::AppState;

/// Creates all payments API routes.
///
/// # Routes
///
/// ## Versioned (under `/{api_version}`)
/// - `GET /payments?from=&to=` - List
/// - `POST /payments` - Create
/// - `GET /payments/{id}` - Fetch
/// - `PUT /payments/{id}` - Update
/// - `DELETE /payments/{id}?version=` - Delete
///
/// ## Unversioned
/// - `GET /health` - Health check
/// - `GET /admin/repo` - Repository statistics (admin only)
/// - `DELETE /admin/repo` - Repository wipe (admin only)
pub fn create_routes<S>(state: AppState<S>) -> Router
where
    S: ItemStore + Send + Sync + 'static,
{
    let payments = Router::new()
        .route(
            "/payments",
            get(handlers::list_handler::<S>).post(handlers::create_handler::<S>),
        )
        .route(
            "/payments/{id}",
            get(handlers::fetch_handler::<S>)
                .put(handlers::update_handler::<S>)
                .delete(handlers::delete_handler::<S>),
        );

    let mut router = Router::new()
        .nest(&format!("/{}", state.config().api_version), payments)
        .route("/health", get(handlers::health_handler::<S>));

    if state.config().enable_admin {
        router = router.route(
            "/admin/repo",
            get(handlers::repo_info_handler::<S>).delete(handlers::repo_clear_handler::<S>),
        );
    }

    router.with_state(state)
}


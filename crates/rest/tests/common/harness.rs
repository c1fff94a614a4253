//! REST API test harness.

use std::sync::Arc;

use axum_test::TestServer;
use payments_persistence::backends::sqlite::SqliteStore;
use serde_json::Value;

use payments_rest::{AppState, ServerConfig, routing};

use super::fixtures;

/// Creates a test server over a fresh in-memory store.
pub fn create_test_server() -> (TestServer, Arc<SqliteStore>) {
    create_test_server_with_config(ServerConfig::for_testing())
}

/// Creates a test server with the given configuration.
pub fn create_test_server_with_config(config: ServerConfig) -> (TestServer, Arc<SqliteStore>) {
    let store = SqliteStore::in_memory().expect("Failed to create SQLite store");
    store.init_schema().expect("Failed to init schema");
    serve(store, config)
}

/// Creates a test server over `store` as given, without touching its schema.
pub fn serve(store: SqliteStore, config: ServerConfig) -> (TestServer, Arc<SqliteStore>) {
    let store = Arc::new(store);
    let state = AppState::new(Arc::clone(&store), config);
    let app = routing::create_routes(state);
    let server = TestServer::new(app).expect("Failed to create test server");
    (server, store)
}

/// Creates payment `id` through the API and returns the response data.
pub async fn seed_payment(server: &TestServer, id: &str, amount: &str) -> Value {
    let response = server
        .post("/v1/payments")
        .json(&fixtures::payment(id, amount))
        .await;
    response.assert_status(axum::http::StatusCode::CREATED);
    response.json::<Value>()["data"].clone()
}

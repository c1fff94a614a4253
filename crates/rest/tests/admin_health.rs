//! Health and repository administration endpoint tests.

mod common;

use axum::http::{HeaderValue, StatusCode, header};
use axum_test::TestServer;
use payments_persistence::backends::sqlite::SqliteStore;
use payments_rest::{ServerConfig, create_app_with_config};
use serde_json::{Value, json};

use common::fixtures;
use common::harness::{create_test_server, create_test_server_with_config, seed_payment};

#[tokio::test]
async fn test_health_is_up() {
    let (server, _store) = create_test_server();

    let response = server.get("/health").await;

    response.assert_status_ok();
    assert_eq!(response.json::<Value>(), json!({"status": "up"}));
}

#[tokio::test]
async fn test_health_is_not_versioned() {
    let (server, _store) = create_test_server();

    server
        .get("/v1/health")
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_repo_info_counts_visible_payments() {
    let (server, _store) = create_test_server();

    let response = server.get("/admin/repo").await;
    response.assert_status_ok();
    assert_eq!(response.json::<Value>(), json!({"count": 0}));

    seed_payment(&server, "p1", "1.00").await;
    seed_payment(&server, "p2", "2.00").await;
    server
        .delete("/v1/payments/p2")
        .add_query_param("version", 0)
        .await
        .assert_status(StatusCode::NO_CONTENT);

    let response = server.get("/admin/repo").await;
    assert_eq!(response.json::<Value>(), json!({"count": 1}));
}

#[tokio::test]
async fn test_repo_wipe_frees_ids() {
    let (server, _store) = create_test_server();
    seed_payment(&server, "p1", "1.00").await;
    server
        .delete("/v1/payments/p1")
        .add_query_param("version", 0)
        .await
        .assert_status(StatusCode::NO_CONTENT);

    server
        .delete("/admin/repo")
        .await
        .assert_status(StatusCode::NO_CONTENT);

    let response = server.get("/admin/repo").await;
    assert_eq!(response.json::<Value>(), json!({"count": 0}));

    server
        .post("/v1/payments")
        .json(&fixtures::payment("p1", "1.00"))
        .await
        .assert_status(StatusCode::CREATED);
}

#[tokio::test]
async fn test_admin_routes_absent_by_default() {
    let config = ServerConfig {
        enable_admin: false,
        ..ServerConfig::for_testing()
    };
    let (server, store) = create_test_server_with_config(config);

    server
        .get("/admin/repo")
        .await
        .assert_status(StatusCode::NOT_FOUND);
    server
        .delete("/admin/repo")
        .await
        .assert_status(StatusCode::NOT_FOUND);

    // Payments routes still work.
    seed_payment(&server, "p1", "1.00").await;
    assert!(store.is_memory());
}

#[tokio::test]
async fn test_full_app_applies_cors() {
    let store = SqliteStore::in_memory().expect("Failed to create SQLite store");
    store.init_schema().expect("Failed to init schema");
    let config = ServerConfig {
        enable_cors: true,
        cors_origins: "https://app.example.com".to_string(),
        ..ServerConfig::for_testing()
    };
    let server = TestServer::new(create_app_with_config(store, config))
        .expect("Failed to create test server");

    let response = server
        .get("/health")
        .add_header(
            header::ORIGIN,
            HeaderValue::from_static("https://app.example.com"),
        )
        .await;

    response.assert_status_ok();
    assert_eq!(
        response.header(header::ACCESS_CONTROL_ALLOW_ORIGIN),
        "https://app.example.com"
    );
}

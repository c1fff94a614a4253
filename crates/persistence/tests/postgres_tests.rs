//! PostgreSQL backend integration tests.
//!
//! Configuration tests run everywhere. Tests that need a server read its URL
//! from `PAYMENTS_TEST_DATABASE_URL` and return early when it is unset.
//!
//! Run with: `cargo test -p payments-persistence --features postgres -- postgres`

#![cfg(feature = "postgres")]

use payments_persistence::backends::postgres::{PostgresSslMode, PostgresStore, PostgresStoreConfig};
use payments_persistence::core::{BackendKind, ItemStore};
use payments_persistence::{StoreConfig, StoredItem};

// ============================================================================
// Configuration Tests (no PostgreSQL instance required)
// ============================================================================

#[test]
fn test_postgres_config_defaults() {
    let config = PostgresStoreConfig::default();
    assert_eq!(config.host, "localhost");
    assert_eq!(config.port, 5432);
    assert_eq!(config.dbname, "payments");
    assert_eq!(config.user, "payments");
    assert!(config.password.is_none());
    assert_eq!(config.max_connections, 10);
    assert_eq!(config.connect_timeout_secs, 5);
    assert_eq!(config.statement_timeout_ms, 30000);
    assert_eq!(config.ssl_mode, PostgresSslMode::Prefer);
}

#[test]
fn test_postgres_config_serialization() {
    let config = PostgresStoreConfig {
        host: "pg-server".to_string(),
        port: 5433,
        password: Some("secret".to_string()),
        ..Default::default()
    };

    let json = serde_json::to_string(&config).unwrap();
    let deserialized: PostgresStoreConfig = serde_json::from_str(&json).unwrap();
    assert_eq!(deserialized.host, "pg-server");
    assert_eq!(deserialized.port, 5433);
    assert_eq!(deserialized.password, Some("secret".to_string()));
}

#[test]
fn test_postgres_backend_kind() {
    assert_eq!(format!("{}", BackendKind::Postgres), "postgres");
}

// ============================================================================
// Live Tests (PAYMENTS_TEST_DATABASE_URL required)
// ============================================================================

async fn connect(table: &str) -> Option<PostgresStore> {
    let url = std::env::var("PAYMENTS_TEST_DATABASE_URL").ok()?;
    let store = PostgresStore::from_connection_string(&url, StoreConfig::new(table).unwrap())
        .await
        .expect("Failed to connect to PostgreSQL");
    store.init_schema().await.expect("Failed to initialize schema");
    store.delete_all().await.expect("Failed to clear table");
    Some(store)
}

#[tokio::test]
async fn test_postgres_crud_lifecycle() {
    let Some(store) = connect("payments_it_lifecycle").await else {
        return;
    };

    let v0 = store
        .create(&StoredItem::new("p1", "org1", br#"{"amount":"10.00"}"#.to_vec()))
        .await
        .unwrap();
    assert_eq!(v0.version, 0);

    let v1 = store.update(&v0).await.unwrap();
    assert_eq!(v1.version, 1);
    assert!(store.update(&v0).await.unwrap_err().is_conflict());

    assert!(store.delete(&v0).await.unwrap_err().is_conflict());
    store.delete(&v1).await.unwrap();

    assert!(store.fetch("p1").await.unwrap_err().is_not_found());
    assert!(store.create(&v0).await.unwrap_err().is_conflict());
    assert_eq!(store.info().await.unwrap().count, 0);
}

#[tokio::test]
async fn test_postgres_list_and_check() {
    let Some(store) = connect("payments_it_list").await else {
        return;
    };

    for i in 0..4 {
        store
            .create(&StoredItem::new(format!("p{}", i), "org1", Vec::new()))
            .await
            .unwrap();
    }

    let page = store.list(1, 2).await.unwrap();
    assert_eq!(page.len(), 2);
    assert_eq!(page[0].id, "p1");
    store.check().await.unwrap();
    assert!(store.description().contains("payments_it_list"));
}

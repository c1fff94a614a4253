//! Payments API server.
//!
//! Serves the payments REST resource over SQLite or PostgreSQL.

use clap::Parser;
use payments_persistence::StoreConfig;
use payments_persistence::core::ItemStore;
use payments_rest::{ServerConfig, StorageBackend, create_app_with_config, init_logging};
use tracing::info;

#[cfg(feature = "sqlite")]
use payments_persistence::backends::sqlite::{SqliteStore, SqliteStoreConfig};

/// Fails fast if the store cannot reach its backend, then logs what it serves.
async fn check_store<S: ItemStore>(store: &S) -> anyhow::Result<()> {
    store
        .check()
        .await
        .map_err(|e| anyhow::anyhow!("Store {} is unreachable: {}", store.backend_name(), e))?;
    info!(store = %store.description(), "Store ready");
    Ok(())
}

/// Starts the Axum HTTP server.
async fn serve(app: axum::Router, config: &ServerConfig) -> anyhow::Result<()> {
    let addr = config.socket_addr();
    info!(address = %addr, "Server listening");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ServerConfig::parse();
    init_logging(&config.log_level);

    if let Err(errors) = config.validate() {
        for error in &errors {
            eprintln!("Configuration error: {}", error);
        }
        std::process::exit(1);
    }

    let store_config = StoreConfig::new(config.table_name.clone())?;

    info!(
        port = config.port,
        host = %config.host,
        storage_backend = %config.storage_backend,
        table = %store_config.table_name,
        base_url = %config.base_url(),
        request_timeout = config.request_timeout,
        cors = config.enable_cors,
        admin = config.enable_admin,
        max_page_size = config.max_page_size,
        "Starting payments server"
    );

    match config.storage_backend {
        StorageBackend::Sqlite => start_sqlite(config, store_config).await,
        StorageBackend::Postgres => start_postgres(config, store_config).await,
    }
}

/// Starts the server with the SQLite backend.
#[cfg(feature = "sqlite")]
async fn start_sqlite(config: ServerConfig, store_config: StoreConfig) -> anyhow::Result<()> {
    let db_path = config.database_url.as_deref().unwrap_or("payments.db");
    info!(database = %db_path, "Initializing SQLite backend");

    let store = SqliteStore::with_config(db_path, SqliteStoreConfig::default(), store_config)?;
    store.init_schema()?;
    check_store(&store).await?;

    let app = create_app_with_config(store, config.clone());
    serve(app, &config).await
}

/// Fallback when sqlite feature is not enabled.
#[cfg(not(feature = "sqlite"))]
async fn start_sqlite(_config: ServerConfig, _store_config: StoreConfig) -> anyhow::Result<()> {
    anyhow::bail!(
        "The sqlite backend requires the 'sqlite' feature. \
         Build with: cargo build -p payments-server --features sqlite"
    )
}

/// Starts the server with the PostgreSQL backend.
#[cfg(feature = "postgres")]
async fn start_postgres(config: ServerConfig, store_config: StoreConfig) -> anyhow::Result<()> {
    use payments_persistence::backends::postgres::PostgresStore;

    let url = config
        .database_url
        .as_deref()
        .ok_or_else(|| anyhow::anyhow!("The postgres backend requires a database URL"))?;
    info!("Initializing PostgreSQL backend from connection string");

    let store = PostgresStore::from_connection_string(url, store_config).await?;
    store.init_schema().await?;
    check_store(&store).await?;

    let app = create_app_with_config(store, config.clone());
    serve(app, &config).await
}

/// Fallback when postgres feature is not enabled.
#[cfg(not(feature = "postgres"))]
async fn start_postgres(_config: ServerConfig, _store_config: StoreConfig) -> anyhow::Result<()> {
    anyhow::bail!(
        "The postgres backend requires the 'postgres' feature. \
         Build with: cargo build -p payments-server --features postgres"
    )
}

#[cfg(not(any(feature = "sqlite", feature = "postgres")))]
compile_error!("At least one database backend feature must be enabled");

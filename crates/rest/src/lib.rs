//! # payments-rest - Payments REST API
//!
//! This crate exposes a versioned item store as a REST resource for payments.
//! Writers are serialized by optimistic locking: every update and delete names
//! the version it expects, and a stale version is answered with `409 Conflict`.
//!
//! ## Backend Support
//!
//! Storage backends are configured through feature flags:
//!
//! - `sqlite` - SQLite backend (default, great for development)
//! - `postgres` - PostgreSQL backend (recommended for production)
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use payments_rest::{create_app_with_config, ServerConfig};
//! use payments_persistence::backends::sqlite::SqliteStore;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let store = SqliteStore::open("payments.db")?;
//!     store.init_schema()?;
//!
//!     let config = ServerConfig::default();
//!     let app = create_app_with_config(store, config);
//!
//!     let listener = tokio::net::TcpListener::bind("127.0.0.1:8080").await?;
//!     axum::serve(listener, app).await?;
//!
//!     Ok(())
//! }
//! ```
//!
//! ## API Endpoints
//!
//! | Interaction | HTTP Method | URL Pattern |
//! |------------|-------------|-------------|
//! | list | GET | `/v1/payments?from=F&to=T` |
//! | fetch | GET | `/v1/payments/{id}` |
//! | create | POST | `/v1/payments` |
//! | update | PUT | `/v1/payments/{id}` |
//! | delete | DELETE | `/v1/payments/{id}?version=N` |
//! | health | GET | `/health` |
//! | repository info | GET | `/admin/repo` |
//! | repository wipe | DELETE | `/admin/repo` |
//!
//! The `v1` segment is the configured API version.
//!
//! ## Error Handling
//!
//! Errors carry no body beyond an empty JSON object:
//!
//! | HTTP Status | Meaning |
//! |-------------|---------|
//! | 400 | Malformed body, failed validation, bad query |
//! | 404 | Payment not found |
//! | 409 | Duplicate id or stale version |
//! | 500 | Storage or translation failure |
//!
//! ## Configuration
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `PAYMENTS_PORT` | 8080 | Server port |
//! | `PAYMENTS_HOST` | 127.0.0.1 | Host to bind |
//! | `PAYMENTS_LOG_LEVEL` | info | Log level (error, warn, info, debug, trace) |
//! | `PAYMENTS_REQUEST_TIMEOUT` | 60 | Request timeout (seconds) |
//! | `PAYMENTS_ENABLE_CORS` | false | Enable CORS |
//! | `PAYMENTS_EXTERNAL_URL` | http://localhost:8080 | Base of absolute links |
//! | `PAYMENTS_API_VERSION` | v1 | Path prefix of the payment routes |
//! | `PAYMENTS_STORAGE_BACKEND` | sqlite | `sqlite` or `postgres` |
//! | `PAYMENTS_DATABASE_URL` | - | Database path or connection string |
//! | `PAYMENTS_TABLE_NAME` | payments | Table holding payments |
//! | `PAYMENTS_ENABLE_ADMIN` | false | Mount `/admin/repo` |
//! | `PAYMENTS_MAX_PAGE_SIZE` | 20 | Largest list window |
//!
//! ## Architecture
//!
//! - [`error`] - Error types and their HTTP rendering
//! - [`config`] - Server configuration
//! - [`state`] - Application state (store, configuration, links)
//! - [`model`] - The payment resource and its validation
//! - [`translator`] - Conversion between payments and stored items
//! - [`handlers`] - HTTP request handlers for each interaction
//! - [`extractors`] - Axum extractors for bodies and query parameters
//! - [`responses`] - Response envelopes and links
//! - [`routing`] - Route configuration

// Enforce documentation
#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod model;
pub mod responses;
pub mod routing;
pub mod state;
pub mod translator;

// Re-export commonly used types
pub use config::{ServerConfig, StorageBackend};
pub use error::{RestError, RestResult};
pub use state::AppState;

use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use axum::{Router, http::StatusCode};
use payments_persistence::core::ItemStore;
use tower::ServiceBuilder;
use tower_http::{
    cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::{info, warn};

/// Creates the Axum application with default configuration.
///
/// For more control, use [`create_app_with_config`].
pub fn create_app<S>(store: S) -> Router
where
    S: ItemStore + Send + Sync + 'static,
{
    create_app_with_config(store, ServerConfig::default())
}

/// Creates the Axum application with custom configuration.
///
/// # Arguments
///
/// * `store` - The item store holding payments
/// * `config` - Server configuration
///
/// # Example
///
/// ```rust,ignore
/// use payments_rest::{create_app_with_config, ServerConfig};
/// use payments_persistence::backends::sqlite::SqliteStore;
///
/// let store = SqliteStore::in_memory()?;
/// store.init_schema()?;
/// let config = ServerConfig {
///     port: 3000,
///     enable_admin: true,
///     ..Default::default()
/// };
/// let app = create_app_with_config(store, config);
/// ```
pub fn create_app_with_config<S>(store: S, config: ServerConfig) -> Router
where
    S: ItemStore + Send + Sync + 'static,
{
    info!(
        backend = store.backend_name(),
        base_url = %config.base_url(),
        admin = config.enable_admin,
        "Creating payments API"
    );

    let state = AppState::new(Arc::new(store), config.clone());
    let cors = config.enable_cors.then(|| build_cors_layer(&config));

    routing::create_routes(state).layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(TimeoutLayer::with_status_code(
                StatusCode::REQUEST_TIMEOUT,
                Duration::from_secs(config.request_timeout),
            ))
            .option_layer(cors),
    )
}

/// Builds the CORS layer from the comma-separated `cors_*` settings.
fn build_cors_layer(config: &ServerConfig) -> CorsLayer {
    let origins = match setting_list(&config.cors_origins) {
        Some(origins) => AllowOrigin::list(origins),
        None => AllowOrigin::any(),
    };
    let methods = match setting_list(&config.cors_methods) {
        Some(methods) => AllowMethods::list(methods),
        None => AllowMethods::any(),
    };
    let headers = match setting_list(&config.cors_headers) {
        Some(headers) => AllowHeaders::list(headers),
        None => AllowHeaders::any(),
    };

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(methods)
        .allow_headers(headers)
}

/// Parses a comma-separated setting. `None` stands for the `*` wildcard;
/// entries that fail to parse are dropped.
fn setting_list<T: FromStr>(raw: &str) -> Option<Vec<T>> {
    let entries: Vec<&str> = raw
        .split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .collect();

    if entries.contains(&"*") {
        return None;
    }

    Some(
        entries
            .into_iter()
            .filter_map(|entry| match entry.parse() {
                Ok(value) => Some(value),
                Err(_) => {
                    warn!(entry, "Ignoring unparsable CORS setting");
                    None
                }
            })
            .collect(),
    )
}

/// Initializes the tracing subscriber for logging.
///
/// This should be called once at application startup. `RUST_LOG` takes
/// precedence over `level`.
pub fn init_logging(level: &str) {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "payments_rest={level},payments_persistence={level},tower_http=debug"
        ))
    });

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{HeaderName, HeaderValue, Method};

    #[test]
    fn test_setting_list_wildcard() {
        assert!(setting_list::<HeaderValue>("*").is_none());
        assert!(setting_list::<HeaderValue>("https://a.example.com, *").is_none());
    }

    #[test]
    fn test_setting_list_parses_entries() {
        let methods: Vec<Method> = setting_list("GET, POST,,DELETE").unwrap();
        assert_eq!(methods, vec![Method::GET, Method::POST, Method::DELETE]);

        let headers: Vec<HeaderName> = setting_list("content-type,bad header").unwrap();
        assert_eq!(headers, vec![HeaderName::from_static("content-type")]);
    }
}

//! Server configuration for the payments REST API.
//!
//! This module provides configuration types for the REST server, supporting
//! both programmatic configuration and environment variable overrides.
//!
//! # Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `PAYMENTS_PORT` | 8080 | Server port |
//! | `PAYMENTS_HOST` | 127.0.0.1 | Host to bind |
//! | `PAYMENTS_LOG_LEVEL` | info | Log level |
//! | `PAYMENTS_REQUEST_TIMEOUT` | 60 | Request timeout (seconds) |
//! | `PAYMENTS_ENABLE_CORS` | false | Enable CORS |
//! | `PAYMENTS_CORS_ORIGINS` | * | Allowed origins |
//! | `PAYMENTS_CORS_METHODS` | GET,POST,PUT,DELETE,OPTIONS | Allowed methods |
//! | `PAYMENTS_CORS_HEADERS` | Accept,Authorization,Content-Type,X-CSRF-Token | Allowed headers |
//! | `PAYMENTS_EXTERNAL_URL` | http://localhost:8080 | URL clients reach the service at |
//! | `PAYMENTS_API_VERSION` | v1 | Path prefix for the payments API |
//! | `PAYMENTS_STORAGE_BACKEND` | sqlite | `sqlite` or `postgres` |
//! | `PAYMENTS_DATABASE_URL` | | SQLite path or PostgreSQL URL |
//! | `PAYMENTS_TABLE_NAME` | payments | Table holding payment items |
//! | `PAYMENTS_ENABLE_ADMIN` | false | Mount `/admin/repo` |
//! | `PAYMENTS_MAX_PAGE_SIZE` | 20 | Largest page a list returns |
//!
//! # Example
//!
//! ```rust
//! use payments_rest::ServerConfig;
//!
//! let config = ServerConfig {
//!     port: 3000,
//!     host: "0.0.0.0".to_string(),
//!     enable_admin: true,
//!     ..Default::default()
//! };
//! assert_eq!(config.base_url(), "http://localhost:8080/v1");
//! ```

use clap::{Parser, ValueEnum};

/// Storage engine selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StorageBackend {
    /// Embedded SQLite (file or `:memory:`).
    Sqlite,
    /// PostgreSQL server.
    Postgres,
}

impl std::fmt::Display for StorageBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageBackend::Sqlite => write!(f, "sqlite"),
            StorageBackend::Postgres => write!(f, "postgres"),
        }
    }
}

/// Server configuration for the payments REST API.
#[derive(Debug, Clone, Parser)]
#[command(name = "payments")]
#[command(about = "Payments RESTful API Server")]
pub struct ServerConfig {
    /// Port to listen on.
    #[arg(short, long, env = "PAYMENTS_PORT", default_value = "8080")]
    pub port: u16,

    /// Host address to bind to.
    #[arg(long, env = "PAYMENTS_HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long, env = "PAYMENTS_LOG_LEVEL", default_value = "info")]
    pub log_level: String,

    /// Request timeout in seconds.
    #[arg(long, env = "PAYMENTS_REQUEST_TIMEOUT", default_value = "60")]
    pub request_timeout: u64,

    /// Enable CORS.
    #[arg(long, env = "PAYMENTS_ENABLE_CORS", default_value = "false")]
    pub enable_cors: bool,

    /// Allowed CORS origins (comma-separated, or * for all).
    #[arg(long, env = "PAYMENTS_CORS_ORIGINS", default_value = "*")]
    pub cors_origins: String,

    /// Allowed CORS methods (comma-separated, or * for all).
    #[arg(
        long,
        env = "PAYMENTS_CORS_METHODS",
        default_value = "GET,POST,PUT,DELETE,OPTIONS"
    )]
    pub cors_methods: String,

    /// Allowed CORS headers (comma-separated, or * for all).
    #[arg(
        long,
        env = "PAYMENTS_CORS_HEADERS",
        default_value = "Accept,Authorization,Content-Type,X-CSRF-Token"
    )]
    pub cors_headers: String,

    /// URL clients use to reach this service (used in response links).
    #[arg(long, env = "PAYMENTS_EXTERNAL_URL", default_value = "http://localhost:8080")]
    pub external_url: String,

    /// API version path segment the payments routes are mounted under.
    #[arg(long, env = "PAYMENTS_API_VERSION", default_value = "v1")]
    pub api_version: String,

    /// Storage backend.
    #[arg(long, env = "PAYMENTS_STORAGE_BACKEND", value_enum, default_value = "sqlite")]
    pub storage_backend: StorageBackend,

    /// Database location: a SQLite path (or `:memory:`) or a PostgreSQL URL.
    #[arg(long, env = "PAYMENTS_DATABASE_URL")]
    pub database_url: Option<String>,

    /// Table holding payment items.
    #[arg(long, env = "PAYMENTS_TABLE_NAME", default_value = "payments")]
    pub table_name: String,

    /// Mount the admin routes (info and wipe).
    #[arg(long, env = "PAYMENTS_ENABLE_ADMIN", default_value = "false")]
    pub enable_admin: bool,

    /// Maximum number of payments returned by one list request.
    #[arg(long, env = "PAYMENTS_MAX_PAGE_SIZE", default_value = "20")]
    pub max_page_size: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 8080,
            host: "127.0.0.1".to_string(),
            log_level: "info".to_string(),
            request_timeout: 60,
            enable_cors: false,
            cors_origins: "*".to_string(),
            cors_methods: "GET,POST,PUT,DELETE,OPTIONS".to_string(),
            cors_headers: "Accept,Authorization,Content-Type,X-CSRF-Token".to_string(),
            external_url: "http://localhost:8080".to_string(),
            api_version: "v1".to_string(),
            storage_backend: StorageBackend::Sqlite,
            database_url: None,
            table_name: "payments".to_string(),
            enable_admin: false,
            max_page_size: 20,
        }
    }
}

impl ServerConfig {
    /// Creates a new ServerConfig from environment variables.
    pub fn from_env() -> Self {
        Self::try_parse_from(["payments"]).unwrap_or_default()
    }

    /// Returns the socket address to bind to.
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Returns the prefix of every payments link: external URL plus API version.
    pub fn base_url(&self) -> String {
        format!(
            "{}/{}",
            self.external_url.trim_end_matches('/'),
            self.api_version
        )
    }

    /// Validates the configuration and returns errors if any.
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if self.port == 0 {
            errors.push("Port cannot be 0".to_string());
        }

        if self.request_timeout == 0 {
            errors.push("Request timeout cannot be 0".to_string());
        }

        if self.max_page_size == 0 {
            errors.push("Max page size cannot be 0".to_string());
        }

        if self.api_version.is_empty()
            || !self
                .api_version
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '.')
        {
            errors.push(format!(
                "API version '{}' must be a single non-empty path segment",
                self.api_version
            ));
        }

        if !(self.external_url.starts_with("http://") || self.external_url.starts_with("https://"))
        {
            errors.push(format!(
                "External URL '{}' must start with http:// or https://",
                self.external_url
            ));
        }

        if self.storage_backend == StorageBackend::Postgres && self.database_url.is_none() {
            errors.push("The postgres backend requires a database URL".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Creates a configuration suitable for testing.
    ///
    /// This uses ephemeral port 0, an in-memory database and enables the
    /// admin routes.
    pub fn for_testing() -> Self {
        Self {
            port: 0,
            host: "127.0.0.1".to_string(),
            log_level: "debug".to_string(),
            request_timeout: 5,
            enable_cors: false,
            cors_origins: "*".to_string(),
            cors_methods: "*".to_string(),
            cors_headers: "*".to_string(),
            external_url: "http://localhost:8080".to_string(),
            api_version: "v1".to_string(),
            storage_backend: StorageBackend::Sqlite,
            database_url: Some(":memory:".to_string()),
            table_name: "payments".to_string(),
            enable_admin: true,
            max_page_size: 20,
        }
    }
}

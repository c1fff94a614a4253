//! Database backend implementations.
//!
//! This module contains implementations of [`ItemStore`](crate::core::ItemStore)
//! for SQL databases. Each backend is gated behind a feature flag.
//!
//! # Available Backends
//!
//! | Backend | Feature | Description |
//! |---------|---------|-------------|
//! | SQLite | `sqlite` | Embedded database, in-memory or file-based |
//! | PostgreSQL | `postgres` | Pooled client/server RDBMS |
//!
//! # Example
//!
//! ```no_run
//! # #[cfg(feature = "sqlite")]
//! use payments_persistence::backends::sqlite::SqliteStore;
//!
//! # #[cfg(feature = "sqlite")]
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! // Create an in-memory SQLite store
//! let store = SqliteStore::in_memory()?;
//!
//! // Or use a file-based database
//! let store = SqliteStore::open("./data/payments.db")?;
//! # Ok(())
//! # }
//! ```

#[cfg(feature = "sqlite")]
pub mod sqlite;

#[cfg(feature = "postgres")]
pub mod postgres;

//! Payments Persistence Layer
//!
//! This crate provides a versioned item store for the payments service. Every
//! item carries a version number used as an optimistic-lock token, and deletes
//! are soft: the row is tombstoned and its id stays reserved.
//!
//! # Backend Features
//!
//! Enable backends with feature flags in `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! payments-persistence = { version = "0.1", features = ["postgres"] }
//! ```
//!
//! Available backend features:
//! - `sqlite` (default) - SQLite with in-memory and file modes
//! - `postgres` - PostgreSQL via `deadpool-postgres`
//!
//! # Architecture
//!
//! - [`types`] - The stored item and store statistics
//! - [`error`] - Error types for all operations
//! - [`core`] - The [`ItemStore`](core::ItemStore) trait and shared SQL rendering
//! - [`config`] - Per-instance store configuration
//! - [`backends`] - Backend implementations (SQLite, PostgreSQL)
//!
//! # Quick Start
//!
//! ```no_run
//! # #[cfg(feature = "sqlite")]
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! use payments_persistence::backends::sqlite::SqliteStore;
//! use payments_persistence::core::ItemStore;
//! use payments_persistence::types::StoredItem;
//!
//! let store = SqliteStore::in_memory()?;
//! store.init_schema()?;
//!
//! let created = store
//!     .create(&StoredItem::new("p1", "org1", br#"{"amount":"10.00"}"#.to_vec()))
//!     .await?;
//! assert_eq!(created.version, 0);
//!
//! let updated = store.update(&created).await?;
//! assert_eq!(updated.version, 1);
//! # Ok(())
//! # }
//! ```
//!
//! # Optimistic Locking
//!
//! Updates and deletes are a single conditional statement keyed on
//! `(id, version, deleted = false)`. When no row matches, the call fails with
//! [`ConflictError::VersionMismatch`](error::ConflictError::VersionMismatch)
//! and nothing is written.

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod backends;
pub mod config;
pub mod core;
pub mod error;
pub mod types;

pub use config::StoreConfig;
pub use error::{StorageError, StorageResult};
pub use types::{StoreInfo, StoredItem};

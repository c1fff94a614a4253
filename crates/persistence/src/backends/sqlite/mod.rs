//! SQLite backend implementation.
//!
//! Supports in-memory databases (for tests) and file-based databases (for
//! development and small deployments). Connections come from an `r2d2` pool;
//! every pooled connection gets the configured busy timeout, and file
//! databases run in WAL mode unless disabled.
//!
//! An in-memory database exists per connection, so in-memory stores use a
//! pool of exactly one connection.
//!
//! # Example
//!
//! ```no_run
//! use payments_persistence::backends::sqlite::SqliteStore;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let store = SqliteStore::in_memory()?;
//! store.init_schema()?;
//! # Ok(())
//! # }
//! ```
//!
//! # Schema
//!
//! ```sql
//! CREATE TABLE payments (
//!     id TEXT PRIMARY KEY,
//!     version BIGINT NOT NULL,
//!     organisation TEXT NOT NULL,
//!     attributes BLOB NOT NULL,
//!     deleted BOOLEAN NOT NULL DEFAULT 0
//! );
//! ```

mod backend;
mod schema;
mod storage;

pub use backend::{SqliteStore, SqliteStoreConfig};

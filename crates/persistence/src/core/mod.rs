//! Core storage traits and abstractions.
//!
//! - [`ItemStore`] - CRUD over versioned items with optimistic locking
//! - [`BackendKind`] - Identifies the storage engine behind a store
//! - [`SqlDialect`] and [`Statements`] - Statement templates shared by the
//!   SQL backends, rendered once per store instance
//!
//! # Example: Implementing a Store
//!
//! ```ignore
//! use async_trait::async_trait;
//! use payments_persistence::core::ItemStore;
//! use payments_persistence::error::StorageResult;
//! use payments_persistence::types::StoredItem;
//!
//! struct MyStore {
//!     // ... backend-specific fields
//! }
//!
//! #[async_trait]
//! impl ItemStore for MyStore {
//!     fn backend_name(&self) -> &'static str {
//!         "my-store"
//!     }
//!
//!     async fn fetch(&self, id: &str) -> StorageResult<StoredItem> {
//!         // Implementation...
//!         todo!()
//!     }
//!
//!     // ... implement other required methods
//! }
//! ```

pub mod backend;
pub mod sql;
pub mod store;

pub use backend::BackendKind;
pub use sql::{
    PostgresDialect, SqlDialect, SqliteDialect, Statements, expect_single_row, sql_window,
};
pub use store::ItemStore;

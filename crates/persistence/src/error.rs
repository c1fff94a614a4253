//! Error types for the persistence layer.
//!
//! Store errors are classified by kind so callers can branch on them without
//! knowing which storage engine produced them:
//!
//! - [`StorageError::NotFound`] - no matching non-deleted item
//! - [`StorageError::Conflict`] - duplicate id or version mismatch
//! - [`StorageError::Backend`] - connectivity, query or integrity failures
//! - [`StorageError::Config`] - invalid store configuration

// Error enum variant fields are self-documenting via their #[error(...)] messages
#![allow(missing_docs)]

use thiserror::Error;

/// The primary error type for all store operations.
#[derive(Error, Debug)]
pub enum StorageError {
    /// No non-deleted item exists with the given id.
    #[error("item not found: {id}")]
    NotFound { id: String },

    /// Concurrency and uniqueness conflicts
    #[error(transparent)]
    Conflict(#[from] ConflictError),

    /// Backend-specific errors
    #[error(transparent)]
    Backend(#[from] BackendError),

    /// Store configuration errors
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl StorageError {
    /// Returns true if this error denotes a conflict (duplicate id or stale version).
    pub fn is_conflict(&self) -> bool {
        matches!(self, StorageError::Conflict(_))
    }

    /// Returns true if this error denotes an item that was not found.
    pub fn is_not_found(&self) -> bool {
        matches!(self, StorageError::NotFound { .. })
    }
}

/// Errors raised when a write cannot be applied because of the current state
/// of the stored item.
#[derive(Error, Debug)]
pub enum ConflictError {
    /// An item (deleted or not) already occupies this id.
    #[error("item already exists: {id}")]
    AlreadyExists { id: String },

    /// No non-deleted item with this id is at the expected version.
    #[error("version conflict on {id}: expected version {expected_version} is not current")]
    VersionMismatch { id: String, expected_version: i64 },
}

/// Errors originating from the database backend.
#[derive(Error, Debug)]
pub enum BackendError {
    /// The backend is currently unavailable.
    #[error("backend unavailable: {backend_name}: {message}")]
    Unavailable {
        backend_name: String,
        message: String,
    },

    /// Connection to the backend failed.
    #[error("connection failed to {backend_name}: {message}")]
    ConnectionFailed {
        backend_name: String,
        message: String,
    },

    /// Schema migration error.
    #[error("schema migration failed: {message}")]
    MigrationError { message: String },

    /// Internal backend error.
    #[error("internal error in {backend_name}: {message}")]
    Internal {
        backend_name: String,
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// A conditional mutation matched more rows than the id uniqueness allows.
    #[error("{operation} on {id} affected {count} rows, expected at most 1")]
    UnexpectedRowCount {
        operation: &'static str,
        id: String,
        count: u64,
    },
}

/// Errors in store configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The configured table name is not a plain SQL identifier.
    #[error("invalid table name '{table}': {message}")]
    InvalidTableName { table: String, message: String },
}

/// Result type alias for store operations.
pub type StorageResult<T> = Result<T, StorageError>;

#[cfg(feature = "sqlite")]
impl From<rusqlite::Error> for StorageError {
    fn from(err: rusqlite::Error) -> Self {
        StorageError::Backend(BackendError::Internal {
            backend_name: "sqlite".to_string(),
            message: err.to_string(),
            source: Some(Box::new(err)),
        })
    }
}

#[cfg(feature = "sqlite")]
impl From<r2d2::Error> for StorageError {
    fn from(err: r2d2::Error) -> Self {
        StorageError::Backend(BackendError::ConnectionFailed {
            backend_name: "sqlite".to_string(),
            message: err.to_string(),
        })
    }
}

#[cfg(feature = "postgres")]
impl From<tokio_postgres::Error> for StorageError {
    fn from(err: tokio_postgres::Error) -> Self {
        StorageError::Backend(BackendError::Internal {
            backend_name: "postgres".to_string(),
            message: err.to_string(),
            source: Some(Box::new(err)),
        })
    }
}

#[cfg(feature = "postgres")]
impl From<deadpool_postgres::PoolError> for StorageError {
    fn from(err: deadpool_postgres::PoolError) -> Self {
        StorageError::Backend(BackendError::ConnectionFailed {
            backend_name: "postgres".to_string(),
            message: err.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_display() {
        let err = StorageError::NotFound {
            id: "p1".to_string(),
        };
        assert_eq!(err.to_string(), "item not found: p1");
    }

    #[test]
    fn test_version_mismatch_display() {
        let err = ConflictError::VersionMismatch {
            id: "p1".to_string(),
            expected_version: 3,
        };
        assert_eq!(
            err.to_string(),
            "version conflict on p1: expected version 3 is not current"
        );
    }

    #[test]
    fn test_classification() {
        let conflict: StorageError = ConflictError::AlreadyExists {
            id: "p1".to_string(),
        }
        .into();
        assert!(conflict.is_conflict());
        assert!(!conflict.is_not_found());

        let missing = StorageError::NotFound {
            id: "p1".to_string(),
        };
        assert!(missing.is_not_found());
        assert!(!missing.is_conflict());

        let backend: StorageError = BackendError::UnexpectedRowCount {
            operation: "update",
            id: "p1".to_string(),
            count: 2,
        }
        .into();
        assert!(!backend.is_conflict());
        assert!(!backend.is_not_found());
    }

    #[test]
    fn test_unexpected_row_count_display() {
        let err = BackendError::UnexpectedRowCount {
            operation: "delete",
            id: "p9".to_string(),
            count: 2,
        };
        assert!(err.to_string().contains("affected 2 rows"));
    }
}

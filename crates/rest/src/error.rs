//! Error types for the payments REST API.
//!
//! Every error renders as an empty JSON object with the matching status code;
//! the cause is logged, never sent to the client.
//!
//! # Error Mapping
//!
//! | Source | HTTP Status |
//! |--------|-------------|
//! | Malformed body, failed validation, bad query | 400 |
//! | `StorageError::NotFound` | 404 |
//! | `StorageError::Conflict` | 409 |
//! | Other storage errors, translation errors | 500 |

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use payments_persistence::core::ItemStore;
use payments_persistence::error::StorageError;
use std::fmt;

use crate::model::ValidationError;
use crate::translator::TranslationError;

/// REST API error type.
#[derive(Debug)]
pub enum RestError {
    /// The request was malformed or failed validation (400).
    BadRequest {
        /// What was wrong with the request.
        message: String,
    },

    /// No payment with this id exists (404).
    NotFound {
        /// The requested payment id.
        id: String,
    },

    /// Duplicate id or stale version (409).
    Conflict {
        /// Conflict details.
        message: String,
    },

    /// Storage or translation failure (500).
    InternalError {
        /// The full cause chain.
        message: String,
    },
}

impl RestError {
    /// Builds a 400 error.
    pub fn bad_request(message: impl Into<String>) -> Self {
        RestError::BadRequest {
            message: message.into(),
        }
    }

    /// Builds the error for a failed mutation of an item known to exist.
    ///
    /// Anything `store` classifies as a conflict or a missing item is a
    /// concurrent modification and maps to 409; other errors map as usual.
    pub fn conflict_from<S>(store: &S, err: StorageError) -> Self
    where
        S: ItemStore + ?Sized,
    {
        if store.is_conflict(&err) || store.is_not_found(&err) {
            RestError::Conflict {
                message: err.to_string(),
            }
        } else {
            err.into()
        }
    }

    /// Returns the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            RestError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            RestError::NotFound { .. } => StatusCode::NOT_FOUND,
            RestError::Conflict { .. } => StatusCode::CONFLICT,
            RestError::InternalError { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl fmt::Display for RestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RestError::BadRequest { message } => write!(f, "Bad request: {}", message),
            RestError::NotFound { id } => write!(f, "Payment not found: {}", id),
            RestError::Conflict { message } => write!(f, "Conflict: {}", message),
            RestError::InternalError { message } => write!(f, "Internal error: {}", message),
        }
    }
}

impl std::error::Error for RestError {}

impl IntoResponse for RestError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status.is_server_error() {
            tracing::error!(status = status.as_u16(), error = %self, "Request failed");
        } else {
            tracing::debug!(status = status.as_u16(), error = %self, "Request rejected");
        }

        (status, Json(serde_json::json!({}))).into_response()
    }
}

/// Joins an error and all of its sources into one line.
fn cause_chain(err: &dyn std::error::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let text = cause.to_string();
        if !message.contains(&text) {
            message.push_str(": ");
            message.push_str(&text);
        }
        source = cause.source();
    }
    message
}

impl From<StorageError> for RestError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::NotFound { id } => RestError::NotFound { id },
            StorageError::Conflict(e) => RestError::Conflict {
                message: e.to_string(),
            },
            StorageError::Backend(_) | StorageError::Config(_) => RestError::InternalError {
                message: cause_chain(&err),
            },
        }
    }
}

impl From<TranslationError> for RestError {
    fn from(err: TranslationError) -> Self {
        RestError::InternalError {
            message: cause_chain(&err),
        }
    }
}

impl From<ValidationError> for RestError {
    fn from(err: ValidationError) -> Self {
        RestError::BadRequest {
            message: err.to_string(),
        }
    }
}

/// Result type for REST operations.
pub type RestResult<T> = Result<T, RestError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::tests::MockStore;
    use async_trait::async_trait;
    use payments_persistence::error::{BackendError, ConflictError};
    use payments_persistence::{StorageResult, StoreInfo, StoredItem};

    #[test]
    fn test_storage_not_found_is_404() {
        let err: RestError = StorageError::NotFound {
            id: "p1".to_string(),
        }
        .into();
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_storage_conflict_is_409() {
        let err: RestError = StorageError::from(ConflictError::AlreadyExists {
            id: "p1".to_string(),
        })
        .into();
        assert_eq!(err.status_code(), StatusCode::CONFLICT);
    }

    #[test]
    fn test_backend_is_500_with_chain() {
        let source = std::io::Error::other("disk on fire");
        let err: RestError = StorageError::from(BackendError::Internal {
            backend_name: "sqlite".to_string(),
            message: "Failed to insert item".to_string(),
            source: Some(Box::new(source)),
        })
        .into();
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(err.to_string().contains("disk on fire"));
    }

    #[test]
    fn test_conflict_from_maps_not_found() {
        let store = MockStore { healthy: true };

        let err = RestError::conflict_from(
            &store,
            StorageError::NotFound {
                id: "p1".to_string(),
            },
        );
        assert_eq!(err.status_code(), StatusCode::CONFLICT);

        let err = RestError::conflict_from(
            &store,
            StorageError::from(ConflictError::VersionMismatch {
                id: "p1".to_string(),
                expected_version: 2,
            }),
        );
        assert_eq!(err.status_code(), StatusCode::CONFLICT);

        let err = RestError::conflict_from(
            &store,
            StorageError::from(BackendError::Unavailable {
                backend_name: "sqlite".to_string(),
                message: "down".to_string(),
            }),
        );
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    /// Treats every error as a plain backend failure.
    struct NoConflictStore(MockStore);

    #[async_trait]
    impl ItemStore for NoConflictStore {
        fn backend_name(&self) -> &'static str {
            self.0.backend_name()
        }

        fn description(&self) -> String {
            self.0.description()
        }

        async fn list(&self, offset: usize, limit: usize) -> StorageResult<Vec<StoredItem>> {
            self.0.list(offset, limit).await
        }

        async fn fetch(&self, id: &str) -> StorageResult<StoredItem> {
            self.0.fetch(id).await
        }

        async fn create(&self, item: &StoredItem) -> StorageResult<StoredItem> {
            self.0.create(item).await
        }

        async fn update(&self, item: &StoredItem) -> StorageResult<StoredItem> {
            self.0.update(item).await
        }

        async fn delete(&self, item: &StoredItem) -> StorageResult<()> {
            self.0.delete(item).await
        }

        async fn delete_all(&self) -> StorageResult<u64> {
            self.0.delete_all().await
        }

        async fn info(&self) -> StorageResult<StoreInfo> {
            self.0.info().await
        }

        async fn check(&self) -> StorageResult<()> {
            self.0.check().await
        }

        fn is_conflict(&self, _err: &StorageError) -> bool {
            false
        }

        fn is_not_found(&self, _err: &StorageError) -> bool {
            false
        }
    }

    #[test]
    fn test_conflict_from_asks_the_store() {
        let store = NoConflictStore(MockStore { healthy: true });
        let err = RestError::conflict_from(
            &store,
            StorageError::NotFound {
                id: "p1".to_string(),
            },
        );
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_validation_is_400() {
        let err: RestError = ValidationError::MissingOrganisation.into();
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_response_body_is_empty_object() {
        let response = RestError::bad_request("nope").into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(&body[..], b"{}");
    }
}

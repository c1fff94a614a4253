//! Application state for the payments REST API.
//!
//! This module defines the shared application state that is available to all
//! request handlers: the item store, configuration, and the link builder.

use std::sync::Arc;

use payments_persistence::core::ItemStore;

use crate::config::ServerConfig;
use crate::responses::LinkBuilder;

/// Shared application state for the REST API.
///
/// # Type Parameters
///
/// * `S` - The store type (must implement [`ItemStore`])
///
/// # Example
///
/// ```rust,ignore
/// use payments_rest::{AppState, ServerConfig};
/// use payments_persistence::backends::sqlite::SqliteStore;
/// use std::sync::Arc;
///
/// let store = SqliteStore::in_memory()?;
/// let state = AppState::new(Arc::new(store), ServerConfig::default());
/// ```
pub struct AppState<S> {
    /// The item store.
    store: Arc<S>,

    /// Server configuration.
    config: Arc<ServerConfig>,

    /// Absolute link builder for payment resources.
    links: Arc<LinkBuilder>,
}

// Manually implement Clone since S is wrapped in Arc and doesn't need to be Clone
impl<S> Clone for AppState<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            config: Arc::clone(&self.config),
            links: Arc::clone(&self.links),
        }
    }
}

impl<S: ItemStore> AppState<S> {
    /// Creates a new AppState with the given store and configuration.
    pub fn new(store: Arc<S>, config: ServerConfig) -> Self {
        let links = LinkBuilder::new(config.base_url());
        Self {
            store,
            config: Arc::new(config),
            links: Arc::new(links),
        }
    }

    /// Returns a reference to the store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Returns a clone of the store Arc.
    pub fn store_arc(&self) -> Arc<S> {
        Arc::clone(&self.store)
    }

    /// Returns a reference to the server configuration.
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Returns the link builder.
    pub fn links(&self) -> &LinkBuilder {
        &self.links
    }

    /// Returns the maximum number of payments a list returns.
    pub fn max_page_size(&self) -> usize {
        self.config.max_page_size
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use async_trait::async_trait;
    use payments_persistence::error::{BackendError, StorageError, StorageResult};
    use payments_persistence::{StoreInfo, StoredItem};

    /// A store whose every call fails with a backend error, or that reports
    /// itself healthy but empty.
    pub(crate) struct MockStore {
        pub(crate) healthy: bool,
    }

    fn unavailable() -> StorageError {
        StorageError::Backend(BackendError::Unavailable {
            backend_name: "mock".to_string(),
            message: "mock store is down".to_string(),
        })
    }

    #[async_trait]
    impl ItemStore for MockStore {
        fn backend_name(&self) -> &'static str {
            "mock"
        }

        fn description(&self) -> String {
            "mock store".to_string()
        }

        async fn list(&self, _offset: usize, _limit: usize) -> StorageResult<Vec<StoredItem>> {
            Err(unavailable())
        }

        async fn fetch(&self, id: &str) -> StorageResult<StoredItem> {
            if self.healthy {
                Err(StorageError::NotFound { id: id.to_string() })
            } else {
                Err(unavailable())
            }
        }

        async fn create(&self, _item: &StoredItem) -> StorageResult<StoredItem> {
            Err(unavailable())
        }

        async fn update(&self, _item: &StoredItem) -> StorageResult<StoredItem> {
            Err(unavailable())
        }

        async fn delete(&self, _item: &StoredItem) -> StorageResult<()> {
            Err(unavailable())
        }

        async fn delete_all(&self) -> StorageResult<u64> {
            Err(unavailable())
        }

        async fn info(&self) -> StorageResult<StoreInfo> {
            if self.healthy {
                Ok(StoreInfo { count: 0 })
            } else {
                Err(unavailable())
            }
        }

        async fn check(&self) -> StorageResult<()> {
            if self.healthy { Ok(()) } else { Err(unavailable()) }
        }
    }

    #[test]
    fn test_app_state_creation() {
        let state = AppState::new(Arc::new(MockStore { healthy: true }), ServerConfig::default());
        assert_eq!(state.store().backend_name(), "mock");
        assert_eq!(state.max_page_size(), 20);
        assert_eq!(
            state.links().payment("p1"),
            "http://localhost:8080/v1/payments/p1"
        );
    }

    #[test]
    fn test_app_state_clone_shares_store() {
        let state = AppState::new(Arc::new(MockStore { healthy: true }), ServerConfig::default());
        let cloned = state.clone();
        assert!(Arc::ptr_eq(&state.store_arc(), &cloned.store_arc()));
    }
}

//! The item store trait.

use async_trait::async_trait;

use crate::error::{StorageError, StorageResult};
use crate::types::{StoreInfo, StoredItem};

/// CRUD over versioned items with optimistic locking and soft delete.
///
/// Every operation maps to one bounded statement. The version comparison for
/// [`update`](Self::update) and [`delete`](Self::delete) happens inside the
/// mutating statement itself, so two writers racing on the same version can
/// never both succeed.
///
/// # Visibility
///
/// Deleted items are invisible to [`list`](Self::list), [`fetch`](Self::fetch)
/// and [`info`](Self::info), but their ids stay reserved: creating an item with
/// the id of a deleted one fails with a conflict.
///
/// # Example
///
/// ```ignore
/// use payments_persistence::core::ItemStore;
/// use payments_persistence::types::StoredItem;
///
/// async fn bump<S: ItemStore>(store: &S, id: &str) -> StorageResult<i64> {
///     let current = store.fetch(id).await?;
///     let updated = store.update(&current).await?;
///     Ok(updated.version)
/// }
/// ```
#[async_trait]
pub trait ItemStore: Send + Sync {
    /// Returns a human-readable name for this backend.
    fn backend_name(&self) -> &'static str;

    /// Returns a description of this store suitable for startup logs.
    fn description(&self) -> String;

    /// Lists up to `limit` non-deleted items starting at `offset`.
    ///
    /// Ordering is by id, but callers should not rely on it across
    /// concurrent writes.
    async fn list(&self, offset: usize, limit: usize) -> StorageResult<Vec<StoredItem>>;

    /// Reads the non-deleted item with this id.
    ///
    /// # Errors
    ///
    /// * `StorageError::NotFound` - no such item, or it was deleted
    async fn fetch(&self, id: &str) -> StorageResult<StoredItem>;

    /// Inserts a new item. The stored version is always 0 regardless of
    /// `item.version`.
    ///
    /// # Errors
    ///
    /// * `StorageError::Conflict(AlreadyExists)` - the id is taken, including
    ///   by a deleted item
    async fn create(&self, item: &StoredItem) -> StorageResult<StoredItem>;

    /// Replaces organisation and attributes of the item whose current version
    /// equals `item.version`, bumping the version by one.
    ///
    /// # Returns
    ///
    /// The stored item at its new version.
    ///
    /// # Errors
    ///
    /// * `StorageError::Conflict(VersionMismatch)` - no non-deleted item with
    ///   this id is at `item.version`
    /// * `StorageError::Backend(UnexpectedRowCount)` - more than one row matched
    async fn update(&self, item: &StoredItem) -> StorageResult<StoredItem>;

    /// Tombstones the item whose current version equals `item.version`.
    ///
    /// # Errors
    ///
    /// Same as [`update`](Self::update).
    async fn delete(&self, item: &StoredItem) -> StorageResult<()>;

    /// Physically removes every row, deleted or not. Returns the number of
    /// rows removed.
    async fn delete_all(&self) -> StorageResult<u64>;

    /// Returns statistics over non-deleted items.
    async fn info(&self) -> StorageResult<StoreInfo>;

    /// Checks that the backend is reachable.
    async fn check(&self) -> StorageResult<()>;

    /// Returns true if `err` is a duplicate-id or stale-version conflict.
    fn is_conflict(&self, err: &StorageError) -> bool {
        err.is_conflict()
    }

    /// Returns true if `err` means the item does not exist.
    fn is_not_found(&self, err: &StorageError) -> bool {
        err.is_not_found()
    }
}

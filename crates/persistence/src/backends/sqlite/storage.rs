//! ItemStore implementation for SQLite.

use async_trait::async_trait;
use rusqlite::{ErrorCode, OptionalExtension, Row, ffi, params};

use crate::core::{BackendKind, ItemStore, expect_single_row, sql_window};
use crate::error::{BackendError, ConflictError, StorageError, StorageResult};
use crate::types::{StoreInfo, StoredItem};

use super::SqliteStore;

fn internal_error(message: String) -> StorageError {
    StorageError::Backend(BackendError::Internal {
        backend_name: "sqlite".to_string(),
        message,
        source: None,
    })
}

fn row_to_item(row: &Row<'_>) -> rusqlite::Result<StoredItem> {
    Ok(StoredItem {
        id: row.get(0)?,
        version: row.get(1)?,
        organisation: row.get(2)?,
        attributes: row.get(3)?,
    })
}

/// True for primary-key and unique constraint violations only; NOT NULL and
/// CHECK failures stay backend errors.
fn is_unique_violation(err: &rusqlite::Error) -> bool {
    match err {
        rusqlite::Error::SqliteFailure(e, _) => {
            e.code == ErrorCode::ConstraintViolation
                && (e.extended_code == ffi::SQLITE_CONSTRAINT_PRIMARYKEY
                    || e.extended_code == ffi::SQLITE_CONSTRAINT_UNIQUE)
        }
        _ => false,
    }
}

#[async_trait]
impl ItemStore for SqliteStore {
    fn backend_name(&self) -> &'static str {
        BackendKind::Sqlite.name()
    }

    fn description(&self) -> String {
        format!(
            "SQLite store at {} (table {})",
            self.location(),
            self.store_config().table_name
        )
    }

    async fn list(&self, offset: usize, limit: usize) -> StorageResult<Vec<StoredItem>> {
        let Some((offset, limit)) = sql_window(offset, limit) else {
            return Ok(Vec::new());
        };

        let conn = self.get_connection()?;

        let mut stmt = conn
            .prepare_cached(&self.statements.list)
            .map_err(|e| internal_error(format!("Failed to prepare list: {}", e)))?;

        let items = stmt
            .query_map(params![limit, offset], row_to_item)
            .map_err(|e| internal_error(format!("Failed to list items: {}", e)))?
            .collect::<rusqlite::Result<Vec<_>>>()
            .map_err(|e| internal_error(format!("Failed to read item row: {}", e)))?;

        Ok(items)
    }

    async fn fetch(&self, id: &str) -> StorageResult<StoredItem> {
        let conn = self.get_connection()?;

        conn.query_row(&self.statements.fetch, params![id], row_to_item)
            .optional()
            .map_err(|e| internal_error(format!("Failed to fetch item: {}", e)))?
            .ok_or_else(|| StorageError::NotFound { id: id.to_string() })
    }

    async fn create(&self, item: &StoredItem) -> StorageResult<StoredItem> {
        let conn = self.get_connection()?;

        conn.execute(
            &self.statements.create,
            params![item.id, item.organisation, item.attributes],
        )
        .map_err(|e| {
            if is_unique_violation(&e) {
                StorageError::Conflict(ConflictError::AlreadyExists {
                    id: item.id.clone(),
                })
            } else {
                internal_error(format!("Failed to insert item: {}", e))
            }
        })?;

        tracing::debug!(id = %item.id, "Created item");

        Ok(StoredItem {
            version: 0,
            ..item.clone()
        })
    }

    async fn update(&self, item: &StoredItem) -> StorageResult<StoredItem> {
        let conn = self.get_connection()?;

        let mut stmt = conn
            .prepare_cached(&self.statements.update)
            .map_err(|e| internal_error(format!("Failed to prepare update: {}", e)))?;

        let mut updated = stmt
            .query_map(
                params![item.attributes, item.organisation, item.id, item.version],
                row_to_item,
            )
            .map_err(|e| internal_error(format!("Failed to update item: {}", e)))?
            .collect::<rusqlite::Result<Vec<_>>>()
            .map_err(|e| internal_error(format!("Failed to read updated row: {}", e)))?;

        expect_single_row("update", &item.id, item.version, updated.len() as u64)?;

        let stored = updated.remove(0);
        tracing::debug!(id = %stored.id, version = stored.version, "Updated item");
        Ok(stored)
    }

    async fn delete(&self, item: &StoredItem) -> StorageResult<()> {
        let conn = self.get_connection()?;

        let affected = conn
            .execute(&self.statements.delete_one, params![item.id, item.version])
            .map_err(|e| internal_error(format!("Failed to delete item: {}", e)))?;

        expect_single_row("delete", &item.id, item.version, affected as u64)?;

        tracing::debug!(id = %item.id, version = item.version, "Deleted item");
        Ok(())
    }

    async fn delete_all(&self) -> StorageResult<u64> {
        let conn = self.get_connection()?;

        let removed = conn
            .execute(&self.statements.delete_all, [])
            .map_err(|e| internal_error(format!("Failed to wipe items: {}", e)))?;

        tracing::warn!(removed, "Removed all items");
        Ok(removed as u64)
    }

    async fn info(&self) -> StorageResult<StoreInfo> {
        let conn = self.get_connection()?;

        let count: i64 = conn
            .query_row(&self.statements.count, [], |row| row.get(0))
            .map_err(|e| internal_error(format!("Failed to count items: {}", e)))?;

        Ok(StoreInfo {
            count: count as u64,
        })
    }

    async fn check(&self) -> StorageResult<()> {
        let conn = self.get_connection().map_err(|e| {
            StorageError::Backend(BackendError::Unavailable {
                backend_name: "sqlite".to_string(),
                message: e.to_string(),
            })
        })?;

        conn.query_row("SELECT 1", [], |row| row.get::<_, i32>(0))
            .map_err(|e| {
                StorageError::Backend(BackendError::Unavailable {
                    backend_name: "sqlite".to_string(),
                    message: format!("Health check query failed: {}", e),
                })
            })?;

        Ok(())
    }
}

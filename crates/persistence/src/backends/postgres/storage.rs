//! ItemStore implementation for PostgreSQL.

use async_trait::async_trait;
use tokio_postgres::Row;
use tokio_postgres::error::SqlState;

use crate::core::{BackendKind, ItemStore, expect_single_row, sql_window};
use crate::error::{BackendError, ConflictError, StorageError, StorageResult};
use crate::types::{StoreInfo, StoredItem};

use super::PostgresStore;

fn internal_error(message: String, source: tokio_postgres::Error) -> StorageError {
    StorageError::Backend(BackendError::Internal {
        backend_name: "postgres".to_string(),
        message,
        source: Some(Box::new(source)),
    })
}

fn row_to_item(row: &Row) -> Result<StoredItem, tokio_postgres::Error> {
    Ok(StoredItem {
        id: row.try_get(0)?,
        version: row.try_get(1)?,
        organisation: row.try_get(2)?,
        attributes: row.try_get(3)?,
    })
}

#[async_trait]
impl ItemStore for PostgresStore {
    fn backend_name(&self) -> &'static str {
        BackendKind::Postgres.name()
    }

    fn description(&self) -> String {
        format!(
            "PostgreSQL store at {}:{}/{} (table {})",
            self.config().host,
            self.config().port,
            self.config().dbname,
            self.store_config().table_name
        )
    }

    async fn list(&self, offset: usize, limit: usize) -> StorageResult<Vec<StoredItem>> {
        let Some((offset, limit)) = sql_window(offset, limit) else {
            return Ok(Vec::new());
        };

        let client = self.get_client().await?;

        let rows = client
            .query(&self.statements.list, &[&limit, &offset])
            .await
            .map_err(|e| internal_error("Failed to list items".to_string(), e))?;

        rows.iter()
            .map(row_to_item)
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| internal_error("Failed to read item row".to_string(), e))
    }

    async fn fetch(&self, id: &str) -> StorageResult<StoredItem> {
        let client = self.get_client().await?;

        let row = client
            .query_opt(&self.statements.fetch, &[&id])
            .await
            .map_err(|e| internal_error("Failed to fetch item".to_string(), e))?
            .ok_or_else(|| StorageError::NotFound { id: id.to_string() })?;

        row_to_item(&row).map_err(|e| internal_error("Failed to read item row".to_string(), e))
    }

    async fn create(&self, item: &StoredItem) -> StorageResult<StoredItem> {
        let client = self.get_client().await?;

        client
            .execute(
                &self.statements.create,
                &[&item.id, &item.organisation, &item.attributes],
            )
            .await
            .map_err(|e| {
                if e.code() == Some(&SqlState::UNIQUE_VIOLATION) {
                    StorageError::Conflict(ConflictError::AlreadyExists {
                        id: item.id.clone(),
                    })
                } else {
                    internal_error("Failed to insert item".to_string(), e)
                }
            })?;

        tracing::debug!(id = %item.id, "Created item");

        Ok(StoredItem {
            version: 0,
            ..item.clone()
        })
    }

    async fn update(&self, item: &StoredItem) -> StorageResult<StoredItem> {
        let client = self.get_client().await?;

        let rows = client
            .query(
                &self.statements.update,
                &[&item.attributes, &item.organisation, &item.id, &item.version],
            )
            .await
            .map_err(|e| internal_error("Failed to update item".to_string(), e))?;

        expect_single_row("update", &item.id, item.version, rows.len() as u64)?;

        let stored = row_to_item(&rows[0])
            .map_err(|e| internal_error("Failed to read updated row".to_string(), e))?;
        tracing::debug!(id = %stored.id, version = stored.version, "Updated item");
        Ok(stored)
    }

    async fn delete(&self, item: &StoredItem) -> StorageResult<()> {
        let client = self.get_client().await?;

        let affected = client
            .execute(&self.statements.delete_one, &[&item.id, &item.version])
            .await
            .map_err(|e| internal_error("Failed to delete item".to_string(), e))?;

        expect_single_row("delete", &item.id, item.version, affected)?;

        tracing::debug!(id = %item.id, version = item.version, "Deleted item");
        Ok(())
    }

    async fn delete_all(&self) -> StorageResult<u64> {
        let client = self.get_client().await?;

        let removed = client
            .execute(&self.statements.delete_all, &[])
            .await
            .map_err(|e| internal_error("Failed to wipe items".to_string(), e))?;

        tracing::warn!(removed, "Removed all items");
        Ok(removed)
    }

    async fn info(&self) -> StorageResult<StoreInfo> {
        let client = self.get_client().await?;

        let row = client
            .query_one(&self.statements.count, &[])
            .await
            .map_err(|e| internal_error("Failed to count items".to_string(), e))?;

        let count: i64 = row
            .try_get(0)
            .map_err(|e| internal_error("Failed to read count".to_string(), e))?;

        Ok(StoreInfo {
            count: count as u64,
        })
    }

    async fn check(&self) -> StorageResult<()> {
        let client = self.get_client().await.map_err(|e| {
            StorageError::Backend(BackendError::Unavailable {
                backend_name: "postgres".to_string(),
                message: e.to_string(),
            })
        })?;

        client.query_one("SELECT 1", &[]).await.map_err(|e| {
            StorageError::Backend(BackendError::Unavailable {
                backend_name: "postgres".to_string(),
                message: format!("Health check query failed: {}", e),
            })
        })?;

        Ok(())
    }
}

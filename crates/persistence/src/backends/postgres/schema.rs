//! PostgreSQL schema definitions and migrations.

use crate::config::StoreConfig;
use crate::core::Statements;
use crate::error::{BackendError, StorageError, StorageResult};

/// Current schema version.
pub const SCHEMA_VERSION: i32 = 1;

/// Initialize the database schema.
pub async fn initialize_schema(
    client: &deadpool_postgres::Client,
    config: &StoreConfig,
    statements: &Statements,
) -> StorageResult<()> {
    let version_table = config.schema_version_table();
    let current_version = get_schema_version(client, &version_table).await?;

    if current_version == 0 {
        create_schema_v1(client, statements).await?;
        set_schema_version(client, &version_table, SCHEMA_VERSION).await?;
        tracing::info!(table = %config.table_name, "Created PostgreSQL schema v{}", SCHEMA_VERSION);
    } else if current_version > SCHEMA_VERSION {
        return Err(migration_error(format!(
            "database schema version {} is newer than supported version {}",
            current_version, SCHEMA_VERSION
        )));
    }

    Ok(())
}

/// Get the current schema version.
async fn get_schema_version(
    client: &deadpool_postgres::Client,
    version_table: &str,
) -> StorageResult<i32> {
    client
        .execute(
            &format!(
                "CREATE TABLE IF NOT EXISTS {} (version INTEGER NOT NULL)",
                version_table
            ),
            &[],
        )
        .await
        .map_err(|e| migration_error(format!("Failed to create {}: {}", version_table, e)))?;

    let row = client
        .query_opt(&format!("SELECT version FROM {} LIMIT 1", version_table), &[])
        .await
        .map_err(|e| migration_error(format!("Failed to query schema version: {}", e)))?;

    match row {
        Some(row) => row
            .try_get::<_, i32>(0)
            .map_err(|e| migration_error(format!("Failed to read schema version: {}", e))),
        None => Ok(0),
    }
}

/// Set the schema version.
async fn set_schema_version(
    client: &deadpool_postgres::Client,
    version_table: &str,
    version: i32,
) -> StorageResult<()> {
    client
        .execute(&format!("DELETE FROM {}", version_table), &[])
        .await
        .map_err(|e| migration_error(format!("Failed to clear {}: {}", version_table, e)))?;

    client
        .execute(
            &format!("INSERT INTO {} (version) VALUES ($1)", version_table),
            &[&version],
        )
        .await
        .map_err(|e| migration_error(format!("Failed to set schema version: {}", e)))?;

    Ok(())
}

/// Create the initial schema (version 1).
async fn create_schema_v1(
    client: &deadpool_postgres::Client,
    statements: &Statements,
) -> StorageResult<()> {
    client
        .execute(&statements.create_table, &[])
        .await
        .map_err(|e| migration_error(format!("Failed to create item table: {}", e)))?;
    Ok(())
}

fn migration_error(message: String) -> StorageError {
    StorageError::Backend(BackendError::MigrationError { message })
}

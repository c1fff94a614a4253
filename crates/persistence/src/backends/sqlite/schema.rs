//! SQLite schema definitions and migrations.

use rusqlite::{Connection, OptionalExtension};

use crate::config::StoreConfig;
use crate::core::Statements;
use crate::error::{BackendError, StorageError, StorageResult};

/// Current schema version.
pub const SCHEMA_VERSION: i32 = 1;

/// Initialize the database schema.
pub fn initialize_schema(
    conn: &Connection,
    config: &StoreConfig,
    statements: &Statements,
) -> StorageResult<()> {
    let version_table = config.schema_version_table();
    let current_version = get_schema_version(conn, &version_table)?;

    if current_version == 0 {
        create_schema_v1(conn, statements)?;
        set_schema_version(conn, &version_table, SCHEMA_VERSION)?;
        tracing::info!(table = %config.table_name, "Created SQLite schema v{}", SCHEMA_VERSION);
    } else if current_version > SCHEMA_VERSION {
        return Err(StorageError::Backend(BackendError::MigrationError {
            message: format!(
                "database schema version {} is newer than supported version {}",
                current_version, SCHEMA_VERSION
            ),
        }));
    }

    Ok(())
}

/// Get the current schema version.
fn get_schema_version(conn: &Connection, version_table: &str) -> StorageResult<i32> {
    conn.execute(
        &format!(
            "CREATE TABLE IF NOT EXISTS {} (version INTEGER NOT NULL)",
            version_table
        ),
        [],
    )
    .map_err(|e| migration_error(format!("Failed to create {}: {}", version_table, e)))?;

    let version: Option<i32> = conn
        .query_row(
            &format!("SELECT version FROM {} LIMIT 1", version_table),
            [],
            |row| row.get(0),
        )
        .optional()
        .map_err(|e| migration_error(format!("Failed to read schema version: {}", e)))?;

    Ok(version.unwrap_or(0))
}

/// Set the schema version.
fn set_schema_version(conn: &Connection, version_table: &str, version: i32) -> StorageResult<()> {
    conn.execute(&format!("DELETE FROM {}", version_table), [])
        .map_err(|e| migration_error(format!("Failed to clear {}: {}", version_table, e)))?;

    conn.execute(
        &format!("INSERT INTO {} (version) VALUES (?1)", version_table),
        [version],
    )
    .map_err(|e| migration_error(format!("Failed to set schema version: {}", e)))?;

    Ok(())
}

/// Create the initial schema (version 1).
fn create_schema_v1(conn: &Connection, statements: &Statements) -> StorageResult<()> {
    conn.execute(&statements.create_table, [])
        .map_err(|e| migration_error(format!("Failed to create item table: {}", e)))?;
    Ok(())
}

fn migration_error(message: String) -> StorageError {
    StorageError::Backend(BackendError::MigrationError { message })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::SqliteDialect;

    fn setup() -> (Connection, StoreConfig, Statements) {
        let conn = Connection::open_in_memory().unwrap();
        let config = StoreConfig::default();
        let statements = Statements::render(&SqliteDialect, &config);
        (conn, config, statements)
    }

    #[test]
    fn test_initialize_is_idempotent() {
        let (conn, config, statements) = setup();
        initialize_schema(&conn, &config, &statements).unwrap();
        initialize_schema(&conn, &config, &statements).unwrap();

        let version = get_schema_version(&conn, &config.schema_version_table()).unwrap();
        assert_eq!(version, SCHEMA_VERSION);
    }

    #[test]
    fn test_item_table_created() {
        let (conn, config, statements) = setup();
        initialize_schema(&conn, &config, &statements).unwrap();

        let count: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = 'payments'",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(count, 1);
    }

    #[test]
    fn test_newer_schema_rejected() {
        let (conn, config, statements) = setup();
        initialize_schema(&conn, &config, &statements).unwrap();
        set_schema_version(&conn, &config.schema_version_table(), SCHEMA_VERSION + 1).unwrap();

        let err = initialize_schema(&conn, &config, &statements).unwrap_err();
        assert!(matches!(
            err,
            StorageError::Backend(BackendError::MigrationError { .. })
        ));
    }
}

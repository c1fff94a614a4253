//! Statement templates shared by the SQL backends.
//!
//! Each store renders a [`Statements`] set once at construction from its
//! [`StoreConfig`] and a [`SqlDialect`]. The dialect supplies the only things
//! that differ between engines: placeholder syntax and boolean literals.

use crate::config::StoreConfig;
use crate::error::{BackendError, ConflictError, StorageResult};

use super::BackendKind;

/// Engine-specific pieces of SQL syntax.
pub trait SqlDialect: Send + Sync {
    /// The engine this dialect targets.
    fn kind(&self) -> BackendKind;

    /// Placeholder for the 1-based bind parameter `index`.
    fn placeholder(&self, index: usize) -> String;

    /// Literal stored in the `deleted` column for live rows.
    fn false_literal(&self) -> &'static str;

    /// Literal stored in the `deleted` column for tombstoned rows.
    fn true_literal(&self) -> &'static str;

    /// Column type for the opaque attributes payload.
    fn blob_type(&self) -> &'static str;
}

/// SQLite: `?N` placeholders, booleans stored as integers.
#[derive(Debug, Clone, Copy, Default)]
pub struct SqliteDialect;

impl SqlDialect for SqliteDialect {
    fn kind(&self) -> BackendKind {
        BackendKind::Sqlite
    }

    fn placeholder(&self, index: usize) -> String {
        format!("?{}", index)
    }

    fn false_literal(&self) -> &'static str {
        "0"
    }

    fn true_literal(&self) -> &'static str {
        "1"
    }

    fn blob_type(&self) -> &'static str {
        "BLOB"
    }
}

/// PostgreSQL: `$N` placeholders, native booleans.
#[derive(Debug, Clone, Copy, Default)]
pub struct PostgresDialect;

impl SqlDialect for PostgresDialect {
    fn kind(&self) -> BackendKind {
        BackendKind::Postgres
    }

    fn placeholder(&self, index: usize) -> String {
        format!("${}", index)
    }

    fn false_literal(&self) -> &'static str {
        "FALSE"
    }

    fn true_literal(&self) -> &'static str {
        "TRUE"
    }

    fn blob_type(&self) -> &'static str {
        "BYTEA"
    }
}

/// The statements a SQL store executes, rendered for one table and dialect.
///
/// Bind order for each statement:
///
/// | Statement | Parameters |
/// |-----------|------------|
/// | `count` | none |
/// | `list` | limit, offset |
/// | `fetch` | id |
/// | `create` | id, organisation, attributes |
/// | `update` | attributes, organisation, id, expected version |
/// | `delete_one` | id, expected version |
/// | `delete_all` | none |
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Statements {
    /// Counts live rows.
    pub count: String,
    /// Pages through live rows.
    pub list: String,
    /// Reads one live row.
    pub fetch: String,
    /// Inserts a row at version 0.
    pub create: String,
    /// Conditional update returning the new row.
    pub update: String,
    /// Conditional tombstone.
    pub delete_one: String,
    /// Unconditional hard delete.
    pub delete_all: String,
    /// Creates the item table if missing.
    pub create_table: String,
}

const COLUMNS: &str = "id, version, organisation, attributes";

impl Statements {
    /// Renders all statements for `config.table_name`.
    pub fn render(dialect: &dyn SqlDialect, config: &StoreConfig) -> Self {
        let t = &config.table_name;
        let p = |i| dialect.placeholder(i);
        let live = format!("deleted = {}", dialect.false_literal());
        tracing::debug!(backend = %dialect.kind(), table = %t, "Rendering statements");

        Self {
            count: format!("SELECT COUNT(*) FROM {t} WHERE {live}"),
            list: format!(
                "SELECT {COLUMNS} FROM {t} WHERE {live} ORDER BY id LIMIT {} OFFSET {}",
                p(1),
                p(2)
            ),
            fetch: format!("SELECT {COLUMNS} FROM {t} WHERE id = {} AND {live}", p(1)),
            create: format!(
                "INSERT INTO {t} (id, version, organisation, attributes, deleted) \
                 VALUES ({}, 0, {}, {}, {})",
                p(1),
                p(2),
                p(3),
                dialect.false_literal()
            ),
            update: format!(
                "UPDATE {t} SET attributes = {}, organisation = {}, version = version + 1 \
                 WHERE id = {} AND version = {} AND {live} RETURNING {COLUMNS}",
                p(1),
                p(2),
                p(3),
                p(4)
            ),
            delete_one: format!(
                "UPDATE {t} SET deleted = {} WHERE id = {} AND version = {} AND {live}",
                dialect.true_literal(),
                p(1),
                p(2)
            ),
            delete_all: format!("DELETE FROM {t}"),
            create_table: format!(
                "CREATE TABLE IF NOT EXISTS {t} (\
                 id TEXT PRIMARY KEY, \
                 version BIGINT NOT NULL, \
                 organisation TEXT NOT NULL, \
                 attributes {} NOT NULL, \
                 deleted BOOLEAN NOT NULL DEFAULT {})",
                dialect.blob_type(),
                dialect.false_literal()
            ),
        }
    }
}

/// Interprets the number of rows a conditional mutation affected.
///
/// Zero rows means the item was missing, deleted, or not at the expected
/// version; all three surface as a version conflict.
pub fn expect_single_row(
    operation: &'static str,
    id: &str,
    expected_version: i64,
    count: u64,
) -> StorageResult<()> {
    match count {
        0 => Err(ConflictError::VersionMismatch {
            id: id.to_string(),
            expected_version,
        }
        .into()),
        1 => Ok(()),
        n => Err(BackendError::UnexpectedRowCount {
            operation,
            id: id.to_string(),
            count: n,
        }
        .into()),
    }
}

/// Converts a list window into SQL `OFFSET`/`LIMIT` values.
///
/// Returns `None` when the offset lies past any row a table can hold. An
/// oversized limit is clamped.
pub fn sql_window(offset: usize, limit: usize) -> Option<(i64, i64)> {
    let offset = i64::try_from(offset).ok()?;
    Some((offset, i64::try_from(limit).unwrap_or(i64::MAX)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StorageError;

    #[test]
    fn test_sql_window_bounds() {
        assert_eq!(sql_window(5, 10), Some((5, 10)));
        assert_eq!(sql_window(i64::MAX as usize, 1), Some((i64::MAX, 1)));
        assert_eq!(sql_window(i64::MAX as usize + 1, 10), None);
        assert_eq!(sql_window(0, usize::MAX), Some((0, i64::MAX)));
    }

    #[test]
    fn test_sqlite_placeholders() {
        let s = Statements::render(&SqliteDialect, &StoreConfig::default());
        assert_eq!(
            s.fetch,
            "SELECT id, version, organisation, attributes FROM payments WHERE id = ?1 AND deleted = 0"
        );
        assert!(s.update.contains("WHERE id = ?3 AND version = ?4 AND deleted = 0"));
        assert!(s.delete_one.starts_with("UPDATE payments SET deleted = 1"));
    }

    #[test]
    fn test_postgres_placeholders() {
        let s = Statements::render(&PostgresDialect, &StoreConfig::default());
        assert!(s.list.ends_with("LIMIT $1 OFFSET $2"));
        assert!(s.create.contains("VALUES ($1, 0, $2, $3, FALSE)"));
        assert!(s.create_table.contains("attributes BYTEA NOT NULL"));
    }

    #[test]
    fn test_renders_configured_table() {
        let config = StoreConfig::new("payments_archive").unwrap();
        let s = Statements::render(&SqliteDialect, &config);
        assert_eq!(s.delete_all, "DELETE FROM payments_archive");
        assert!(s.count.contains("FROM payments_archive WHERE deleted = 0"));
    }

    #[test]
    fn test_update_is_single_conditional_statement() {
        let s = Statements::render(&PostgresDialect, &StoreConfig::default());
        assert!(s.update.contains("version = version + 1"));
        assert!(s.update.contains("RETURNING id, version, organisation, attributes"));
    }

    #[test]
    fn test_expect_single_row() {
        assert!(expect_single_row("update", "p1", 0, 1).is_ok());

        let err = expect_single_row("update", "p1", 0, 0).unwrap_err();
        assert!(err.is_conflict());

        let err = expect_single_row("delete", "p1", 0, 2).unwrap_err();
        assert!(matches!(
            err,
            StorageError::Backend(BackendError::UnexpectedRowCount { count: 2, .. })
        ));
    }
}

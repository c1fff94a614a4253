//! Per-instance store configuration.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, StorageResult};

/// Default table holding payment items.
pub const DEFAULT_TABLE_NAME: &str = "payments";

static IDENTIFIER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("identifier regex is valid"));

/// Configuration shared by all SQL-backed stores.
///
/// The table name is spliced into rendered statements, so it must be a plain
/// SQL identifier. Use [`StoreConfig::new`] or [`StoreConfig::validate`] before
/// handing a deserialized config to a store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Target table name.
    #[serde(default = "default_table_name")]
    pub table_name: String,
}

fn default_table_name() -> String {
    DEFAULT_TABLE_NAME.to_string()
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            table_name: default_table_name(),
        }
    }
}

impl StoreConfig {
    /// Creates a validated configuration for the given table.
    pub fn new(table_name: impl Into<String>) -> StorageResult<Self> {
        let config = Self {
            table_name: table_name.into(),
        };
        config.validate()?;
        Ok(config)
    }

    /// Checks that the table name is a plain identifier.
    pub fn validate(&self) -> StorageResult<()> {
        if self.table_name.len() > 63 {
            return Err(ConfigError::InvalidTableName {
                table: self.table_name.clone(),
                message: "longer than 63 characters".to_string(),
            }
            .into());
        }
        if !IDENTIFIER.is_match(&self.table_name) {
            return Err(ConfigError::InvalidTableName {
                table: self.table_name.clone(),
                message: "must match [A-Za-z_][A-Za-z0-9_]*".to_string(),
            }
            .into());
        }
        Ok(())
    }

    /// Name of the table tracking the schema version of this store's table.
    pub fn schema_version_table(&self) -> String {
        format!("{}_schema_version", self.table_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StorageError;

    #[test]
    fn test_default_table() {
        let config = StoreConfig::default();
        assert_eq!(config.table_name, "payments");
        assert!(config.validate().is_ok());
        assert_eq!(config.schema_version_table(), "payments_schema_version");
    }

    #[test]
    fn test_valid_names() {
        assert!(StoreConfig::new("payments_v2").is_ok());
        assert!(StoreConfig::new("_scratch").is_ok());
    }

    #[test]
    fn test_rejects_injection() {
        let err = StoreConfig::new("payments; DROP TABLE x").unwrap_err();
        assert!(matches!(
            err,
            StorageError::Config(ConfigError::InvalidTableName { .. })
        ));
    }

    #[test]
    fn test_rejects_empty_and_leading_digit() {
        assert!(StoreConfig::new("").is_err());
        assert!(StoreConfig::new("1payments").is_err());
    }

    #[test]
    fn test_deserialize_defaults() {
        let config: StoreConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, StoreConfig::default());
    }
}

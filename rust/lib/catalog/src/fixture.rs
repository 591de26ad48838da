use std::fs;
use std::path::Path;

use serde::Deserialize;
use scylla_gen_codegen::ColumnRow;
use tracing::debug;

use crate::error::CatalogError;
use crate::traits::CatalogSource;

/// A fixture entry: a catalog row, optionally tagged with its keyspace.
#[derive(Debug, Clone, Deserialize)]
struct FixtureRow {
    #[serde(default)]
    keyspace_name: Option<String>,
    #[serde(flatten)]
    row: ColumnRow,
}

/// FixtureCatalog serves catalog rows from a JSON dump of
/// `system_schema.columns` instead of a live cluster.
///
/// Rows without a `keyspace_name` match every keyspace.
#[derive(Debug, Clone, Default)]
pub struct FixtureCatalog {
    rows: Vec<FixtureRow>,
}

impl FixtureCatalog {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let data = fs::read_to_string(path)
            .map_err(|e| CatalogError::Fixture(format!("{}: {}", path.display(), e)))?;
        let rows: Vec<FixtureRow> = serde_json::from_str(&data)
            .map_err(|e| CatalogError::Fixture(format!("{}: {}", path.display(), e)))?;

        debug!(path = %path.display(), count = rows.len(), "loaded fixture");
        Ok(Self { rows })
    }

    pub fn from_rows(rows: Vec<ColumnRow>) -> Self {
        Self {
            rows: rows
                .into_iter()
                .map(|row| FixtureRow {
                    keyspace_name: None,
                    row,
                })
                .collect(),
        }
    }
}

impl CatalogSource for FixtureCatalog {
    async fn fetch_columns(
        &self,
        keyspace: &str,
        tables: &[String],
    ) -> Result<Vec<ColumnRow>, CatalogError> {
        Ok(self
            .rows
            .iter()
            .filter(|r| r.keyspace_name.as_deref().is_none_or(|ks| ks == keyspace))
            .filter(|r| tables.is_empty() || tables.contains(&r.row.table_name))
            .map(|r| r.row.clone())
            .collect())
    }
}

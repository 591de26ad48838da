//! Subcommand implementations.

pub mod generate;
pub mod init;
pub mod inspect;

use std::path::Path;

use anyhow::{Context, Result};
use scylla_gen_catalog::{CatalogError, CatalogSource, FixtureCatalog, ScyllaCatalog};
use scylla_gen_codegen::{normalize, ColumnRow, SchemaError, Schemas};
use tracing::{info, warn};

use crate::config::Settings;

/// The catalog a run reads from: a live cluster or a JSON fixture.
pub enum Catalog {
    Live(ScyllaCatalog),
    Fixture(FixtureCatalog),
}

impl Catalog {
    pub async fn open(settings: &Settings, fixture: Option<&Path>) -> Result<Self> {
        match fixture {
            Some(path) => {
                info!(path = %path.display(), "reading catalog fixture");
                Ok(Catalog::Fixture(FixtureCatalog::load(path)?))
            }
            None => {
                let options = settings.connect_options()?;
                let catalog = ScyllaCatalog::connect(&options)
                    .await
                    .context("failed to connect to the cluster")?;
                Ok(Catalog::Live(catalog))
            }
        }
    }
}

impl CatalogSource for Catalog {
    async fn fetch_columns(
        &self,
        keyspace: &str,
        tables: &[String],
    ) -> Result<Vec<ColumnRow>, CatalogError> {
        match self {
            Catalog::Live(catalog) => catalog.fetch_columns(keyspace, tables).await,
            Catalog::Fixture(catalog) => catalog.fetch_columns(keyspace, tables).await,
        }
    }
}

/// Fetch and normalize the requested tables (all tables when `tables` is
/// empty), logging every diagnostic as a warning.
pub async fn load_schemas<C: CatalogSource>(
    catalog: &C,
    keyspace: &str,
    tables: &[String],
) -> Result<Schemas> {
    let rows = catalog
        .fetch_columns(keyspace, tables)
        .await
        .with_context(|| format!("failed to read the schema of keyspace {}", keyspace))?;

    if rows.is_empty() && tables.is_empty() {
        return Err(SchemaError::EmptyKeyspace(keyspace.to_string()).into());
    }

    let schemas = normalize(rows, tables)?;
    for schema in schemas.values() {
        for diagnostic in schema.diagnostics() {
            warn!("{}", diagnostic);
        }
    }

    info!(keyspace, tables = schemas.len(), "loaded table schemas");
    Ok(schemas)
}

#[cfg(test)]
pub(crate) mod test_support {
    use scylla_gen_catalog::FixtureCatalog;
    use scylla_gen_codegen::ColumnRow;

    pub fn row(table: &str, column: &str, kind: &str, position: i32, ty: &str) -> ColumnRow {
        ColumnRow {
            table_name: table.to_string(),
            column_name: column.to_string(),
            clustering_order: Some(if kind == "clustering" { "asc" } else { "none" }.to_string()),
            kind: kind.to_string(),
            position,
            column_type: ty.to_string(),
        }
    }

    /// Two tables: `messages` and `chat_rooms`.
    pub fn chat_catalog() -> FixtureCatalog {
        FixtureCatalog::from_rows(vec![
            row("messages", "id", "partition_key", 0, "uuid"),
            row("messages", "created_at", "clustering", 0, "timestamp"),
            row("messages", "body", "regular", -1, "text"),
            row("chat_rooms", "room_id", "partition_key", 0, "text"),
            row("chat_rooms", "members", "regular", -1, "set<uuid>"),
            row("chat_rooms", "settings", "regular", -1, "mapper<text>"),
        ])
    }
}

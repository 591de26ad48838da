//! `scylla-gen inspect`: print `CREATE TABLE` statements.

use anyhow::Result;
use scylla_gen_catalog::CatalogSource;
use scylla_gen_codegen::cql::CqlGenerator;
use scylla_gen_codegen::Codegen;

use super::load_schemas;
use crate::sink::Sink;

/// Render the requested tables as CQL and hand them to `sink`.
pub async fn inspect<C: CatalogSource>(
    catalog: &C,
    keyspace: &str,
    tables: &[String],
    sink: &mut dyn Sink,
) -> Result<usize> {
    let schemas = load_schemas(catalog, keyspace, tables).await?;
    let generator = CqlGenerator {
        keyspace: keyspace.to_string(),
    };

    for schema in schemas.values() {
        sink.emit(&generator.generate(schema))?;
    }

    Ok(schemas.len())
}

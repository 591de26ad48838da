use std::future::Future;

use scylla_gen_codegen::ColumnRow;

use crate::error::CatalogError;

/// CatalogSource reads column metadata from `system_schema.columns`.
pub trait CatalogSource {
    /// Fetch the column rows of `tables` in `keyspace`, or of every table in
    /// the keyspace when `tables` is empty. All requested tables come back
    /// from a single round trip.
    fn fetch_columns(
        &self,
        keyspace: &str,
        tables: &[String],
    ) -> impl Future<Output = Result<Vec<ColumnRow>, CatalogError>> + Send;
}

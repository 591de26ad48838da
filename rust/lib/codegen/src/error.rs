use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    #[error("no tables found in keyspace {0}")]
    EmptyKeyspace(String),

    #[error("table {0} not found or has no columns")]
    EmptyTable(String),

    #[error("column {table}.{column} has unsupported kind {kind:?}")]
    UnknownKind {
        table: String,
        column: String,
        kind: String,
    },
}

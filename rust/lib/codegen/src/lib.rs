/// Codegen Library - schema-to-TypeScript translation for ScyllaDB tables
///
/// Turns `system_schema.columns` rows into a normalized schema, derives the
/// legal key shapes for each table and renders them as source text.

pub mod cql;
pub mod error;
pub mod key_model;
pub mod naming;
pub mod scaffold;
pub mod schema;
pub mod types;
pub mod typescript_model;

pub use error::SchemaError;
pub use key_model::{KeyField, KeyModel};
pub use schema::{
    normalize, ClusteringOrder, ColumnDefinition, ColumnKind, ColumnRow, Diagnostic, Schemas,
    TableSchema,
};
pub use types::{ColumnType, Conversion, NativeType, TargetType};
pub use typescript_model::RenderedModel;

/// Codegen trait - implement this for each output flavour
pub trait Codegen {
    fn generate(&self, table: &TableSchema) -> GeneratedFile;
    fn language(&self) -> Language;
}

/// Language of a generated artifact, used by sinks to pick a highlighter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    TypeScript,
    Cql,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
    pub path: String,
    pub content: String,
    pub language: Language,
}

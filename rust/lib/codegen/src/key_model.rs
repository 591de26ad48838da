/// Key model: which key combinations a table can legally be queried by
///
/// A query must name every partition key and may add clustering keys only as
/// a prefix of their declared order. The model lists each legal clustering
/// prefix so the renderer can emit one alternative per prefix.

use crate::naming::snake_to_camel;
use crate::schema::{ColumnDefinition, TableSchema};
use crate::types::TargetType;

/// A key column as it appears in generated types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyField {
    pub name: String,
    pub column_name: String,
    pub target: TargetType,
}

impl KeyField {
    fn from_column(column: &ColumnDefinition) -> Self {
        Self {
            name: snake_to_camel(&column.column_name),
            column_name: column.column_name.clone(),
            target: column.column_type.target(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyModel {
    pub partition_key_fields: Vec<KeyField>,
    /// `clustering_prefixes[i]` holds the first `i + 1` clustering fields.
    /// Empty when the table has no clustering keys.
    pub clustering_prefixes: Vec<Vec<KeyField>>,
}

impl KeyModel {
    pub fn derive(schema: &TableSchema) -> Self {
        let partition_key_fields = schema
            .partition_keys()
            .into_iter()
            .map(KeyField::from_column)
            .collect();

        let clustering: Vec<KeyField> = schema
            .clustering_keys()
            .into_iter()
            .map(KeyField::from_column)
            .collect();
        let clustering_prefixes = (1..=clustering.len())
            .map(|len| clustering[..len].to_vec())
            .collect();

        Self {
            partition_key_fields,
            clustering_prefixes,
        }
    }

    pub fn has_clustering_axis(&self) -> bool {
        !self.clustering_prefixes.is_empty()
    }

    /// All clustering fields in declaration order (the longest prefix).
    pub fn clustering_fields(&self) -> &[KeyField] {
        self.clustering_prefixes
            .last()
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

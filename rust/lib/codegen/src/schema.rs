/// Normalized table schemas built from `system_schema.columns` rows

use std::fmt;
use std::str::FromStr;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::SchemaError;
use crate::types::ColumnType;

/// A row of `system_schema.columns`, as the catalog returns it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnRow {
    pub table_name: String,
    pub column_name: String,
    #[serde(default)]
    pub clustering_order: Option<String>,
    pub kind: String,
    pub position: i32,
    #[serde(rename = "type")]
    pub column_type: String,
}

/// Role of a column in the table's primary key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColumnKind {
    PartitionKey,
    Clustering,
    Regular,
    Static,
}

impl ColumnKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ColumnKind::PartitionKey => "partition_key",
            ColumnKind::Clustering => "clustering",
            ColumnKind::Regular => "regular",
            ColumnKind::Static => "static",
        }
    }

    /// Partition and clustering keys carry a meaningful position.
    pub fn is_key(self) -> bool {
        matches!(self, ColumnKind::PartitionKey | ColumnKind::Clustering)
    }
}

impl FromStr for ColumnKind {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "partition_key" => Ok(ColumnKind::PartitionKey),
            "clustering" => Ok(ColumnKind::Clustering),
            "regular" => Ok(ColumnKind::Regular),
            "static" => Ok(ColumnKind::Static),
            _ => Err(()),
        }
    }
}

impl fmt::Display for ColumnKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClusteringOrder {
    Asc,
    Desc,
    None,
}

impl ClusteringOrder {
    /// The catalog stores `asc`, `desc` or `none`; anything else is `None`.
    pub fn parse(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            Some(s) if s.eq_ignore_ascii_case("asc") => ClusteringOrder::Asc,
            Some(s) if s.eq_ignore_ascii_case("desc") => ClusteringOrder::Desc,
            _ => ClusteringOrder::None,
        }
    }
}

/// One column of a table with its key role resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnDefinition {
    pub table_name: String,
    pub column_name: String,
    pub kind: ColumnKind,
    pub position: i32,
    pub raw_type: String,
    pub column_type: ColumnType,
    pub clustering_order: ClusteringOrder,
}

impl TryFrom<ColumnRow> for ColumnDefinition {
    type Error = SchemaError;

    fn try_from(row: ColumnRow) -> Result<Self, Self::Error> {
        let kind = row.kind.parse().map_err(|_| SchemaError::UnknownKind {
            table: row.table_name.clone(),
            column: row.column_name.clone(),
            kind: row.kind.clone(),
        })?;

        Ok(Self {
            column_type: ColumnType::parse(&row.column_type),
            clustering_order: ClusteringOrder::parse(row.clustering_order.as_deref()),
            table_name: row.table_name,
            column_name: row.column_name,
            kind,
            position: row.position,
            raw_type: row.column_type,
        })
    }
}

/// All columns of one table, in catalog order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableSchema {
    pub table_name: String,
    pub columns: Vec<ColumnDefinition>,
}

impl TableSchema {
    pub fn new(table_name: impl Into<String>, columns: Vec<ColumnDefinition>) -> Self {
        Self {
            table_name: table_name.into(),
            columns,
        }
    }

    /// Columns of `kind`, sorted by position. The sort is stable, so columns
    /// sharing a position keep their catalog order.
    pub fn sorted_keys(&self, kind: ColumnKind) -> Vec<&ColumnDefinition> {
        let mut keys: Vec<&ColumnDefinition> =
            self.columns.iter().filter(|c| c.kind == kind).collect();
        keys.sort_by_key(|c| c.position);
        keys
    }

    pub fn partition_keys(&self) -> Vec<&ColumnDefinition> {
        self.sorted_keys(ColumnKind::PartitionKey)
    }

    pub fn clustering_keys(&self) -> Vec<&ColumnDefinition> {
        self.sorted_keys(ColumnKind::Clustering)
    }

    /// Non-fatal anomalies worth reporting to whoever runs the generator.
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        let mut out = Vec::new();

        for column in &self.columns {
            if column.column_type.contains_unknown() {
                out.push(Diagnostic::UnknownType {
                    table: self.table_name.clone(),
                    column: column.column_name.clone(),
                    raw_type: column.raw_type.clone(),
                });
            }
        }

        for kind in [ColumnKind::PartitionKey, ColumnKind::Clustering] {
            let keys = self.sorted_keys(kind);
            for pair in keys.windows(2) {
                if pair[0].position == pair[1].position {
                    out.push(Diagnostic::DuplicatePosition {
                        table: self.table_name.clone(),
                        kind,
                        position: pair[0].position,
                        columns: (pair[0].column_name.clone(), pair[1].column_name.clone()),
                    });
                }
            }

            let mut expected = 0i32;
            for key in &keys {
                if key.position < 0 {
                    out.push(Diagnostic::NegativePosition {
                        table: self.table_name.clone(),
                        kind,
                        column: key.column_name.clone(),
                        position: key.position,
                    });
                    continue;
                }
                if key.position > expected {
                    out.push(Diagnostic::PositionGap {
                        table: self.table_name.clone(),
                        kind,
                        expected,
                        found: key.position,
                    });
                }
                expected = expected.max(key.position.saturating_add(1));
            }
        }

        out
    }
}

/// Table schemas keyed by name, in the order tables were first seen.
pub type Schemas = IndexMap<String, TableSchema>;

/// Group catalog rows by table.
///
/// Rows are kept in the order they arrived; key ordering is left to the
/// consumers. Every explicitly requested table must have at least one row.
pub fn normalize(rows: Vec<ColumnRow>, requested: &[String]) -> Result<Schemas, SchemaError> {
    let mut tables = Schemas::new();

    for row in rows {
        let column = ColumnDefinition::try_from(row)?;
        tables
            .entry(column.table_name.clone())
            .or_insert_with(|| TableSchema::new(column.table_name.clone(), Vec::new()))
            .columns
            .push(column);
    }

    if let Some(missing) = requested.iter().find(|name| !tables.contains_key(*name)) {
        return Err(SchemaError::EmptyTable(missing.clone()));
    }

    Ok(tables)
}

/// Something odd about a table that does not stop generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    UnknownType {
        table: String,
        column: String,
        raw_type: String,
    },
    DuplicatePosition {
        table: String,
        kind: ColumnKind,
        position: i32,
        columns: (String, String),
    },
    PositionGap {
        table: String,
        kind: ColumnKind,
        expected: i32,
        found: i32,
    },
    /// Key columns count positions from zero.
    NegativePosition {
        table: String,
        kind: ColumnKind,
        column: String,
        position: i32,
    },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::UnknownType {
                table,
                column,
                raw_type,
            } => write!(
                f,
                "{}.{}: unsupported type {:?} rendered as unknown",
                table, column, raw_type
            ),
            Diagnostic::DuplicatePosition {
                table,
                kind,
                position,
                columns,
            } => write!(
                f,
                "{}: {} columns {} and {} share position {}",
                table, kind, columns.0, columns.1, position
            ),
            Diagnostic::PositionGap {
                table,
                kind,
                expected,
                found,
            } => write!(
                f,
                "{}: {} positions skip from {} to {}",
                table, kind, expected, found
            ),
            Diagnostic::NegativePosition {
                table,
                kind,
                column,
                position,
            } => write!(
                f,
                "{}.{}: {} column has negative position {}",
                table, column, kind, position
            ),
        }
    }
}

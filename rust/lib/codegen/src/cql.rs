/// CQL `CREATE TABLE` rendering for schema inspection

use std::borrow::Cow;

use crate::schema::{ClusteringOrder, TableSchema};
use crate::{Codegen, GeneratedFile, Language};

/// Renders the table definition as it would be declared in CQL.
pub struct CqlGenerator {
    pub keyspace: String,
}

impl Codegen for CqlGenerator {
    fn generate(&self, table: &TableSchema) -> GeneratedFile {
        GeneratedFile {
            path: format!("{}.cql", table.table_name),
            content: render_create_table(&self.keyspace, table),
            language: Language::Cql,
        }
    }

    fn language(&self) -> Language {
        Language::Cql
    }
}

pub fn render_create_table(keyspace: &str, schema: &TableSchema) -> String {
    let partition: Vec<Cow<'_, str>> = schema
        .partition_keys()
        .iter()
        .map(|c| quote_identifier(&c.column_name))
        .collect();
    let clustering = schema.clustering_keys();

    let mut key_parts = Vec::new();
    match partition.len() {
        0 => {}
        1 => key_parts.push(partition[0].to_string()),
        _ => key_parts.push(format!("({})", partition.join(", "))),
    }
    key_parts.extend(clustering.iter().map(|c| quote_identifier(&c.column_name).into_owned()));

    let mut cql = format!(
        "CREATE TABLE {}.{} (\n",
        quote_identifier(keyspace),
        quote_identifier(&schema.table_name)
    );
    for column in &schema.columns {
        cql.push_str(&format!(
            "  {} {},\n",
            quote_identifier(&column.column_name),
            column.raw_type
        ));
    }
    cql.push_str(&format!("  PRIMARY KEY ({})\n", key_parts.join(", ")));
    cql.push(')');

    if !clustering.is_empty() {
        let order: Vec<String> = clustering
            .iter()
            .map(|c| {
                let direction = match c.clustering_order {
                    ClusteringOrder::Desc => "DESC",
                    ClusteringOrder::Asc | ClusteringOrder::None => "ASC",
                };
                format!("{} {}", quote_identifier(&c.column_name), direction)
            })
            .collect();
        cql.push_str(&format!(" WITH CLUSTERING ORDER BY ({})", order.join(", ")));
    }
    cql.push_str(";\n");

    cql
}

/// Unquoted CQL identifiers are folded to lower case, so anything outside
/// `[a-z_][a-z0-9_]*` has to be double quoted to keep its spelling.
fn quote_identifier(name: &str) -> Cow<'_, str> {
    let mut chars = name.chars();
    let plain = chars
        .next()
        .is_some_and(|c| c.is_ascii_lowercase() || c == '_')
        && chars.all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_');
    if plain {
        Cow::Borrowed(name)
    } else {
        Cow::Owned(format!("\"{}\"", name.replace('"', "\"\"")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{normalize, ColumnRow};

    fn row(column: &str, kind: &str, position: i32, ty: &str, order: &str) -> ColumnRow {
        ColumnRow {
            table_name: "messages".to_string(),
            column_name: column.to_string(),
            clustering_order: Some(order.to_string()),
            kind: kind.to_string(),
            position,
            column_type: ty.to_string(),
        }
    }

    #[test]
    fn test_single_partition_key_with_clustering() {
        let tables = normalize(
            vec![
                row("id", "partition_key", 0, "uuid", "none"),
                row("status", "clustering", 1, "text", "asc"),
                row("created_at", "clustering", 0, "timestamp", "desc"),
                row("payload", "regular", -1, "blob", "none"),
            ],
            &[],
        )
        .unwrap();

        let cql = render_create_table("chat", &tables["messages"]);
        assert_eq!(
            cql,
            "CREATE TABLE chat.messages (\n\
             \x20 id uuid,\n\
             \x20 status text,\n\
             \x20 created_at timestamp,\n\
             \x20 payload blob,\n\
             \x20 PRIMARY KEY (id, created_at, status)\n\
             ) WITH CLUSTERING ORDER BY (created_at DESC, status ASC);\n"
        );
    }

    #[test]
    fn test_composite_partition_key() {
        let tables = normalize(
            vec![
                row("day", "partition_key", 1, "date", "none"),
                row("tenant", "partition_key", 0, "text", "none"),
                row("body", "regular", -1, "text", "none"),
            ],
            &[],
        )
        .unwrap();

        let cql = render_create_table("chat", &tables["messages"]);
        assert!(cql.contains("  PRIMARY KEY ((tenant, day))\n);\n"));
        assert!(!cql.contains("CLUSTERING ORDER"));
    }

    #[test]
    fn test_missing_partition_key_has_no_leading_separator() {
        let tables = normalize(
            vec![
                row("seq", "clustering", 0, "int", "asc"),
                row("body", "regular", -1, "text", "none"),
            ],
            &[],
        )
        .unwrap();

        let cql = render_create_table("chat", &tables["messages"]);
        assert!(cql.contains("  PRIMARY KEY (seq)\n) WITH CLUSTERING ORDER BY (seq ASC);\n"));

        let tables = normalize(vec![row("body", "regular", -1, "text", "none")], &[]).unwrap();
        let cql = render_create_table("chat", &tables["messages"]);
        assert!(cql.ends_with("  PRIMARY KEY ()\n);\n"));
    }

    #[test]
    fn test_case_sensitive_names_are_quoted() {
        let tables = normalize(
            vec![
                row("userId", "partition_key", 0, "uuid", "none"),
                row("sent_at", "clustering", 0, "timestamp", "desc"),
                row("Body \"v2\"", "regular", -1, "text", "none"),
            ],
            &[],
        )
        .unwrap();

        let cql = render_create_table("Chat", &tables["messages"]);
        assert!(cql.starts_with("CREATE TABLE \"Chat\".messages (\n"));
        assert!(cql.contains("  \"userId\" uuid,\n"));
        assert!(cql.contains("  \"Body \"\"v2\"\"\" text,\n"));
        assert!(cql.contains("  PRIMARY KEY (\"userId\", sent_at)\n"));
        assert!(cql.ends_with("WITH CLUSTERING ORDER BY (sent_at DESC);\n"));
    }
}

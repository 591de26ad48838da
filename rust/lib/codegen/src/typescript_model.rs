/// TypeScript model generator for the cassandra-driver object mapper

use crate::key_model::{KeyField, KeyModel};
use crate::naming::{kebab_case, singularize, snake_to_camel, snake_to_pascal};
use crate::schema::TableSchema;
use crate::{Codegen, GeneratedFile, Language};

/// Generated model source for one table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedModel {
    pub table_name: String,
    pub entity_name: String,
    pub file_name: String,
    pub content: String,
}

impl From<RenderedModel> for GeneratedFile {
    fn from(model: RenderedModel) -> Self {
        GeneratedFile {
            path: model.file_name,
            content: model.content,
            language: Language::TypeScript,
        }
    }
}

pub struct TypeScriptModelGenerator;

impl Codegen for TypeScriptModelGenerator {
    fn generate(&self, table: &TableSchema) -> GeneratedFile {
        render(table, &KeyModel::derive(table)).into()
    }

    fn language(&self) -> Language {
        Language::TypeScript
    }
}

/// Interface and mapper name for a table: `user_messages` → `UserMessage`.
pub fn entity_name(table_name: &str) -> String {
    singularize(&snake_to_pascal(table_name))
}

/// Model file name for a table: `user_messages` → `user-message.ts`.
pub fn file_name(table_name: &str) -> String {
    format!("{}.ts", kebab_case(&entity_name(table_name)))
}

/// Render the model file: entity interface, key types, mapper binding and
/// the typed accessor override, always in that order.
pub fn render(schema: &TableSchema, key_model: &KeyModel) -> RenderedModel {
    let entity = entity_name(&schema.table_name);
    let mut output = String::new();

    output.push_str("import cassandra from 'cassandra-driver';\n");
    output.push_str("import { dbClient } from './db-client';\n\n");

    output.push_str(&generate_entity(&entity, schema));
    output.push('\n');
    output.push_str(&generate_partition_keys(&key_model.partition_key_fields));
    output.push('\n');
    if key_model.has_clustering_axis() {
        output.push_str(&generate_clustering_keys(&key_model.clustering_prefixes));
        output.push('\n');
    }
    output.push_str(&generate_mapper(&entity, schema));
    output.push('\n');
    output.push_str(&generate_accessor(&entity, key_model.has_clustering_axis()));

    RenderedModel {
        table_name: schema.table_name.clone(),
        file_name: file_name(&schema.table_name),
        entity_name: entity,
        content: output,
    }
}

fn generate_entity(entity: &str, schema: &TableSchema) -> String {
    let mut output = String::new();

    output.push_str(&format!("export interface {} {{\n", entity));
    for column in &schema.columns {
        output.push_str(&format!(
            "  {}: {};\n",
            snake_to_camel(&column.column_name),
            column.column_type.target()
        ));
    }
    output.push_str("}\n");

    output
}

fn generate_partition_keys(fields: &[KeyField]) -> String {
    if fields.is_empty() {
        return "type PartitionKeys = {};\n".to_string();
    }

    let mut output = String::from("type PartitionKeys = {\n");
    for field in fields {
        output.push_str(&format!("  {}: {};\n", field.name, field.target));
    }
    output.push_str("};\n");

    output
}

/// One alternative per legal prefix, so skipping an earlier clustering key
/// does not type-check.
fn generate_clustering_keys(prefixes: &[Vec<KeyField>]) -> String {
    let mut output = String::from("type ClusteringKeys =\n");

    let alternatives: Vec<String> = prefixes
        .iter()
        .map(|prefix| {
            let lines: Vec<String> = prefix
                .iter()
                .map(|field| format!("    {}: {};", field.name, field.target))
                .collect();
            format!("  | {{\n{}\n  }}", lines.join("\n"))
        })
        .collect();
    output.push_str(&alternatives.join("\n"));
    output.push_str(";\n");

    output
}

/// Mapper binding. Only columns whose driver value needs converting get an
/// explicit entry; the rest rely on the underscore-to-camel-case mapping.
fn generate_mapper(entity: &str, schema: &TableSchema) -> String {
    let mut output = String::new();

    output.push_str("const mapper = new cassandra.mapping.Mapper(dbClient, {\n");
    output.push_str("  models: {\n");
    output.push_str(&format!("    {}: {{\n", entity));
    output.push_str(&format!("      tables: ['{}'],\n", schema.table_name));
    output.push_str("      mappings: new cassandra.mapping.UnderscoreCqlToCamelCaseMappings(),\n");

    let converted: Vec<String> = schema
        .columns
        .iter()
        .filter_map(|column| {
            let conversion = column.column_type.conversion()?;
            Some(format!(
                "        {}: {{\n          name: '{}',\n          toModel: {},\n        }},\n",
                column.column_name,
                snake_to_camel(&column.column_name),
                conversion.to_model()
            ))
        })
        .collect();

    if converted.is_empty() {
        output.push_str("      columns: {},\n");
    } else {
        output.push_str("      columns: {\n");
        for entry in &converted {
            output.push_str(entry);
        }
        output.push_str("      },\n");
    }

    output.push_str("    },\n");
    output.push_str("  },\n");
    output.push_str("});\n");

    output
}

/// `get` requires the complete primary key, so the override narrows the
/// document type to the partition keys plus (when present) clustering keys.
fn generate_accessor(entity: &str, has_clustering: bool) -> String {
    let mut output = String::new();
    let doc = if has_clustering {
        "PartitionKeys & ClusteringKeys"
    } else {
        "PartitionKeys"
    };

    output.push_str(&format!(
        "interface {}Mapper extends cassandra.mapping.ModelMapper<{}> {{\n",
        entity, entity
    ));
    output.push_str("  get(\n");
    output.push_str(&format!("    doc: {},\n", doc));
    output.push_str("    docInfo?: { fields?: string[] },\n");
    output.push_str("    executionOptions?: string | cassandra.mapping.MappingExecutionOptions,\n");
    output.push_str(&format!("  ): Promise<null | {}>;\n", entity));
    output.push_str("}\n\n");

    output.push_str(&format!(
        "const {} = mapper.forModel('{}') as {}Mapper;\n",
        entity, entity, entity
    ));
    output.push_str(&format!("export default {};\n", entity));

    output
}

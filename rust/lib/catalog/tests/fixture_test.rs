/// Catalog fixtures feeding the schema normalizer
use scylla_gen_catalog::{CatalogSource, FixtureCatalog};
use scylla_gen_codegen::{normalize, ClusteringOrder, ColumnKind, KeyModel};

const SYSTEM_SCHEMA_DUMP: &str = r#"[
  {"keyspace_name": "iot", "table_name": "readings", "column_name": "sensor_id",
   "clustering_order": "none", "kind": "partition_key", "position": 0, "type": "uuid"},
  {"keyspace_name": "iot", "table_name": "readings", "column_name": "day",
   "clustering_order": "none", "kind": "partition_key", "position": 1, "type": "date"},
  {"keyspace_name": "iot", "table_name": "readings", "column_name": "ts",
   "clustering_order": "desc", "kind": "clustering", "position": 0, "type": "timestamp"},
  {"keyspace_name": "iot", "table_name": "readings", "column_name": "value",
   "clustering_order": "none", "kind": "regular", "position": -1, "type": "double"},
  {"keyspace_name": "iot", "table_name": "readings", "column_name": "site",
   "clustering_order": "none", "kind": "static", "position": -1, "type": "text"}
]"#;

#[tokio::test]
async fn test_fixture_rows_normalize() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("iot.json");
    std::fs::write(&path, SYSTEM_SCHEMA_DUMP).unwrap();

    let catalog = FixtureCatalog::load(&path).unwrap();
    let rows = catalog
        .fetch_columns("iot", &["readings".to_string()])
        .await
        .unwrap();
    assert_eq!(rows.len(), 5);

    let schemas = normalize(rows, &["readings".to_string()]).unwrap();
    let readings = &schemas["readings"];
    assert_eq!(readings.columns[4].kind, ColumnKind::Static);
    assert_eq!(readings.clustering_keys()[0].clustering_order, ClusteringOrder::Desc);

    let key_model = KeyModel::derive(readings);
    let partition: Vec<&str> = key_model
        .partition_key_fields
        .iter()
        .map(|f| f.name.as_str())
        .collect();
    assert_eq!(partition, ["sensorId", "day"]);
    assert_eq!(key_model.clustering_prefixes.len(), 1);
    println!("✅ fixture normalized");
}

#[tokio::test]
async fn test_other_keyspace_is_empty() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("iot.json");
    std::fs::write(&path, SYSTEM_SCHEMA_DUMP).unwrap();

    let catalog = FixtureCatalog::load(&path).unwrap();
    assert!(catalog.fetch_columns("billing", &[]).await.unwrap().is_empty());
}

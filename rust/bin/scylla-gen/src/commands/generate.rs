//! `scylla-gen generate`: one TypeScript model per table.

use std::collections::HashMap;
use std::path::PathBuf;

use anyhow::Result;
use colored::*;
use scylla_gen_catalog::CatalogSource;
use scylla_gen_codegen::{typescript_model, GeneratedFile, KeyModel};
use thiserror::Error;
use tracing::{debug, error};

use super::load_schemas;
use crate::format;
use crate::sink::{Outcome, Sink, SinkError};

#[derive(Error, Debug)]
pub enum EmitError {
    #[error(transparent)]
    Sink(#[from] SinkError),

    /// Two tables render to the same model file, e.g. `user` and `users`.
    #[error("{path} was already generated from table {first}")]
    DuplicatePath { path: String, first: String },
}

/// Per-run summary of what the sink did with each model.
#[derive(Debug, Default)]
pub struct GenerateReport {
    pub written: Vec<PathBuf>,
    pub skipped: Vec<PathBuf>,
    pub printed: usize,
    pub failed: Vec<(String, EmitError)>,
}

impl GenerateReport {
    /// Fail the run if any table could not be written.
    pub fn into_result(self) -> Result<Self> {
        if self.failed.is_empty() {
            return Ok(self);
        }
        let tables: Vec<&str> = self.failed.iter().map(|(t, _)| t.as_str()).collect();
        anyhow::bail!("could not write models for tables: {}", tables.join(", "))
    }
}

/// Run the formatter over every written model, then fail the run if any
/// table could not be written.
pub fn finish(report: GenerateReport, formatter: Option<&str>) -> Result<GenerateReport> {
    if let Some(command) = formatter {
        format::format_files(command, &report.written)?;
    }
    report.into_result()
}

/// Render every requested table and hand the models to `sink`.
///
/// A sink failure only affects its own table; the remaining tables are still
/// emitted and the failures are collected in the report. A table whose model
/// path was already produced in this run is not emitted at all.
pub async fn generate<C: CatalogSource>(
    catalog: &C,
    keyspace: &str,
    tables: &[String],
    sink: &mut dyn Sink,
) -> Result<GenerateReport> {
    let schemas = load_schemas(catalog, keyspace, tables).await?;
    let mut report = GenerateReport::default();
    let mut paths: HashMap<String, String> = HashMap::new();

    for (table, schema) in &schemas {
        let key_model = KeyModel::derive(schema);
        debug!(
            table = %table,
            partition_keys = key_model.partition_key_fields.len(),
            prefixes = key_model.clustering_prefixes.len(),
            "derived key model"
        );

        let file: GeneratedFile = typescript_model::render(schema, &key_model).into();
        if let Some(first) = paths.get(&file.path) {
            let err = EmitError::DuplicatePath {
                path: file.path.clone(),
                first: first.clone(),
            };
            error!(table = %table, "{}", err);
            report.failed.push((table.clone(), err));
            continue;
        }
        paths.insert(file.path.clone(), table.clone());

        match sink.emit(&file) {
            Ok(Outcome::Written(path)) => {
                eprintln!("{} {}", "wrote".green().bold(), path.display());
                report.written.push(path);
            }
            Ok(Outcome::Skipped(path)) => {
                eprintln!("{} {}", "skipped".yellow().bold(), path.display());
                report.skipped.push(path);
            }
            Ok(Outcome::Printed) => report.printed += 1,
            Err(err) => {
                error!(table = %table, "{}", err);
                report.failed.push((table.clone(), err.into()));
            }
        }
    }

    Ok(report)
}

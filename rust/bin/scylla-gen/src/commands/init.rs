//! `scylla-gen init`: write the shared client and helper types.

use anyhow::Result;
use colored::*;
use scylla_gen_codegen::scaffold::scaffold_files;

use crate::sink::{Outcome, Sink};

pub fn init(sink: &mut dyn Sink) -> Result<Vec<Outcome>> {
    let mut outcomes = Vec::new();
    for file in scaffold_files() {
        let outcome = sink.emit(&file)?;
        match &outcome {
            Outcome::Written(path) => {
                eprintln!("{} {}", "created".green().bold(), path.display())
            }
            Outcome::Skipped(path) => {
                eprintln!("{} {}", "kept".yellow().bold(), path.display())
            }
            Outcome::Printed => {}
        }
        outcomes.push(outcome);
    }
    Ok(outcomes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::{FileSink, OverwritePolicy};
    use scylla_gen_codegen::scaffold::{CLUSTERING_ORDER_FILE, DB_CLIENT_FILE};

    #[test]
    fn test_init_respects_existing_client() {
        let dir = tempfile::tempdir().unwrap();
        let client = dir.path().join(DB_CLIENT_FILE);
        std::fs::write(&client, "export const dbClient = custom;\n").unwrap();

        let mut sink = FileSink::new(dir.path(), OverwritePolicy::Ask, Box::new(|_: &str| false));
        let outcomes = init(&mut sink).unwrap();

        assert_eq!(
            outcomes,
            [
                Outcome::Skipped(client.clone()),
                Outcome::Written(dir.path().join(CLUSTERING_ORDER_FILE)),
            ]
        );
        assert_eq!(
            std::fs::read_to_string(&client).unwrap(),
            "export const dbClient = custom;\n"
        );
    }
}

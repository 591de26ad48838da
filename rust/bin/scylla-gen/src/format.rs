//! External source formatter run over freshly written models.

use std::path::PathBuf;
use std::process::Command;

use thiserror::Error;
use tracing::{debug, info};

#[derive(Error, Debug)]
pub enum FormatError {
    #[error("formatter command is empty")]
    Empty,

    #[error("failed to run {program}: {source}")]
    Spawn {
        program: String,
        source: std::io::Error,
    },

    #[error("{program} exited with {status}")]
    Failed {
        program: String,
        status: std::process::ExitStatus,
    },
}

/// Run `command` (program and leading arguments, whitespace separated) with
/// the written files appended.
pub fn format_files(command: &str, files: &[PathBuf]) -> Result<(), FormatError> {
    let mut parts = command.split_whitespace();
    let program = parts.next().ok_or(FormatError::Empty)?;
    if files.is_empty() {
        return Ok(());
    }

    info!(program, count = files.len(), "formatting models");
    let status = Command::new(program)
        .args(parts)
        .args(files)
        .status()
        .map_err(|source| FormatError::Spawn {
            program: program.to_string(),
            source,
        })?;

    if !status.success() {
        return Err(FormatError::Failed {
            program: program.to_string(),
            status,
        });
    }
    debug!(program, "formatter finished");
    Ok(())
}

//! Where generated files go: the terminal or the models directory.

use std::io::{BufRead, Write};
use std::path::PathBuf;

use scylla_gen_codegen::GeneratedFile;
use thiserror::Error;
use tracing::{debug, info};

use crate::highlight::Highlighter;

#[derive(Error, Debug)]
pub enum SinkError {
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to print {path}: {source}")]
    Print {
        path: String,
        source: std::io::Error,
    },

    #[error("failed to read confirmation: {0}")]
    Confirm(std::io::Error),
}

/// What happened to one emitted file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Printed,
    Written(PathBuf),
    Skipped(PathBuf),
}

pub trait Sink {
    fn emit(&mut self, file: &GeneratedFile) -> Result<Outcome, SinkError>;
}

/// Asks whether an existing file may be replaced.
pub trait Confirm {
    fn confirm(&self, prompt: &str) -> std::io::Result<bool>;
}

impl<F> Confirm for F
where
    F: Fn(&str) -> bool,
{
    fn confirm(&self, prompt: &str) -> std::io::Result<bool> {
        Ok(self(prompt))
    }
}

/// Interactive y/N prompt on stderr, answered on stdin.
pub struct TerminalConfirm;

impl Confirm for TerminalConfirm {
    fn confirm(&self, prompt: &str) -> std::io::Result<bool> {
        eprint!("{} [y/N]: ", prompt);
        std::io::stderr().flush()?;
        let mut answer = String::new();
        std::io::stdin().lock().read_line(&mut answer)?;
        Ok(answer.trim().eq_ignore_ascii_case("y"))
    }
}

/// Prints files, highlighted when the writer is a terminal.
pub struct ConsoleSink<W: Write> {
    out: W,
    highlight: bool,
}

impl<W: Write> ConsoleSink<W> {
    pub fn new(out: W, highlight: bool) -> Self {
        Self { out, highlight }
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Sink for ConsoleSink<W> {
    fn emit(&mut self, file: &GeneratedFile) -> Result<Outcome, SinkError> {
        let text = Highlighter::new(file.language, self.highlight).highlight(&file.content);
        writeln!(self.out, "{}", text).map_err(|source| SinkError::Print {
            path: file.path.clone(),
            source,
        })?;
        Ok(Outcome::Printed)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverwritePolicy {
    /// Replace existing files without asking.
    Always,
    /// Ask before replacing; leave the file alone on refusal.
    Ask,
}

/// Writes files into a directory, creating it on first use.
pub struct FileSink {
    dir: PathBuf,
    policy: OverwritePolicy,
    confirm: Box<dyn Confirm>,
}

impl FileSink {
    pub fn new(dir: impl Into<PathBuf>, policy: OverwritePolicy, confirm: Box<dyn Confirm>) -> Self {
        Self {
            dir: dir.into(),
            policy,
            confirm,
        }
    }
}

impl Sink for FileSink {
    fn emit(&mut self, file: &GeneratedFile) -> Result<Outcome, SinkError> {
        let path = self.dir.join(&file.path);

        if path.exists() && self.policy == OverwritePolicy::Ask {
            let prompt = format!("{} already exists. Overwrite?", path.display());
            if !self.confirm.confirm(&prompt).map_err(SinkError::Confirm)? {
                info!(path = %path.display(), "kept existing file");
                return Ok(Outcome::Skipped(path));
            }
        }

        std::fs::create_dir_all(&self.dir).map_err(|source| SinkError::Write {
            path: self.dir.clone(),
            source,
        })?;
        std::fs::write(&path, &file.content).map_err(|source| SinkError::Write {
            path: path.clone(),
            source,
        })?;

        debug!(path = %path.display(), bytes = file.content.len(), "wrote file");
        Ok(Outcome::Written(path))
    }
}

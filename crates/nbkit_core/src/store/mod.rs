//! Notebook file persistence.
//!
//! # Responsibility
//! - Read and parse `.ipynb` files into the typed model.
//! - Serialize notebooks in the canonical nbformat layout.
//!
//! # Invariants
//! - Parsed documents always carry nbformat major version 4.
//! - Serialized output is deterministic for equal documents.

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

mod file;

pub use file::{read_notebook, to_canonical_json, write_notebook};

pub type NotebookResult<T> = Result<T, NotebookError>;

/// Error for notebook read, parse and write operations.
#[derive(Debug)]
pub enum NotebookError {
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Input is not a well-formed notebook document.
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    UnsupportedVersion {
        path: PathBuf,
        nbformat: u32,
    },
    Serialize(serde_json::Error),
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl Display for NotebookError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Read { path, source } => {
                write!(f, "failed to read notebook `{}`: {source}", path.display())
            }
            Self::Parse { path, source } => {
                write!(f, "failed to parse notebook `{}`: {source}", path.display())
            }
            Self::UnsupportedVersion { path, nbformat } => write!(
                f,
                "notebook `{}` uses nbformat {nbformat}; only nbformat 4 is supported",
                path.display()
            ),
            Self::Serialize(err) => write!(f, "failed to serialize notebook: {err}"),
            Self::Write { path, source } => {
                write!(f, "failed to write notebook `{}`: {source}", path.display())
            }
        }
    }
}

impl Error for NotebookError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Read { source, .. } => Some(source),
            Self::Parse { source, .. } => Some(source),
            Self::UnsupportedVersion { .. } => None,
            Self::Serialize(err) => Some(err),
            Self::Write { source, .. } => Some(source),
        }
    }
}

impl From<serde_json::Error> for NotebookError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serialize(value)
    }
}

//! Directory-level batch processing of notebook files.
//!
//! # Responsibility
//! - Enumerate `.ipynb` files in a source directory.
//! - Dispatch one per-file action at a time and report progress.
//!
//! # Invariants
//! - Files are processed strictly sequentially.
//! - One progress line is written per processed file, before the action runs.
//! - Errors abort the batch; only actions may downgrade failures to outcomes.

use crate::store::NotebookError;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

mod walker;

pub use walker::{
    clean_notebooks, list_notebooks, run_batch, ActionOutcome, BatchSummary, CleanAction,
    NotebookAction, NOTEBOOK_EXTENSION,
};

pub type BatchResult<T> = Result<T, BatchError>;

/// Error for batch enumeration and dispatch.
#[derive(Debug)]
pub enum BatchError {
    DirectoryNotFound(PathBuf),
    ReadDir {
        path: PathBuf,
        source: std::io::Error,
    },
    CreateOutputDir {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Progress sink rejected a write.
    Progress(std::io::Error),
    Notebook(NotebookError),
    /// External converter could not be started at all.
    ConverterLaunch {
        program: String,
        source: std::io::Error,
    },
}

impl Display for BatchError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DirectoryNotFound(path) => {
                write!(f, "notebook directory not found: {}", path.display())
            }
            Self::ReadDir { path, source } => {
                write!(f, "failed to list directory `{}`: {source}", path.display())
            }
            Self::CreateOutputDir { path, source } => write!(
                f,
                "failed to create output directory `{}`: {source}",
                path.display()
            ),
            Self::Progress(err) => write!(f, "failed to report progress: {err}"),
            Self::Notebook(err) => write!(f, "{err}"),
            Self::ConverterLaunch { program, source } => {
                write!(f, "failed to launch converter `{program}`: {source}")
            }
        }
    }
}

impl Error for BatchError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::DirectoryNotFound(_) => None,
            Self::ReadDir { source, .. } => Some(source),
            Self::CreateOutputDir { source, .. } => Some(source),
            Self::Progress(err) => Some(err),
            Self::Notebook(err) => Some(err),
            Self::ConverterLaunch { source, .. } => Some(source),
        }
    }
}

impl From<NotebookError> for BatchError {
    fn from(value: NotebookError) -> Self {
        Self::Notebook(value)
    }
}

//! Core logic for nbkit notebook maintenance jobs.
//! Cleans notebooks for version control and batch-converts them to HTML.

pub mod batch;
pub mod config;
pub mod convert;
pub mod logging;
pub mod model;
pub mod normalize;
pub mod store;

pub use batch::{
    clean_notebooks, list_notebooks, run_batch, ActionOutcome, BatchError, BatchResult,
    BatchSummary, CleanAction, NotebookAction,
};
pub use config::{CleanConfig, ConvertConfig};
pub use convert::{
    convert_notebooks, html_output_path, ConversionStatus, ConvertAction, HtmlConverter,
    NbconvertCommand,
};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::notebook::{Cell, CellKind, Metadata, Notebook};
pub use normalize::{clean_notebook, normalize_notebook, NormalizeStats};
pub use store::{read_notebook, to_canonical_json, write_notebook, NotebookError};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

//! Notebook to HTML conversion through an external converter.
//!
//! # Responsibility
//! - Prepare the output directory and dispatch one conversion per notebook.
//! - Abstract the converter process behind [`HtmlConverter`].
//!
//! # Invariants
//! - The output directory exists before the first conversion starts.
//! - A converter that cannot be launched aborts the batch.
//! - A converter that exits non-zero is logged and the batch continues.

mod nbconvert;

pub use nbconvert::{NbconvertCommand, DEFAULT_CONVERTER_PROGRAM};

use crate::batch::{
    run_batch, ActionOutcome, BatchError, BatchResult, BatchSummary, NotebookAction,
    NOTEBOOK_EXTENSION,
};
use log::{info, warn};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Extension of generated files.
pub const HTML_EXTENSION: &str = "html";

/// Exit state of one converter run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConversionStatus {
    Success,
    /// `code` is `None` when the process was terminated by a signal.
    Failed { code: Option<i32> },
}

/// Converts one notebook file to one HTML file.
pub trait HtmlConverter {
    /// Program name used in diagnostics.
    fn program(&self) -> &str;

    /// Runs the conversion and waits for it to finish.
    ///
    /// Returns `Err` only when the converter could not be started.
    fn convert(&self, input: &Path, output: &Path) -> std::io::Result<ConversionStatus>;
}

/// Maps a notebook path to its HTML target inside `output_dir`.
///
/// The trailing `.ipynb` is swapped for `.html`, so a file named `.ipynb`
/// maps to `.html`.
pub fn html_output_path(output_dir: &Path, notebook: &Path) -> PathBuf {
    let file_name = notebook.file_name().map(Path::new).unwrap_or(notebook);
    match file_name
        .to_str()
        .and_then(|name| name.strip_suffix(NOTEBOOK_EXTENSION))
    {
        Some(stem) => output_dir.join(format!("{stem}.{HTML_EXTENSION}")),
        None => output_dir.join(file_name.with_extension(HTML_EXTENSION)),
    }
}

/// Batch action that feeds each notebook to a converter.
pub struct ConvertAction<'c, C: HtmlConverter + ?Sized> {
    converter: &'c C,
    output_dir: PathBuf,
}

impl<'c, C: HtmlConverter + ?Sized> ConvertAction<'c, C> {
    pub fn new(converter: &'c C, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            converter,
            output_dir: output_dir.into(),
        }
    }
}

impl<C: HtmlConverter + ?Sized> NotebookAction for ConvertAction<'_, C> {
    fn progress_line(&self, file_name: &str) -> String {
        format!("Converting {file_name} to HTML")
    }

    fn apply(&mut self, path: &Path) -> BatchResult<ActionOutcome> {
        let output = html_output_path(&self.output_dir, path);
        let started_at = Instant::now();

        let status = self
            .converter
            .convert(path, &output)
            .map_err(|source| BatchError::ConverterLaunch {
                program: self.converter.program().to_string(),
                source,
            })?;

        match status {
            ConversionStatus::Success => {
                info!(
                    "event=notebook_convert module=convert status=ok input={} output={} duration_ms={}",
                    path.display(),
                    output.display(),
                    started_at.elapsed().as_millis()
                );
                Ok(ActionOutcome::Done)
            }
            ConversionStatus::Failed { code } => {
                warn!(
                    "event=notebook_convert module=convert status=error error_code=converter_failed input={} exit_code={} duration_ms={}",
                    path.display(),
                    code.map_or_else(|| "signal".to_string(), |code| code.to_string()),
                    started_at.elapsed().as_millis()
                );
                Ok(ActionOutcome::Failed)
            }
        }
    }
}

/// Converts every notebook in `input_dir` into `output_dir`.
///
/// # Errors
/// - `CreateOutputDir` when `output_dir` cannot be created.
/// - Walker errors for `input_dir`.
/// - `ConverterLaunch` when the converter is missing.
pub fn convert_notebooks<C, W>(
    input_dir: impl AsRef<Path>,
    output_dir: impl AsRef<Path>,
    converter: &C,
    progress: &mut W,
) -> BatchResult<BatchSummary>
where
    C: HtmlConverter + ?Sized,
    W: Write + ?Sized,
{
    let output_dir = output_dir.as_ref();
    if !output_dir.exists() {
        std::fs::create_dir_all(output_dir).map_err(|source| BatchError::CreateOutputDir {
            path: output_dir.to_path_buf(),
            source,
        })?;
        info!(
            "event=output_dir_create module=convert status=ok path={}",
            output_dir.display()
        );
    }

    let mut action = ConvertAction::new(converter, output_dir);
    run_batch(input_dir, &mut action, progress)
}

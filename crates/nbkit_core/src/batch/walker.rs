//! Directory walker and per-file dispatch.

use super::{BatchError, BatchResult};
use crate::normalize::clean_notebook;
use log::{info, warn};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// File name suffix selecting notebook files.
pub const NOTEBOOK_EXTENSION: &str = ".ipynb";

/// Result of one per-file action that did not abort the batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionOutcome {
    Done,
    /// The action ran but reported failure; the batch continues.
    Failed,
}

/// Per-file operation dispatched by [`run_batch`].
pub trait NotebookAction {
    /// Human-readable progress line for `file_name`, without newline.
    fn progress_line(&self, file_name: &str) -> String;

    /// Performs the action on one notebook.
    fn apply(&mut self, path: &Path) -> BatchResult<ActionOutcome>;
}

/// Totals for one batch run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    /// Files the action was applied to.
    pub processed: usize,
    /// Subset of `processed` whose action reported failure.
    pub failed: usize,
}

/// Lists notebook files in `dir`, sorted by file name.
///
/// Entries that are not regular files, or whose name does not end with
/// `.ipynb`, are skipped.
///
/// # Errors
/// - `DirectoryNotFound` when `dir` is missing or not a directory.
/// - `ReadDir` when the listing itself fails.
pub fn list_notebooks(dir: impl AsRef<Path>) -> BatchResult<Vec<PathBuf>> {
    let dir = dir.as_ref();
    if !dir.is_dir() {
        return Err(BatchError::DirectoryNotFound(dir.to_path_buf()));
    }

    let read_dir_error = |source| BatchError::ReadDir {
        path: dir.to_path_buf(),
        source,
    };

    let mut notebooks = Vec::new();
    for entry in std::fs::read_dir(dir).map_err(read_dir_error)? {
        let entry = entry.map_err(read_dir_error)?;
        let is_notebook_name = entry
            .file_name()
            .to_str()
            .is_some_and(|name| name.ends_with(NOTEBOOK_EXTENSION));
        if is_notebook_name && entry.path().is_file() {
            notebooks.push(entry.path());
        }
    }
    notebooks.sort();
    Ok(notebooks)
}

/// Applies `action` to every notebook in `dir`, one at a time.
///
/// Writes the action's progress line to `progress` before each file.
pub fn run_batch<A, W>(
    dir: impl AsRef<Path>,
    action: &mut A,
    progress: &mut W,
) -> BatchResult<BatchSummary>
where
    A: NotebookAction + ?Sized,
    W: Write + ?Sized,
{
    let dir = dir.as_ref();
    let started_at = Instant::now();
    let notebooks = list_notebooks(dir)?;
    info!(
        "event=batch_run module=batch status=start dir={} files={}",
        dir.display(),
        notebooks.len()
    );

    let mut summary = BatchSummary::default();
    for path in &notebooks {
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        writeln!(progress, "{}", action.progress_line(&file_name))
            .map_err(BatchError::Progress)?;

        summary.processed += 1;
        if action.apply(path)? == ActionOutcome::Failed {
            summary.failed += 1;
            warn!(
                "event=batch_item module=batch status=failed path={}",
                path.display()
            );
        }
    }

    info!(
        "event=batch_run module=batch status=ok dir={} processed={} failed={} duration_ms={}",
        dir.display(),
        summary.processed,
        summary.failed,
        started_at.elapsed().as_millis()
    );
    Ok(summary)
}

/// Cleans each notebook in place.
#[derive(Debug, Default)]
pub struct CleanAction;

impl NotebookAction for CleanAction {
    fn progress_line(&self, file_name: &str) -> String {
        format!("Cleaning {file_name}")
    }

    fn apply(&mut self, path: &Path) -> BatchResult<ActionOutcome> {
        clean_notebook(path)?;
        Ok(ActionOutcome::Done)
    }
}

/// Cleans every notebook in `input_dir`.
pub fn clean_notebooks<W>(
    input_dir: impl AsRef<Path>,
    progress: &mut W,
) -> BatchResult<BatchSummary>
where
    W: Write + ?Sized,
{
    run_batch(input_dir, &mut CleanAction, progress)
}

#[cfg(test)]
mod tests {
    use super::{run_batch, ActionOutcome, BatchResult, NotebookAction};
    use std::path::{Path, PathBuf};

    struct Recorder {
        seen: Vec<PathBuf>,
        fail_on: Option<&'static str>,
    }

    impl NotebookAction for Recorder {
        fn progress_line(&self, file_name: &str) -> String {
            format!("visit {file_name}")
        }

        fn apply(&mut self, path: &Path) -> BatchResult<ActionOutcome> {
            self.seen.push(path.to_path_buf());
            let failed = self
                .fail_on
                .is_some_and(|name| path.file_name().is_some_and(|file| file == name));
            Ok(if failed {
                ActionOutcome::Failed
            } else {
                ActionOutcome::Done
            })
        }
    }

    #[test]
    fn failed_outcomes_are_counted_without_stopping() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("a.ipynb"), "{}").unwrap();
        std::fs::write(dir.path().join("b.ipynb"), "{}").unwrap();

        let mut action = Recorder {
            seen: Vec::new(),
            fail_on: Some("a.ipynb"),
        };
        let mut progress: Vec<u8> = Vec::new();
        let summary = run_batch(dir.path(), &mut action, &mut progress).unwrap();

        assert_eq!(summary.processed, 2);
        assert_eq!(summary.failed, 1);
        assert_eq!(action.seen.len(), 2);
        assert_eq!(
            String::from_utf8(progress).unwrap(),
            "visit a.ipynb\nvisit b.ipynb\n"
        );
    }

    #[test]
    fn subdirectories_with_notebook_suffix_are_skipped() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("nested.ipynb")).unwrap();

        let mut action = Recorder {
            seen: Vec::new(),
            fail_on: None,
        };
        let mut progress: Vec<u8> = Vec::new();
        let summary = run_batch(dir.path(), &mut action, &mut progress).unwrap();

        assert_eq!(summary.processed, 0);
        assert!(action.seen.is_empty());
    }
}

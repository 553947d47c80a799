//! Notebook cleaning rules.
//!
//! # Responsibility
//! - Strip execution state and editor metadata from notebooks.
//! - Apply the rules in place, then persist through the store layer.
//!
//! # Invariants
//! - Code cells end with `outputs == []` and `execution_count == null`.
//! - Every cell ends with empty metadata.
//! - Document metadata ends with exactly `kernelspec` and `language_info`.
//! - Applying the rules twice equals applying them once.

use crate::model::notebook::{Metadata, Notebook};
use crate::store::{read_notebook, write_notebook, NotebookResult};
use log::info;
use serde_json::Value;
use std::path::Path;
use std::time::Instant;

/// Document metadata keys that survive cleaning.
pub const KEPT_METADATA_KEYS: [&str; 2] = ["kernelspec", "language_info"];

/// Counters describing what a cleaning pass changed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NormalizeStats {
    /// Code cells whose outputs and counter were reset.
    pub code_cells_cleared: usize,
    /// Cells whose metadata was replaced with an empty mapping.
    pub cells_metadata_reset: usize,
    /// Document metadata keys dropped.
    pub metadata_keys_dropped: usize,
}

/// Applies the cleaning rules to an in-memory notebook.
pub fn normalize_notebook(notebook: &mut Notebook) -> NormalizeStats {
    let mut stats = NormalizeStats::default();

    for cell in &mut notebook.cells {
        if cell.cell_type.is_code() {
            cell.outputs = Some(Vec::new());
            cell.execution_count = Some(None);
            stats.code_cells_cleared += 1;
        }
        cell.metadata = Metadata::new();
        stats.cells_metadata_reset += 1;
    }

    let mut previous = std::mem::take(&mut notebook.metadata);
    for key in KEPT_METADATA_KEYS {
        let value = previous
            .remove(key)
            .unwrap_or_else(|| Value::Object(Metadata::new()));
        notebook.metadata.insert(key.to_string(), value);
    }
    stats.metadata_keys_dropped = previous.len();

    stats
}

/// Cleans the notebook at `path`, overwriting it with the normalized form.
///
/// # Errors
/// - Read, parse and version errors from the store layer.
/// - Write errors when the file cannot be overwritten.
pub fn clean_notebook(path: impl AsRef<Path>) -> NotebookResult<NormalizeStats> {
    let path = path.as_ref();
    let started_at = Instant::now();

    let mut notebook = read_notebook(path)?;
    let stats = normalize_notebook(&mut notebook);
    write_notebook(path, &notebook)?;

    info!(
        "event=notebook_clean module=normalize status=ok path={} code_cells={} cells={} dropped_keys={} duration_ms={}",
        path.display(),
        stats.code_cells_cleared,
        stats.cells_metadata_reset,
        stats.metadata_keys_dropped,
        started_at.elapsed().as_millis()
    );
    Ok(stats)
}

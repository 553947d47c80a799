//! File-backed notebook read/write.
//!
//! # Responsibility
//! - Load notebook JSON from disk and validate its format version.
//! - Write notebooks back with nbformat's on-disk layout: one-space indent,
//!   sorted keys, raw UTF-8, trailing newline, cell `source` as a list of
//!   lines.
//!
//! # Invariants
//! - Writes overwrite the target in place; no backup is kept.
//! - Equal content renders to equal bytes whether `source` was read as one
//!   string or as a list of lines.

use super::{NotebookError, NotebookResult};
use crate::model::notebook::{Notebook, SUPPORTED_NBFORMAT};
use log::{debug, error};
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::{Map, Serializer, Value};
use std::path::Path;

const INDENT: &[u8] = b" ";

/// Reads and parses a notebook file.
///
/// # Errors
/// - `Read` when the file cannot be opened or read.
/// - `Parse` when the content is not a well-formed notebook.
/// - `UnsupportedVersion` when `nbformat` is not 4.
pub fn read_notebook(path: impl AsRef<Path>) -> NotebookResult<Notebook> {
    let path = path.as_ref();
    let raw = std::fs::read_to_string(path).map_err(|source| NotebookError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let notebook: Notebook = serde_json::from_str(&raw).map_err(|source| {
        error!(
            "event=notebook_read module=store status=error error_code=parse_failed path={} error={}",
            path.display(),
            source
        );
        NotebookError::Parse {
            path: path.to_path_buf(),
            source,
        }
    })?;

    if notebook.nbformat != SUPPORTED_NBFORMAT {
        return Err(NotebookError::UnsupportedVersion {
            path: path.to_path_buf(),
            nbformat: notebook.nbformat,
        });
    }

    debug!(
        "event=notebook_read module=store status=ok path={} cells={}",
        path.display(),
        notebook.cells.len()
    );
    Ok(notebook)
}

/// Renders a notebook in canonical on-disk form.
pub fn to_canonical_json(notebook: &Notebook) -> NotebookResult<String> {
    let mut value = serde_json::to_value(notebook)?;
    split_cell_sources(&mut value);
    let value = sort_keys(value);

    let mut buffer = Vec::new();
    let mut serializer =
        Serializer::with_formatter(&mut buffer, PrettyFormatter::with_indent(INDENT));
    value.serialize(&mut serializer)?;
    buffer.push(b'\n');

    // serde_json only emits valid UTF-8.
    Ok(String::from_utf8_lossy(&buffer).into_owned())
}

/// Serializes `notebook` and overwrites `path` with the result.
pub fn write_notebook(path: impl AsRef<Path>, notebook: &Notebook) -> NotebookResult<()> {
    let path = path.as_ref();
    let rendered = to_canonical_json(notebook)?;
    std::fs::write(path, rendered).map_err(|source| {
        error!(
            "event=notebook_write module=store status=error error_code=write_failed path={} error={}",
            path.display(),
            source
        );
        NotebookError::Write {
            path: path.to_path_buf(),
            source,
        }
    })
}

fn split_cell_sources(document: &mut Value) {
    let Some(cells) = document.get_mut("cells").and_then(Value::as_array_mut) else {
        return;
    };
    for cell in cells {
        let Some(Value::String(text)) = cell.get("source") else {
            continue;
        };
        let lines = split_lines_keep_ends(text)
            .into_iter()
            .map(Value::String)
            .collect();
        cell["source"] = Value::Array(lines);
    }
}

/// Splits text after each line break, keeping the break.
///
/// Recognizes the same boundaries as Python's `str.splitlines`, with
/// `\r\n` counted as one break. Empty text yields no lines.
fn split_lines_keep_ends(text: &str) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut chars = text.chars().peekable();
    while let Some(ch) = chars.next() {
        current.push(ch);
        let is_break = match ch {
            '\r' => {
                if chars.peek() == Some(&'\n') {
                    current.push('\n');
                    chars.next();
                }
                true
            }
            '\n' | '\u{0b}' | '\u{0c}' | '\u{1c}' | '\u{1d}' | '\u{1e}' | '\u{85}'
            | '\u{2028}' | '\u{2029}' => true,
            _ => false,
        };
        if is_break {
            lines.push(std::mem::take(&mut current));
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

// Rebuilt explicitly: with serde_json's `preserve_order` feature enabled
// anywhere in the build, `Map` keeps insertion order instead.
fn sort_keys(value: Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut entries: Vec<(String, Value)> = map.into_iter().collect();
            entries.sort_by(|(left, _), (right, _)| left.cmp(right));
            let mut sorted = Map::new();
            for (key, child) in entries {
                sorted.insert(key, sort_keys(child));
            }
            Value::Object(sorted)
        }
        Value::Array(items) => Value::Array(items.into_iter().map(sort_keys).collect()),
        other => other,
    }
}

//! Notebook document model (nbformat v4).
//!
//! # Responsibility
//! - Define the typed shape of a notebook document and its cells.
//! - Keep every field the normalizer does not own round-trippable.
//!
//! # Invariants
//! - `cell_type` strings unknown to this crate are preserved verbatim.
//! - `execution_count` distinguishes "absent" from "present but null".
//! - Unknown cell fields (`source`, `id`, `attachments`, ...) keep their
//!   content through a read/write cycle.
//! - Numbers pass through `Value` so big integers stay exact.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Major nbformat version this crate reads and writes.
pub const SUPPORTED_NBFORMAT: u32 = 4;

/// JSON object used for document and cell metadata.
pub type Metadata = Map<String, Value>;

/// Cell category carried in the `cell_type` field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum CellKind {
    Code,
    Markdown,
    Raw,
    /// Any other tag; kept as-is so foreign notebooks survive cleaning.
    Other(String),
}

impl CellKind {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Code => "code",
            Self::Markdown => "markdown",
            Self::Raw => "raw",
            Self::Other(tag) => tag.as_str(),
        }
    }

    pub fn is_code(&self) -> bool {
        matches!(self, Self::Code)
    }
}

impl From<String> for CellKind {
    fn from(value: String) -> Self {
        match value.as_str() {
            "code" => Self::Code,
            "markdown" => Self::Markdown,
            "raw" => Self::Raw,
            _ => Self::Other(value),
        }
    }
}

impl From<CellKind> for String {
    fn from(value: CellKind) -> Self {
        match value {
            CellKind::Other(tag) => tag,
            other => other.as_str().to_string(),
        }
    }
}

/// One notebook cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cell {
    pub cell_type: CellKind,
    #[serde(default)]
    pub metadata: Metadata,
    /// Present on code cells only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outputs: Option<Vec<Value>>,
    /// `None` = field absent, `Some(None)` = serialized as `null`.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "present_or_null"
    )]
    pub execution_count: Option<Option<u64>>,
    /// Fields this crate does not interpret.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Cell {
    /// Creates a code cell with the given source and no execution state.
    pub fn code(source: impl Into<String>) -> Self {
        Self {
            cell_type: CellKind::Code,
            metadata: Metadata::new(),
            outputs: Some(Vec::new()),
            execution_count: Some(None),
            extra: source_field(source.into()),
        }
    }

    /// Creates a markdown cell with the given source.
    pub fn markdown(source: impl Into<String>) -> Self {
        Self {
            cell_type: CellKind::Markdown,
            metadata: Metadata::new(),
            outputs: None,
            execution_count: None,
            extra: source_field(source.into()),
        }
    }

    /// Returns the cell execution counter, flattening absent and null.
    pub fn execution_count(&self) -> Option<u64> {
        self.execution_count.flatten()
    }
}

/// Whole notebook document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notebook {
    pub cells: Vec<Cell>,
    #[serde(default)]
    pub metadata: Metadata,
    pub nbformat: u32,
    #[serde(default)]
    pub nbformat_minor: u32,
}

impl Notebook {
    /// Creates an empty v4 notebook.
    pub fn new() -> Self {
        Self {
            cells: Vec::new(),
            metadata: Metadata::new(),
            nbformat: SUPPORTED_NBFORMAT,
            nbformat_minor: 5,
        }
    }
}

impl Default for Notebook {
    fn default() -> Self {
        Self::new()
    }
}

fn present_or_null<'de, D>(deserializer: D) -> Result<Option<Option<u64>>, D::Error>
where
    D: Deserializer<'de>,
{
    // Flattened structs buffer their fields, and buffered numbers only
    // decode reliably through `Value`.
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(Some(None)),
        Some(Value::Number(number)) => number
            .as_u64()
            .map(|count| Some(Some(count)))
            .ok_or_else(|| D::Error::custom(format!("invalid execution_count `{number}`"))),
        Some(other) => Err(D::Error::custom(format!(
            "invalid execution_count `{other}`"
        ))),
    }
}

fn source_field(source: String) -> Map<String, Value> {
    let mut extra = Map::new();
    extra.insert("source".to_string(), Value::String(source));
    extra
}

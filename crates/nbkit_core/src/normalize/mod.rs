//! Notebook normalization for version control.
//!
//! # Responsibility
//! - Remove outputs, execution counters and metadata noise from notebooks.
//!
//! # Invariants
//! - Normalization is idempotent, both on the model and on disk bytes.

mod rules;

pub use rules::{clean_notebook, normalize_notebook, NormalizeStats, KEPT_METADATA_KEYS};

//! Notebook document model.
//!
//! # Responsibility
//! - Define the data structures read from and written to `.ipynb` files.
//!
//! # Invariants
//! - Only nbformat v4 documents are modeled.

pub mod notebook;

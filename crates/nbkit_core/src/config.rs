//! Job configuration and default locations.
//!
//! # Responsibility
//! - Hold the directories and converter program each job runs with.
//! - Provide the defaults used when the caller overrides nothing.
//!
//! # Invariants
//! - Defaults are relative paths, resolved against the process working
//!   directory.

use crate::convert::DEFAULT_CONVERTER_PROGRAM;
use std::path::PathBuf;

/// Default source directory for both jobs.
pub const DEFAULT_INPUT_DIR: &str = "../notebooks";
/// Default destination directory for HTML output.
pub const DEFAULT_OUTPUT_DIR: &str = "../html";

/// Settings for the clean job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CleanConfig {
    pub input_dir: PathBuf,
}

impl Default for CleanConfig {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from(DEFAULT_INPUT_DIR),
        }
    }
}

/// Settings for the convert job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertConfig {
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
    /// Executable providing the `nbconvert` subcommand.
    pub converter_program: String,
}

impl Default for ConvertConfig {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from(DEFAULT_INPUT_DIR),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            converter_program: DEFAULT_CONVERTER_PROGRAM.to_string(),
        }
    }
}

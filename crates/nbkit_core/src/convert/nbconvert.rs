//! `jupyter nbconvert` process adapter.

use super::{ConversionStatus, HtmlConverter};
use log::debug;
use std::path::Path;
use std::process::Command;

/// Default converter executable.
pub const DEFAULT_CONVERTER_PROGRAM: &str = "jupyter";

/// Runs `<program> nbconvert --to html <input> --output <output>`.
///
/// The child inherits stdout/stderr; its output is not captured.
#[derive(Debug, Clone)]
pub struct NbconvertCommand {
    program: String,
}

impl NbconvertCommand {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Builds the command line without running it.
    pub fn command(&self, input: &Path, output: &Path) -> Command {
        let mut command = Command::new(&self.program);
        command
            .arg("nbconvert")
            .arg("--to")
            .arg("html")
            .arg(input)
            .arg("--output")
            .arg(output);
        command
    }
}

impl Default for NbconvertCommand {
    fn default() -> Self {
        Self::new(DEFAULT_CONVERTER_PROGRAM)
    }
}

impl HtmlConverter for NbconvertCommand {
    fn program(&self) -> &str {
        &self.program
    }

    fn convert(&self, input: &Path, output: &Path) -> std::io::Result<ConversionStatus> {
        debug!(
            "event=converter_spawn module=convert status=start program={} input={}",
            self.program,
            input.display()
        );
        let status = self.command(input, output).status()?;
        if status.success() {
            Ok(ConversionStatus::Success)
        } else {
            Ok(ConversionStatus::Failed {
                code: status.code(),
            })
        }
    }
}

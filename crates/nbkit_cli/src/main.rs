//! `nbkit` command-line entry point.
//!
//! # Responsibility
//! - Parse job selection and path overrides.
//! - Run one job and map failures to a non-zero exit status.

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use log::info;
use nbkit_core::{
    clean_notebooks, convert_notebooks, core_version, default_log_level, init_logging,
    BatchSummary, CleanConfig, ConvertConfig, NbconvertCommand,
};
use std::path::{Path, PathBuf};

/// Notebook maintenance jobs.
#[derive(Parser, Debug)]
#[command(name = "nbkit", version, about = "Clean notebooks and convert them to HTML")]
struct Cli {
    /// Absolute directory for rolling log files; logging is off when omitted
    #[arg(long, global = true)]
    log_dir: Option<PathBuf>,

    /// Log level (trace|debug|info|warn|error); needs --log-dir
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Strip outputs, execution counts and metadata from every notebook
    Clean(CleanArgs),
    /// Render every notebook to HTML with `jupyter nbconvert`
    Convert(ConvertArgs),
}

#[derive(Args, Debug)]
struct CleanArgs {
    /// Directory containing .ipynb files
    #[arg(long)]
    input_dir: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct ConvertArgs {
    /// Directory containing .ipynb files
    #[arg(long)]
    input_dir: Option<PathBuf>,

    /// Directory receiving .html files; created when missing
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// Executable providing the `nbconvert` subcommand
    #[arg(long)]
    converter: Option<String>,
}

impl CleanArgs {
    fn into_config(self) -> CleanConfig {
        let mut config = CleanConfig::default();
        if let Some(input_dir) = self.input_dir {
            config.input_dir = input_dir;
        }
        config
    }
}

impl ConvertArgs {
    fn into_config(self) -> ConvertConfig {
        let mut config = ConvertConfig::default();
        if let Some(input_dir) = self.input_dir {
            config.input_dir = input_dir;
        }
        if let Some(output_dir) = self.output_dir {
            config.output_dir = output_dir;
        }
        if let Some(converter) = self.converter {
            config.converter_program = converter;
        }
        config
    }
}

impl Cli {
    /// Level and directory for file logging, `None` when logging stays off.
    fn logging(&self) -> Result<Option<(&str, &Path)>> {
        match (&self.log_dir, self.log_level.as_deref()) {
            (Some(dir), level) => {
                let level = level.unwrap_or(default_log_level());
                Ok(Some((level, dir.as_path())))
            }
            (None, Some(level)) => {
                bail!("--log-level {level} has no effect without --log-dir")
            }
            (None, None) => Ok(None),
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some((level, log_dir)) = cli.logging()? {
        init_logging(level, log_dir).context("Failed to initialize logging")?;
        info!(
            "event=cli_start module=cli status=ok core_version={}",
            core_version()
        );
    }

    let mut stdout = std::io::stdout().lock();
    match cli.command {
        Command::Clean(args) => {
            let config = args.into_config();
            clean_notebooks(&config.input_dir, &mut stdout).with_context(|| {
                format!("Failed to clean notebooks in {}", config.input_dir.display())
            })?;
        }
        Command::Convert(args) => {
            let config = args.into_config();
            let converter = NbconvertCommand::new(config.converter_program.clone());
            let summary =
                convert_notebooks(&config.input_dir, &config.output_dir, &converter, &mut stdout)
                    .with_context(|| {
                        format!(
                            "Failed to convert notebooks in {}",
                            config.input_dir.display()
                        )
                    })?;
            report_failed_conversions(&summary);
        }
    }

    Ok(())
}

fn report_failed_conversions(summary: &BatchSummary) {
    if summary.failed > 0 {
        eprintln!(
            "warning: {} of {} conversions failed",
            summary.failed, summary.processed
        );
    }
}

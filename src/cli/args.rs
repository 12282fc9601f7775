//! Command-line argument definitions

use std::path::PathBuf;

use clap::Args;

use crate::app::inspect_interactor::OutputFormat;

/// Arguments for the probe command
#[derive(Args, Debug)]
pub struct ProbeArgs {
    /// Media file to probe
    pub input: PathBuf,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,
}

/// Arguments for the validate command
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// JSON files, or directories searched recursively for `*.json`
    #[arg(required = true)]
    pub paths: Vec<PathBuf>,

    /// Output a machine-readable JSON report
    #[arg(long)]
    pub json: bool,
}

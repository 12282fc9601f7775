//! CLI module for probeshape
//!
//! This module handles command-line argument parsing and command execution.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::adapters::toml_config::{AppConfig, TomlConfigAdapter};
use crate::error::{ProbeError, ProbeResult};
use crate::utils::logging::{LogFormat, LogLevel};

pub mod args;
pub mod commands;

/// probeshape - strict, typed validation of ffprobe JSON output
#[derive(Parser, Debug)]
#[command(name = "probeshape")]
#[command(about = "Run ffprobe and check its JSON output against a strict schema")]
#[command(version)]
#[command(long_about = None)]
pub struct Cli {
    /// Configuration file (defaults to ./probeshape.toml when present)
    #[arg(long, env = "PROBESHAPE_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Logging level (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Log output format (pretty, compact, json)
    #[arg(long, global = true)]
    pub log_format: Option<String>,

    /// ffprobe executable to run
    #[arg(long, global = true)]
    pub ffprobe: Option<String>,

    /// Seconds before a running ffprobe is killed
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    /// The command to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Probe a media file and print its validated description
    Probe(args::ProbeArgs),
    /// Validate captured ffprobe JSON documents
    Validate(args::ValidateArgs),
}

impl Cli {
    /// Load file and environment configuration, then apply command-line
    /// overrides on top.
    pub fn resolve_config(&self) -> ProbeResult<AppConfig> {
        let mut config = TomlConfigAdapter::load(self.config.as_deref())?;
        self.apply_overrides(&mut config)?;
        TomlConfigAdapter::validate(&config)?;
        Ok(config)
    }

    fn apply_overrides(&self, config: &mut AppConfig) -> Result<(), ProbeError> {
        if let Some(level) = &self.log_level {
            config.logging.level = LogLevel::parse(level)?;
        }
        if let Some(format) = &self.log_format {
            config.logging.format = LogFormat::parse(format)?;
        }
        if let Some(program) = &self.ffprobe {
            config.ffprobe.program = program.clone();
        }
        if let Some(timeout) = self.timeout {
            config.ffprobe.timeout_secs = timeout;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_probe_command_parses() {
        let cli = Cli::try_parse_from(["probeshape", "probe", "movie.mp4", "--format", "text"])
            .unwrap();
        match cli.command {
            Commands::Probe(args) => {
                assert_eq!(args.input, PathBuf::from("movie.mp4"));
                assert_eq!(args.format, crate::app::inspect_interactor::OutputFormat::Text);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_global_flags_override_config() {
        let cli = Cli::try_parse_from([
            "probeshape",
            "validate",
            "captures",
            "--ffprobe",
            "/usr/local/bin/ffprobe",
            "--timeout",
            "7",
            "--log-format",
            "json",
        ])
        .unwrap();

        let mut config = AppConfig::default();
        cli.apply_overrides(&mut config).unwrap();
        assert_eq!(config.ffprobe.program, "/usr/local/bin/ffprobe");
        assert_eq!(config.ffprobe.timeout_secs, 7);
        assert_eq!(config.logging.format, LogFormat::Json);
        assert_eq!(config.logging.level, LogLevel::Info);
    }

    #[test]
    fn test_bad_log_level_rejected() {
        let cli = Cli::try_parse_from(["probeshape", "validate", "x.json", "--log-level", "loud"])
            .unwrap();
        let mut config = AppConfig::default();
        assert!(cli.apply_overrides(&mut config).is_err());
    }

    #[test]
    fn test_validate_requires_a_path() {
        assert!(Cli::try_parse_from(["probeshape", "validate"]).is_err());
    }
}

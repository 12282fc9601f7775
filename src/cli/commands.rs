//! Command implementations

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;

use crate::adapters::probe_ffprobe::FfprobeAdapter;
use crate::adapters::toml_config::AppConfig;
use crate::app::inspect_interactor::{InspectInteractor, InspectRequest};
use crate::app::validate_interactor::{Outcome, ValidateInteractor, ValidationReport};
use crate::cli::args::{ProbeArgs, ValidateArgs};

/// Execute the probe command
pub async fn probe(args: ProbeArgs, config: &AppConfig) -> Result<()> {
    info!("Starting probe operation");
    info!("Input: {}", args.input.display());

    let adapter = FfprobeAdapter::new(&config.ffprobe);
    let interactor = InspectInteractor::new(Arc::new(adapter));
    let response = interactor
        .execute(InspectRequest {
            input: args.input.clone(),
            format: args.format,
        })
        .await
        .with_context(|| format!("Failed to probe {}", args.input.display()))?;

    print!("{}", response.rendered);
    if !response.rendered.ends_with('\n') {
        println!();
    }
    Ok(())
}

/// Execute the validate command
pub fn validate(args: ValidateArgs) -> Result<()> {
    info!("Validating {} path(s)", args.paths.len());

    let report = ValidateInteractor::new()
        .execute(&args.paths)
        .context("Failed to collect documents")?;

    if args.json {
        let json = serde_json::to_string_pretty(&report).context("Failed to serialize report")?;
        println!("{}", json);
    } else {
        print!("{}", format_report(&report));
    }

    let failures = report.failures();
    if failures > 0 {
        anyhow::bail!(
            "{} of {} document(s) failed validation",
            failures,
            report.files.len()
        );
    }
    Ok(())
}

/// Human-readable report, one line per file plus indented violations
pub fn format_report(report: &ValidationReport) -> String {
    let mut text = String::new();
    for file in &report.files {
        let path = file.path.display();
        match &file.outcome {
            Outcome::Valid { streams } => {
                text.push_str(&format!("ok    {} ({} streams)\n", path, streams));
            }
            Outcome::SyntaxError { message } | Outcome::Unreadable { message } => {
                text.push_str(&format!("FAIL  {}: {}\n", path, message));
            }
            Outcome::SchemaViolation { violations } => {
                text.push_str(&format!("FAIL  {}: {} violation(s)\n", path, violations.len()));
                for violation in violations {
                    text.push_str(&format!("      {}\n", violation));
                }
            }
        }
    }
    text.push_str(&format!(
        "{} checked, {} failed\n",
        report.files.len(),
        report.failures()
    ));
    text
}

//! probeshape CLI
//!
//! # Usage
//!
//! ```bash
//! probeshape probe movie.mp4 --format text
//! probeshape validate captures/ --json
//! ```

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use probeshape::cli::{commands, Cli, Commands};
use probeshape::utils::logging::init_logging;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = cli.resolve_config().context("Failed to load configuration")?;
    init_logging(&config.logging);

    info!("Starting probeshape");

    match cli.command {
        Commands::Probe(args) => {
            info!("Executing probe command");
            commands::probe(args, &config).await?;
        }
        Commands::Validate(args) => {
            info!("Executing validate command");
            commands::validate(args)?;
        }
    }

    info!("probeshape completed successfully");
    Ok(())
}

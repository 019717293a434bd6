//! # SMS Sender CLI
//!
//! Command-line entry point.
//!
//! Provides:
//! - Configuration loading and CLI overrides
//! - Logging and diagnostics setup (one sink, injected everywhere)
//! - Command dispatch; a rejected recipient list exits with failure status

mod cli;
mod commands;
mod error;
mod summary;

use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use config_loader::ConfigLoader;
use contracts::{DiagnosticSink, SenderConfig};
use observability::{ObservabilityConfig, TracingDiagnostics};
use tracing::info;

use cli::{Cli, Commands};
use commands::{run_info, run_send, run_validate};
use error::CliError;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = ConfigLoader::load_or_default(cli.config.as_deref()).map_err(CliError::from)?;

    init_logging(&cli, &config)?;

    info!(
        version = env!("CARGO_PKG_VERSION"),
        config = ?cli.config,
        "SMS Sender starting"
    );

    let diagnostics: Arc<dyn DiagnosticSink> = Arc::new(TracingDiagnostics::new());

    let result = match &cli.command {
        Commands::Send(args) => run_send(args, config, diagnostics).await,
        Commands::Validate(args) => run_validate(args, &config, diagnostics),
        Commands::Info(args) => run_info(args, &config, diagnostics),
    };

    if let Err(ref e) = result {
        tracing::error!(error = %e, "Command failed");
    }

    result
}

/// Initialize logging from the configuration, with CLI flags taking precedence
fn init_logging(cli: &Cli, config: &SenderConfig) -> Result<()> {
    let mut observability = ObservabilityConfig::from(&config.logging);

    if let Some(format) = cli.log_format {
        observability.log_format = format.into();
    }

    observability.forced_log_level = if cli.quiet {
        Some("warn".to_string())
    } else {
        match cli.verbose {
            0 => None,
            1 => Some("debug".to_string()),
            _ => Some("trace".to_string()),
        }
    };

    observability::init_with_config(observability)
}

//! `send` command implementation.

use std::sync::Arc;
use std::time::Instant;

use anyhow::Result;
use config_loader::ConfigLoader;
use contracts::{DiagnosticSink, GatewayKind, SenderConfig};
use dispatcher::{create_dispatcher, DispatchError};
use record_loader::RecordLoader;
use tracing::{info, warn};

use super::resolve_input;
use crate::cli::SendArgs;
use crate::error::CliError;
use crate::summary::BatchSummary;

/// Execute the `send` command
pub async fn run_send(
    args: &SendArgs,
    config: SenderConfig,
    diagnostics: Arc<dyn DiagnosticSink>,
) -> Result<()> {
    let config = apply_overrides(args, config);
    ConfigLoader::validate(&config).map_err(CliError::from)?;

    let input = config.input.path.clone();
    info!(
        input = %input.display(),
        gateway = ?config.gateway.kind,
        max_concurrency = ?config.dispatch.max_concurrency,
        "Loading recipient list"
    );

    let loader = RecordLoader::new(Arc::clone(&diagnostics));
    let loaded = loader.load(&input);

    let dispatcher = create_dispatcher(&config, diagnostics);
    let started = Instant::now();

    let report = match dispatcher.run(loaded).await {
        Ok(report) => report,
        Err(DispatchError::Aborted(e)) => {
            warn!("Aborting, validation had failed");
            return Err(CliError::input_rejected(input.display().to_string(), e).into());
        }
        Err(e) => return Err(e.into()),
    };

    let summary = BatchSummary::from_report(&report, dispatcher.metrics(), started.elapsed());
    summary.print();

    if report.is_success() {
        info!(sent = report.sent(), "All messages sent");
        Ok(())
    } else {
        Err(CliError::delivery_failed(report.failed(), report.total()).into())
    }
}

/// Command-line flags win over the configuration file
fn apply_overrides(args: &SendArgs, mut config: SenderConfig) -> SenderConfig {
    config.input.path = resolve_input(args.input.as_deref(), &config);

    if let Some(limit) = args.concurrency {
        info!(limit, "Overriding max concurrency from CLI");
        config.dispatch.max_concurrency = Some(usize::try_from(limit).unwrap_or(usize::MAX));
    }

    if args.dry_run {
        info!("Dry run mode - messages will be logged, not sent");
        config.gateway.kind = GatewayKind::Log;
    }

    config
}

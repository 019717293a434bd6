//! `info` command implementation.

use std::sync::Arc;

use anyhow::{Context, Result};
use config_loader::ConfigLoader;
use contracts::{DiagnosticSink, GatewayKind, RecipientRecord, SenderConfig};
use dispatcher::compose_message;
use record_loader::RecordLoader;
use serde::Serialize;
use tracing::info;

use super::resolve_input;
use crate::cli::InfoArgs;
use crate::error::CliError;

/// Batch info for JSON output
#[derive(Serialize)]
struct BatchInfo<'a> {
    input_path: String,
    gateway: GatewayInfo,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_concurrency: Option<usize>,
    recipients: Vec<RecipientInfo<'a>>,
}

#[derive(Serialize)]
struct GatewayInfo {
    kind: GatewayKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    program: Option<String>,
}

#[derive(Serialize)]
struct RecipientInfo<'a> {
    #[serde(flatten)]
    record: &'a RecipientRecord,
    #[serde(skip_serializing_if = "Option::is_none")]
    composed: Option<String>,
}

/// Execute the `info` command
pub fn run_info(
    args: &InfoArgs,
    config: &SenderConfig,
    diagnostics: Arc<dyn DiagnosticSink>,
) -> Result<()> {
    let input = resolve_input(args.input.as_deref(), config);
    info!(input = %input.display(), "Loading recipient info");

    let records = RecordLoader::new(diagnostics)
        .load(&input)
        .map_err(|e| CliError::input_rejected(input.display().to_string(), e))?;

    let batch = build_batch_info(&input.display().to_string(), config, &records, args.messages);

    if args.json {
        let json =
            serde_json::to_string_pretty(&batch).context("Failed to serialize batch info")?;
        println!("{}", json);
    } else {
        print_batch_info(&batch);
        let effective = ConfigLoader::to_toml(config).map_err(CliError::from)?;
        println!("=== Effective Configuration ===\n");
        println!("{}", effective);
    }

    Ok(())
}

fn build_batch_info<'a>(
    input_path: &str,
    config: &SenderConfig,
    records: &'a [RecipientRecord],
    with_messages: bool,
) -> BatchInfo<'a> {
    let program = match config.gateway.kind {
        GatewayKind::Termux => Some(config.gateway.program.clone()),
        GatewayKind::Log => None,
    };

    BatchInfo {
        input_path: input_path.to_string(),
        gateway: GatewayInfo {
            kind: config.gateway.kind,
            program,
        },
        max_concurrency: config.dispatch.max_concurrency,
        recipients: records
            .iter()
            .map(|record| RecipientInfo {
                record,
                composed: with_messages.then(|| compose_message(record)),
            })
            .collect(),
    }
}

fn print_batch_info(batch: &BatchInfo<'_>) {
    println!("\n=== Batch Information ===\n");
    println!("Input: {}", batch.input_path);
    println!("Gateway: {:?}", batch.gateway.kind);
    if let Some(ref program) = batch.gateway.program {
        println!("  Program: {}", program);
    }
    match batch.max_concurrency {
        Some(limit) => println!("Concurrency: {}", limit),
        None => println!("Concurrency: unbounded"),
    }

    println!("\nRecipients ({}):", batch.recipients.len());
    for recipient in &batch.recipients {
        let record = recipient.record;
        println!(
            "  - [{}] {} -> {}",
            record.external_id(),
            record.full_name(),
            record.phone_number()
        );
        if let Some(ref composed) = recipient.composed {
            for line in composed.lines() {
                println!("      {}", line);
            }
        }
    }

    println!();
}

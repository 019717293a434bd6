//! `validate` command implementation.

use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use contracts::{DiagnosticSink, LoadError, RecipientRecord, SenderConfig};
use record_loader::RecordLoader;
use serde::Serialize;
use tracing::info;

use super::resolve_input;
use crate::cli::ValidateArgs;
use crate::error::CliError;

/// Validation result for JSON output
#[derive(Serialize)]
struct ValidationResult {
    valid: bool,
    input_path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    error_kind: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    warnings: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    summary: Option<InputSummary>,
}

#[derive(Serialize)]
struct InputSummary {
    record_count: usize,
    distinct_destinations: usize,
}

/// Execute the `validate` command
pub fn run_validate(
    args: &ValidateArgs,
    config: &SenderConfig,
    diagnostics: Arc<dyn DiagnosticSink>,
) -> Result<()> {
    let input = resolve_input(args.input.as_deref(), config);
    info!(input = %input.display(), "Validating recipient list");

    let loader = RecordLoader::new(diagnostics);
    let loaded = loader.load(&input);
    let result = build_result(&input, &loaded);

    if args.json {
        let json = serde_json::to_string_pretty(&result)
            .context("Failed to serialize validation result")?;
        println!("{}", json);
    } else {
        print_validation_result(&result);
    }

    match loaded {
        Ok(_) => Ok(()),
        Err(e) => Err(CliError::input_rejected(input.display().to_string(), e).into()),
    }
}

fn build_result(input: &Path, loaded: &Result<Vec<RecipientRecord>, LoadError>) -> ValidationResult {
    let input_path = input.display().to_string();

    match loaded {
        Ok(records) => {
            let warnings = collect_warnings(records);
            let distinct_destinations = records
                .iter()
                .map(RecipientRecord::phone_number)
                .collect::<HashSet<_>>()
                .len();

            ValidationResult {
                valid: true,
                input_path,
                error_kind: None,
                error: None,
                warnings: if warnings.is_empty() {
                    None
                } else {
                    Some(warnings)
                },
                summary: Some(InputSummary {
                    record_count: records.len(),
                    distinct_destinations,
                }),
            }
        }
        Err(e) => ValidationResult {
            valid: false,
            input_path,
            error_kind: Some(e.kind().to_string()),
            error: Some(e.to_string()),
            warnings: None,
            summary: None,
        },
    }
}

/// Collect non-fatal issues
fn collect_warnings(records: &[RecipientRecord]) -> Vec<String> {
    let mut warnings = Vec::new();

    if records.is_empty() {
        warnings.push("No data rows - nothing will be sent".to_string());
    }

    let mut seen = HashSet::new();
    for record in records {
        if !seen.insert(record.phone_number()) {
            warnings.push(format!(
                "Destination {} appears more than once and will receive several messages",
                record.phone_number()
            ));
        }
    }

    warnings
}

fn print_validation_result(result: &ValidationResult) {
    if result.valid {
        println!("✓ Recipient list is valid: {}", result.input_path);

        if let Some(ref summary) = result.summary {
            println!("\n  Records: {}", summary.record_count);
            println!("  Destinations: {}", summary.distinct_destinations);
        }

        if let Some(ref warnings) = result.warnings {
            println!("\n⚠ Warnings:");
            for warning in warnings {
                println!("  - {}", warning);
            }
        }
    } else {
        println!("✗ Recipient list is invalid: {}", result.input_path);
        if let Some(ref error) = result.error {
            println!("\n  Error: {}", error);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::RowDefect;

    fn record(phone: &str) -> RecipientRecord {
        RecipientRecord::new(phone, "Ann", "Lee", "7", "Hi").unwrap()
    }

    #[test]
    fn test_valid_result_summary() {
        let loaded = Ok(vec![record("07000000001"), record("07000000002")]);
        let result = build_result(Path::new("list.csv"), &loaded);
        assert!(result.valid);
        let summary = result.summary.unwrap();
        assert_eq!(summary.record_count, 2);
        assert_eq!(summary.distinct_destinations, 2);
        assert!(result.warnings.is_none());
    }

    #[test]
    fn test_invalid_result_carries_kind() {
        let loaded = Err(LoadError::malformed_row(
            2,
            RowDefect::PhoneNumber {
                value: "123".into(),
            },
        ));
        let result = build_result(Path::new("list.csv"), &loaded);
        assert!(!result.valid);
        assert_eq!(result.error_kind.as_deref(), Some("malformed_row"));

        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["valid"], false);
        assert!(json.get("summary").is_none());
    }

    #[test]
    fn test_warnings() {
        assert_eq!(collect_warnings(&[]).len(), 1);

        let warnings = collect_warnings(&[record("07000000001"), record("07000000001")]);
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("07000000001"));
    }
}

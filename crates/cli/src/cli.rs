//! CLI argument definitions using clap.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// SMS Sender - send one text message per row of a CSV recipient list
#[derive(Parser, Debug)]
#[command(
    name = "sms-sender",
    author,
    version,
    about = "Concurrent SMS sender for CSV recipient lists",
    long_about = "Reads a CSV recipient list (phone number, first name, last name, id, message),\n\
                  validates every row, then sends all messages concurrently through the \n\
                  device SMS gateway."
)]
pub struct Cli {
    /// Increase logging verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true, env = "SMS_SENDER_VERBOSE")]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Log output format (overrides the configuration file)
    #[arg(long, value_enum, global = true, env = "SMS_SENDER_LOG_FORMAT")]
    pub log_format: Option<LogFormat>,

    /// Path to configuration file (TOML or JSON)
    #[arg(short, long, global = true, env = "SMS_SENDER_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Validate the recipient list and send every message
    Send(SendArgs),

    /// Validate the recipient list without sending
    Validate(ValidateArgs),

    /// Display the recipients that would be messaged
    Info(InfoArgs),
}

/// Arguments for the `send` command
#[derive(Parser, Debug, Clone)]
pub struct SendArgs {
    /// Recipient list (overrides input.path from configuration)
    #[arg(short, long, env = "SMS_SENDER_INPUT")]
    pub input: Option<PathBuf>,

    /// Maximum sends in flight (overrides dispatch.max_concurrency; default unbounded)
    #[arg(
        long,
        env = "SMS_SENDER_CONCURRENCY",
        value_parser = clap::value_parser!(u64).range(1..=contracts::MAX_CONCURRENCY as u64)
    )]
    pub concurrency: Option<u64>,

    /// Log messages instead of sending them
    #[arg(long)]
    pub dry_run: bool,
}

/// Arguments for the `validate` command
#[derive(Parser, Debug)]
pub struct ValidateArgs {
    /// Recipient list to validate (overrides input.path from configuration)
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Output validation result as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `info` command
#[derive(Parser, Debug)]
pub struct InfoArgs {
    /// Recipient list (overrides input.path from configuration)
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    /// Show the composed message body of every recipient
    #[arg(long)]
    pub messages: bool,
}

/// Log output format
#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum LogFormat {
    /// JSON structured logging
    Json,
    /// Human-readable pretty format
    Pretty,
    /// Compact single-line format
    Compact,
}

impl From<LogFormat> for contracts::LogFormat {
    fn from(format: LogFormat) -> Self {
        match format {
            LogFormat::Json => Self::Json,
            LogFormat::Pretty => Self::Pretty,
            LogFormat::Compact => Self::Compact,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_send() {
        let cli = Cli::try_parse_from([
            "sms-sender",
            "send",
            "--input",
            "list.csv",
            "--concurrency",
            "4",
            "--dry-run",
        ])
        .unwrap();

        match cli.command {
            Commands::Send(args) => {
                assert_eq!(args.input, Some(PathBuf::from("list.csv")));
                assert_eq!(args.concurrency, Some(4));
                assert!(args.dry_run);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_zero_concurrency_rejected() {
        let result = Cli::try_parse_from(["sms-sender", "send", "--concurrency", "0"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_oversized_concurrency_rejected() {
        let too_many = (contracts::MAX_CONCURRENCY as u64 + 1).to_string();
        let result = Cli::try_parse_from(["sms-sender", "send", "--concurrency", &too_many]);
        assert!(result.is_err());

        let max = contracts::MAX_CONCURRENCY.to_string();
        assert!(Cli::try_parse_from(["sms-sender", "send", "--concurrency", &max]).is_ok());
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "sms-sender",
            "validate",
            "--json",
            "-vv",
            "--config",
            "sender.toml",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.config, Some(PathBuf::from("sender.toml")));
        assert!(matches!(cli.command, Commands::Validate(ValidateArgs { json: true, .. })));
    }

    #[test]
    fn test_quiet_conflicts_with_verbose() {
        let result = Cli::try_parse_from(["sms-sender", "-q", "-v", "info"]);
        assert!(result.is_err());
    }
}

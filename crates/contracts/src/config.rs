//! SenderConfig - Config Loader output
//!
//! Runtime settings: input location, dispatch bound, gateway and logging.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Top-level sender configuration
///
/// Every section falls back to its defaults, so an empty file is valid.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SenderConfig {
    #[serde(default)]
    pub input: InputConfig,

    #[serde(default)]
    pub dispatch: DispatchConfig,

    #[serde(default)]
    pub gateway: GatewayConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Recipient list location
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputConfig {
    /// CSV file path
    #[serde(default = "default_input_path")]
    pub path: PathBuf,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            path: default_input_path(),
        }
    }
}

fn default_input_path() -> PathBuf {
    PathBuf::from("sms_list.csv")
}

/// Largest accepted `max_concurrency`
///
/// Matches the permit ceiling of a tokio semaphore (`usize::MAX >> 3`).
pub const MAX_CONCURRENCY: usize = usize::MAX >> 3;

/// Dispatch settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DispatchConfig {
    /// Maximum sends in flight (None = unbounded), at most [`MAX_CONCURRENCY`]
    #[serde(default)]
    pub max_concurrency: Option<usize>,
}

/// Gateway selection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GatewayConfig {
    /// Gateway type
    #[serde(default)]
    pub kind: GatewayKind,

    /// Program invoked by the termux gateway
    #[serde(default = "default_gateway_program")]
    pub program: String,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            kind: GatewayKind::default(),
            program: default_gateway_program(),
        }
    }
}

fn default_gateway_program() -> String {
    "termux-sms-send".to_string()
}

/// Gateway type
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GatewayKind {
    /// Device SMS via the termux command
    #[default]
    Termux,
    /// Log only, nothing leaves the process
    Log,
}

/// Logging settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default level when RUST_LOG is unset
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Output format
    #[serde(default)]
    pub format: LogFormat,

    /// Prometheus exporter port (None = disabled)
    #[serde(default)]
    pub metrics_port: Option<u16>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
            metrics_port: None,
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Log output format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    /// JSON structured logging
    Json,
    /// Human-readable pretty format
    #[default]
    Pretty,
    /// Compact single-line format
    Compact,
}

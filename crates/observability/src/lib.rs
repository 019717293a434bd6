//! # Observability
//!
//! Tracing, diagnostics sinks and Prometheus metrics.
//!
//! ## Features
//!
//! - Tracing initialization (JSON/Pretty/Compact formats)
//! - `TracingDiagnostics`: the diagnostics sink injected into loader and dispatcher
//! - Prometheus metrics export
//!
//! ## Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use observability::{ObservabilityConfig, TracingDiagnostics};
//!
//! observability::init_with_config(ObservabilityConfig::default())?;
//! let diagnostics = Arc::new(TracingDiagnostics::new());
//! ```

pub mod diagnostics;
pub mod metrics;

use anyhow::{Context, Result};
use contracts::{LogFormat, LoggingConfig};
use metrics_exporter_prometheus::PrometheusBuilder;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

pub use crate::diagnostics::{RecordingDiagnostics, TracingDiagnostics};
pub use crate::metrics::{
    record_batch_finished, record_message_sent, record_records_loaded, record_validation_failure,
};

/// Observability configuration
#[derive(Debug, Clone)]
pub struct ObservabilityConfig {
    /// Log format
    pub log_format: LogFormat,
    /// Prometheus port (None = disabled)
    pub metrics_port: Option<u16>,
    /// Default log level, used when RUST_LOG is unset
    pub default_log_level: String,
    /// Force this level and ignore RUST_LOG
    pub forced_log_level: Option<String>,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self::from(&LoggingConfig::default())
    }
}

impl From<&LoggingConfig> for ObservabilityConfig {
    fn from(config: &LoggingConfig) -> Self {
        Self {
            log_format: config.format,
            metrics_port: config.metrics_port,
            default_log_level: config.level.clone(),
            forced_log_level: None,
        }
    }
}

impl ObservabilityConfig {
    fn filter(&self) -> EnvFilter {
        match &self.forced_log_level {
            Some(level) => EnvFilter::new(level),
            None => EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&self.default_log_level)),
        }
    }
}

/// Initialize with a custom configuration
pub fn init_with_config(config: ObservabilityConfig) -> Result<()> {
    let fmt_layer = match config.log_format {
        LogFormat::Json => fmt::layer()
            .json()
            .with_target(true)
            .with_thread_ids(true)
            .with_thread_names(true)
            .with_file(true)
            .with_line_number(true)
            .boxed(),
        LogFormat::Pretty => fmt::layer().pretty().boxed(),
        LogFormat::Compact => fmt::layer().compact().boxed(),
    };

    tracing_subscriber::registry()
        .with(config.filter())
        .with(fmt_layer)
        .try_init()
        .context("Failed to initialize tracing subscriber")?;

    if let Some(port) = config.metrics_port {
        init_metrics_only(port)?;
    }

    tracing::info!(
        log_format = ?config.log_format,
        metrics_port = ?config.metrics_port,
        "Observability initialized"
    );

    Ok(())
}

/// Initialize only the Prometheus exporter (no tracing)
pub fn init_metrics_only(port: u16) -> Result<()> {
    PrometheusBuilder::new()
        .with_http_listener(([0, 0, 0, 0], port))
        .install()
        .context("Failed to install Prometheus recorder")?;

    tracing::info!(port = port, "Prometheus metrics endpoint initialized");
    Ok(())
}

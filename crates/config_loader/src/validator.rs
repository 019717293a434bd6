//! Configuration validation
//!
//! Rules:
//! - input.path is not empty
//! - dispatch.max_concurrency in 1..=MAX_CONCURRENCY when set
//! - gateway.program is not empty for the termux gateway
//! - logging.level is not empty

use contracts::{GatewayKind, SenderConfig, MAX_CONCURRENCY};

use crate::ConfigError;

/// Validate a SenderConfig
///
/// Returns the first error encountered, or Ok(()).
pub fn validate(config: &SenderConfig) -> Result<(), ConfigError> {
    validate_input(config)?;
    validate_dispatch(config)?;
    validate_gateway(config)?;
    validate_logging(config)?;
    Ok(())
}

fn validate_input(config: &SenderConfig) -> Result<(), ConfigError> {
    if config.input.path.as_os_str().is_empty() {
        return Err(ConfigError::validation(
            "input.path",
            "input path cannot be empty",
        ));
    }
    Ok(())
}

fn validate_dispatch(config: &SenderConfig) -> Result<(), ConfigError> {
    match config.dispatch.max_concurrency {
        Some(0) => Err(ConfigError::validation(
            "dispatch.max_concurrency",
            "max_concurrency must be >= 1, omit it for unbounded dispatch",
        )),
        Some(limit) if limit > MAX_CONCURRENCY => Err(ConfigError::validation(
            "dispatch.max_concurrency",
            format!("max_concurrency must be <= {MAX_CONCURRENCY}"),
        )),
        _ => Ok(()),
    }
}

fn validate_gateway(config: &SenderConfig) -> Result<(), ConfigError> {
    if config.gateway.kind == GatewayKind::Termux && config.gateway.program.trim().is_empty() {
        return Err(ConfigError::validation(
            "gateway.program",
            "program cannot be empty for the termux gateway",
        ));
    }
    Ok(())
}

fn validate_logging(config: &SenderConfig) -> Result<(), ConfigError> {
    if config.logging.level.trim().is_empty() {
        return Err(ConfigError::validation(
            "logging.level",
            "log level cannot be empty",
        ));
    }
    Ok(())
}

//! Error types for CLI operations.

use contracts::{LoadError, LoadErrorKind};
use thiserror::Error;

/// CLI-specific error types
#[derive(Error, Debug)]
pub enum CliError {
    /// Recipient list failed validation, nothing was sent
    #[error("Recipient list {path} rejected ({kind}): {source}")]
    InputRejected {
        path: String,
        kind: LoadErrorKind,
        #[source]
        source: LoadError,
    },

    /// Some messages could not be delivered
    #[error("{failed} of {total} messages failed to send")]
    DeliveryFailed { failed: usize, total: usize },

    /// Configuration could not be loaded
    #[error("Configuration error: {0}")]
    Config(#[from] config_loader::ConfigError),
}

impl CliError {
    pub fn input_rejected(path: impl Into<String>, source: LoadError) -> Self {
        Self::InputRejected {
            path: path.into(),
            kind: source.kind(),
            source,
        }
    }

    pub fn delivery_failed(failed: usize, total: usize) -> Self {
        Self::DeliveryFailed { failed, total }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_rejected_message() {
        let err = CliError::input_rejected("sms_list.csv", LoadError::not_found("sms_list.csv"));
        let message = err.to_string();
        assert!(message.contains("not_found"), "got: {message}");
        assert!(message.contains("sms_list.csv"), "got: {message}");
    }
}

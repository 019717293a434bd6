//! Layered error definitions
//!
//! Categorized by stage: load (input file) / delivery (gateway)

use std::fmt;

use thiserror::Error;

use crate::RecordField;

/// Reason a data row was rejected
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RowDefect {
    /// Row does not carry exactly five fields
    #[error("expected 5 fields, found {found}")]
    FieldCount { found: usize },

    /// Phone number is not exactly 11 ASCII digits
    #[error("phone number '{value}' must be exactly 11 digits")]
    PhoneNumber { value: String },

    /// A required text field is empty
    #[error("field '{field}' cannot be empty")]
    EmptyField { field: RecordField },
}

/// Failure while validating or loading the recipient list
#[derive(Debug, Error)]
pub enum LoadError {
    /// Input file does not exist
    #[error("input file not found: {path}")]
    NotFound { path: String },

    /// A data row failed validation
    #[error("malformed row at line {line}: {defect}")]
    MalformedRow { line: u64, defect: RowDefect },

    /// Any other failure while reading the input
    #[error("failed to read input: {message}")]
    Read { message: String },
}

impl LoadError {
    /// Create not-found error
    pub fn not_found(path: impl Into<String>) -> Self {
        Self::NotFound { path: path.into() }
    }

    /// Create malformed-row error
    pub fn malformed_row(line: u64, defect: RowDefect) -> Self {
        Self::MalformedRow { line, defect }
    }

    /// Create read error
    pub fn read(message: impl Into<String>) -> Self {
        Self::Read {
            message: message.into(),
        }
    }

    /// Short classification tag, used in logs and JSON output
    pub fn kind(&self) -> LoadErrorKind {
        match self {
            Self::NotFound { .. } => LoadErrorKind::NotFound,
            Self::MalformedRow { .. } => LoadErrorKind::MalformedRow,
            Self::Read { .. } => LoadErrorKind::Read,
        }
    }
}

/// Classification of a `LoadError`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadErrorKind {
    NotFound,
    MalformedRow,
    Read,
}

impl fmt::Display for LoadErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self {
            Self::NotFound => "not_found",
            Self::MalformedRow => "malformed_row",
            Self::Read => "read_error",
        };
        f.write_str(tag)
    }
}

/// Failure of a single send through the gateway
#[derive(Debug, Error)]
pub enum DeliveryError {
    /// Gateway reported a failure
    #[error("gateway '{gateway}' failed: {message}")]
    Gateway { gateway: String, message: String },

    /// Gateway program could not be started
    #[error("gateway '{gateway}' could not be started: {source}")]
    Spawn {
        gateway: String,
        #[source]
        source: std::io::Error,
    },

    /// Send task ended without producing a result
    #[error("send aborted: {message}")]
    Aborted { message: String },
}

impl DeliveryError {
    /// Create gateway error
    pub fn gateway(gateway: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Gateway {
            gateway: gateway.into(),
            message: message.into(),
        }
    }

    /// Create aborted error
    pub fn aborted(message: impl Into<String>) -> Self {
        Self::Aborted {
            message: message.into(),
        }
    }
}

//! Dispatcher error types

use contracts::LoadError;
use thiserror::Error;

/// Dispatcher-specific errors
#[derive(Debug, Error)]
pub enum DispatchError {
    /// Loader produced no records, nothing was sent
    #[error("dispatch aborted, input rejected: {0}")]
    Aborted(#[from] LoadError),

    /// At least one send failed once the batch was gathered
    #[error("{failed} of {total} messages failed, first failure: {first}")]
    PartialFailure {
        failed: usize,
        total: usize,
        first: String,
    },
}

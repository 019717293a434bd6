//! DiagnosticSink trait - explicit diagnostics channel
//!
//! Created once at startup and handed to the loader and dispatcher,
//! instead of relying on an implicit global logger.

/// Structured diagnostic event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiagnosticEvent {
    /// Input passed validation and was turned into records
    RecordsLoaded { source: String, count: usize },

    /// Input failed validation, nothing will be sent
    ValidationFailed { source: String, reason: String },

    /// Dispatch of a batch is starting
    DispatchStarted {
        total: usize,
        max_concurrency: Option<usize>,
    },

    /// About to call the gateway for one record
    SendStarted { destination: String, name: String },

    /// Gateway accepted the message
    SendCompleted { destination: String, name: String },

    /// Gateway rejected the message
    SendFailed {
        destination: String,
        name: String,
        error: String,
    },

    /// Every send of the batch has finished
    DispatchFinished { sent: usize, failed: usize },
}

impl DiagnosticEvent {
    /// Destination of a per-send event
    pub fn destination(&self) -> Option<&str> {
        match self {
            Self::SendStarted { destination, .. }
            | Self::SendCompleted { destination, .. }
            | Self::SendFailed { destination, .. } => Some(destination),
            _ => None,
        }
    }
}

/// Receiver of diagnostic events
///
/// Must tolerate concurrent `emit` calls from many send tasks.
pub trait DiagnosticSink: Send + Sync {
    fn emit(&self, event: DiagnosticEvent);
}

/// Sink that discards every event
#[derive(Debug, Default, Clone, Copy)]
pub struct NullDiagnostics;

impl DiagnosticSink for NullDiagnostics {
    fn emit(&self, _event: DiagnosticEvent) {}
}

//! DiagnosticSink implementations

use std::sync::Mutex;

use contracts::{DiagnosticEvent, DiagnosticSink};
use tracing::{error, info, warn};

use crate::metrics::{record_batch_finished, record_records_loaded, record_validation_failure};

/// Forwards diagnostic events to `tracing` and the metrics facade
///
/// Construct once at startup and share it as `Arc<dyn DiagnosticSink>`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingDiagnostics;

impl TracingDiagnostics {
    pub fn new() -> Self {
        Self
    }
}

impl DiagnosticSink for TracingDiagnostics {
    fn emit(&self, event: DiagnosticEvent) {
        match event {
            DiagnosticEvent::RecordsLoaded { source, count } => {
                record_records_loaded(count);
                info!(source = %source, count, "Recipient list loaded");
            }
            DiagnosticEvent::ValidationFailed { source, reason } => {
                record_validation_failure();
                warn!(source = %source, reason = %reason, "Recipient list rejected");
            }
            DiagnosticEvent::DispatchStarted {
                total,
                max_concurrency,
            } => {
                info!(total, max_concurrency = ?max_concurrency, "Dispatching messages");
            }
            DiagnosticEvent::SendStarted { destination, name } => {
                info!(destination = %destination, name = %name, "Sending SMS");
            }
            DiagnosticEvent::SendCompleted { destination, name } => {
                info!(destination = %destination, name = %name, "SMS sent");
            }
            DiagnosticEvent::SendFailed {
                destination,
                name,
                error,
            } => {
                error!(destination = %destination, name = %name, error = %error, "SMS failed");
            }
            DiagnosticEvent::DispatchFinished { sent, failed } => {
                record_batch_finished(sent, failed);
                info!(sent, failed, "All sends completed");
            }
        }
    }
}

/// Keeps every event in memory, for tests and summaries
#[derive(Debug, Default)]
pub struct RecordingDiagnostics {
    events: Mutex<Vec<DiagnosticEvent>>,
}

impl RecordingDiagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of all events so far, in emission order
    pub fn events(&self) -> Vec<DiagnosticEvent> {
        self.lock().clone()
    }

    /// Events concerning one destination
    pub fn events_for(&self, destination: &str) -> Vec<DiagnosticEvent> {
        self.lock()
            .iter()
            .filter(|e| e.destination() == Some(destination))
            .cloned()
            .collect()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<DiagnosticEvent>> {
        // A panicking emitter leaves the event list intact
        self.events.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl DiagnosticSink for RecordingDiagnostics {
    fn emit(&self, event: DiagnosticEvent) {
        self.lock().push(event);
    }
}

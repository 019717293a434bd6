//! # Record Loader
//!
//! Recipient list loading module.
//!
//! Responsibilities:
//! - Validate the CSV recipient list
//! - Produce `RecipientRecord`s in file order
//! - Report load diagnostics through the injected `DiagnosticSink`
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use contracts::NullDiagnostics;
//! use record_loader::RecordLoader;
//!
//! let loader = RecordLoader::new(Arc::new(NullDiagnostics));
//! let records = loader.load("sms_list.csv").unwrap();
//! println!("{} recipients", records.len());
//! ```

mod reader;

pub use contracts::{LoadError, RecipientRecord, RowDefect};

use std::path::Path;
use std::sync::Arc;

use contracts::{DiagnosticEvent, DiagnosticSink};
use tracing::debug;

/// Recipient list loader
///
/// Input layout: a header row (ignored) followed by rows of
/// `phoneNumber,firstName,lastName,externalId,messageBody`.
pub struct RecordLoader {
    diagnostics: Arc<dyn DiagnosticSink>,
}

impl RecordLoader {
    pub fn new(diagnostics: Arc<dyn DiagnosticSink>) -> Self {
        Self { diagnostics }
    }

    /// Check every data row of the input
    ///
    /// # Errors
    /// - `NotFound` if the file does not exist
    /// - `MalformedRow` for the first row with a wrong field count,
    ///   a bad phone number or an empty field
    /// - `Read` for any other failure while scanning
    pub fn validate(&self, source: impl AsRef<Path>) -> Result<(), LoadError> {
        let source = source.as_ref();
        match reader::scan(source, |_| {}) {
            Ok(rows) => {
                debug!(source = %source.display(), rows, "Input validated");
                Ok(())
            }
            Err(e) => {
                self.diagnostics.emit(DiagnosticEvent::ValidationFailed {
                    source: source.display().to_string(),
                    reason: e.to_string(),
                });
                Err(e)
            }
        }
    }

    /// Boolean form of [`RecordLoader::validate`]
    pub fn is_valid(&self, source: impl AsRef<Path>) -> bool {
        self.validate(source).is_ok()
    }

    /// Validate, then read the input into records
    ///
    /// An `Err` means "no records": the caller must not dispatch anything.
    pub fn load(&self, source: impl AsRef<Path>) -> Result<Vec<RecipientRecord>, LoadError> {
        let source = source.as_ref();
        self.validate(source)?;

        let mut records = Vec::new();
        reader::scan(source, |record| records.push(record))?;

        self.diagnostics.emit(DiagnosticEvent::RecordsLoaded {
            source: source.display().to_string(),
            count: records.len(),
        });

        Ok(records)
    }
}

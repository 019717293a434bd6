//! # Contracts
//!
//! Shared interface contracts for the SMS sender, defining the data structures
//! and traits that cross crate boundaries.
//! All business crates depend on this crate only, reverse dependencies are prohibited.
//!
//! ## Data Flow
//! - CSV input -> `RecipientRecord` list (record_loader)
//! - `RecipientRecord` -> composed body -> `SmsGateway` (dispatcher)
//! - Every component reports through an injected `DiagnosticSink`

mod config;
mod diagnostics;
mod error;
mod gateway;
mod recipient;

pub use config::*;
pub use diagnostics::*;
pub use error::*;
pub use gateway::*;
pub use recipient::*;

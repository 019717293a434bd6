//! # Dispatcher
//!
//! Message dispatch module.
//!
//! Responsibilities:
//! - Compose one message body per `RecipientRecord`
//! - Fan out every send concurrently to the `SmsGateway`
//! - Wait for all sends and report partial failure explicitly

pub mod dispatcher;
pub mod error;
pub mod gateways;
pub mod message;
pub mod metrics;
pub mod report;

pub use contracts::{DeliveryError, RecipientRecord, SmsGateway};
pub use dispatcher::{create_dispatcher, Dispatcher, DispatcherConfig};
pub use error::DispatchError;
pub use gateways::{create_gateway, Gateway, LogGateway, TermuxGateway};
pub use message::compose_message;
pub use metrics::{DispatchMetrics, MetricsSnapshot};
pub use report::{DispatchReport, SendOutcome};

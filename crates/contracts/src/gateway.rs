//! SmsGateway trait - Dispatcher output interface
//!
//! Abstracts the device-level messaging capability.

use crate::DeliveryError;

/// External delivery capability
///
/// Accepts a composed body and a destination, and either succeeds or fails.
/// Implementations are shared across concurrent sends, so `send` takes `&self`.
#[trait_variant::make(SmsGateway: Send)]
pub trait LocalSmsGateway {
    /// Gateway name (used for logging/metrics)
    fn name(&self) -> &str;

    /// Deliver one message
    ///
    /// # Errors
    /// Returns delivery error (should include context)
    async fn send(&self, body: &str, destination: &str) -> Result<(), DeliveryError>;
}

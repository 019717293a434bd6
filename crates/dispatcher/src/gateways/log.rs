//! LogGateway - logs messages via tracing instead of sending them

use contracts::{DeliveryError, SmsGateway};
use tracing::{info, instrument};

/// Dry-run gateway, every send succeeds
pub struct LogGateway {
    name: String,
}

impl LogGateway {
    /// Create a new LogGateway with the given name
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl SmsGateway for LogGateway {
    fn name(&self) -> &str {
        &self.name
    }

    #[instrument(
        name = "log_gateway_send",
        skip(self, body),
        fields(gateway = %self.name)
    )]
    async fn send(&self, body: &str, destination: &str) -> Result<(), DeliveryError> {
        info!(
            gateway = %self.name,
            destination,
            chars = body.chars().count(),
            body,
            "SMS not sent (dry run)"
        );
        Ok(())
    }
}

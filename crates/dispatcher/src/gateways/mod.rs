//! Gateway implementations
//!
//! Contains TermuxGateway and LogGateway.

mod log;
mod termux;

pub use self::log::LogGateway;
pub use self::termux::TermuxGateway;

use contracts::{DeliveryError, GatewayConfig, GatewayKind, SmsGateway};
use tracing::instrument;

/// Gateway selected from configuration
pub enum Gateway {
    Termux(TermuxGateway),
    Log(LogGateway),
}

impl SmsGateway for Gateway {
    fn name(&self) -> &str {
        match self {
            Self::Termux(gateway) => gateway.name(),
            Self::Log(gateway) => gateway.name(),
        }
    }

    async fn send(&self, body: &str, destination: &str) -> Result<(), DeliveryError> {
        match self {
            Self::Termux(gateway) => gateway.send(body, destination).await,
            Self::Log(gateway) => gateway.send(body, destination).await,
        }
    }
}

/// Create a gateway from configuration
#[instrument(name = "dispatcher_create_gateway", skip(config), fields(kind = ?config.kind))]
pub fn create_gateway(config: &GatewayConfig) -> Gateway {
    match config.kind {
        GatewayKind::Termux => Gateway::Termux(TermuxGateway::new("termux", &config.program)),
        GatewayKind::Log => Gateway::Log(LogGateway::new("log")),
    }
}

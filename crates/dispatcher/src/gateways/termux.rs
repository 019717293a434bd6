//! TermuxGateway - sends SMS through the device's `termux-sms-send` command

use std::path::PathBuf;

use contracts::{DeliveryError, SmsGateway};
use tokio::process::Command;
use tracing::{debug, instrument};

/// Gateway backed by an external SMS command
///
/// Invoked as `<program> -n <destination> <body>`; a zero exit status
/// means the device accepted the message.
pub struct TermuxGateway {
    name: String,
    program: PathBuf,
}

impl TermuxGateway {
    pub fn new(name: impl Into<String>, program: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            program: program.into(),
        }
    }
}

impl SmsGateway for TermuxGateway {
    fn name(&self) -> &str {
        &self.name
    }

    #[instrument(
        name = "termux_gateway_send",
        skip(self, body),
        fields(gateway = %self.name, program = %self.program.display())
    )]
    async fn send(&self, body: &str, destination: &str) -> Result<(), DeliveryError> {
        let output = Command::new(&self.program)
            .arg("-n")
            .arg(destination)
            .arg(body)
            .output()
            .await
            .map_err(|source| DeliveryError::Spawn {
                gateway: self.name.clone(),
                source,
            })?;

        if output.status.success() {
            debug!(destination, "Gateway accepted message");
            return Ok(());
        }

        let stderr = String::from_utf8_lossy(&output.stderr);
        Err(DeliveryError::gateway(
            &self.name,
            format!(
                "{} exited with {}: {}",
                self.program.display(),
                output.status,
                stderr.trim()
            ),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_program_is_spawn_error() {
        let gateway = TermuxGateway::new("termux", "/nonexistent/termux-sms-send");
        let err = gateway.send("hi", "07123456789").await.unwrap_err();
        assert!(matches!(err, DeliveryError::Spawn { .. }), "got: {err:?}");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_zero_exit_is_success() {
        let gateway = TermuxGateway::new("termux", "true");
        assert!(gateway.send("hi", "07123456789").await.is_ok());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_non_zero_exit_is_gateway_error() {
        let gateway = TermuxGateway::new("termux", "false");
        let err = gateway.send("hi", "07123456789").await.unwrap_err();
        assert!(matches!(err, DeliveryError::Gateway { .. }), "got: {err:?}");
        assert!(err.to_string().contains("exited with"));
    }
}

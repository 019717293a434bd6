//! Dispatcher - concurrent fan-out of recipient records to the gateway

use std::sync::Arc;

use contracts::{
    DeliveryError, DiagnosticEvent, DiagnosticSink, LoadError, RecipientRecord, SenderConfig,
    SmsGateway,
};
use tokio::sync::Semaphore;
use tokio::task::JoinHandle;
use tracing::{debug, info, instrument};

use crate::error::DispatchError;
use crate::gateways::{create_gateway, Gateway};
use crate::message::compose_message;
use crate::metrics::{DispatchMetrics, MetricsSnapshot};
use crate::report::{DispatchReport, SendOutcome};

/// Dispatcher configuration
#[derive(Debug, Clone, Default)]
pub struct DispatcherConfig {
    /// Maximum sends in flight (None = unbounded, every record at once)
    pub max_concurrency: Option<usize>,
}

/// Sends every record of a batch concurrently
///
/// Each send only touches its own record; the gateway, diagnostics sink and
/// counters are shared read-only (or atomically) between tasks.
pub struct Dispatcher<G> {
    gateway: Arc<G>,
    diagnostics: Arc<dyn DiagnosticSink>,
    metrics: Arc<DispatchMetrics>,
    config: DispatcherConfig,
}

impl<G> Clone for Dispatcher<G> {
    fn clone(&self) -> Self {
        Self {
            gateway: Arc::clone(&self.gateway),
            diagnostics: Arc::clone(&self.diagnostics),
            metrics: Arc::clone(&self.metrics),
            config: self.config.clone(),
        }
    }
}

impl<G> Dispatcher<G>
where
    G: SmsGateway + Sync + 'static,
{
    pub fn new(gateway: G, diagnostics: Arc<dyn DiagnosticSink>, config: DispatcherConfig) -> Self {
        Self::with_shared_gateway(Arc::new(gateway), diagnostics, config)
    }

    /// Create a dispatcher around a gateway the caller keeps a handle to
    pub fn with_shared_gateway(
        gateway: Arc<G>,
        diagnostics: Arc<dyn DiagnosticSink>,
        config: DispatcherConfig,
    ) -> Self {
        Self {
            gateway,
            diagnostics,
            metrics: Arc::new(DispatchMetrics::new()),
            config,
        }
    }

    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    pub fn metrics(&self) -> MetricsSnapshot {
        self.metrics.snapshot()
    }

    /// Send one record through the gateway
    ///
    /// Diagnostics order is fixed: `SendStarted`, gateway call, then
    /// `SendCompleted` or `SendFailed`. The gateway error is returned as is.
    #[instrument(
        name = "dispatcher_send_one",
        skip(self, record),
        fields(gateway = %self.gateway.name(), id = %record.external_id())
    )]
    pub async fn send_one(&self, record: &RecipientRecord) -> Result<(), DeliveryError> {
        let destination = record.phone_number().to_string();
        let name = record.full_name();
        let body = compose_message(record);

        self.diagnostics.emit(DiagnosticEvent::SendStarted {
            destination: destination.clone(),
            name: name.clone(),
        });
        self.metrics.inc_in_flight();

        let result = self.gateway.send(&body, &destination).await;

        self.metrics.dec_in_flight();
        observability::record_message_sent(self.gateway.name(), result.is_ok());

        match &result {
            Ok(()) => {
                self.metrics.inc_sent_count();
                self.diagnostics
                    .emit(DiagnosticEvent::SendCompleted { destination, name });
            }
            Err(e) => {
                self.metrics.inc_failure_count();
                self.diagnostics.emit(DiagnosticEvent::SendFailed {
                    destination,
                    name,
                    error: e.to_string(),
                });
            }
        }

        result
    }

    /// Send every record concurrently and wait for all of them
    ///
    /// One task per record, all spawned up front. A failed send never
    /// cancels the others. Outcomes are reported in input order.
    #[instrument(
        name = "dispatcher_dispatch_all",
        skip(self, records),
        fields(gateway = %self.gateway.name(), max_concurrency = ?self.config.max_concurrency)
    )]
    pub async fn dispatch_all(&self, records: Vec<RecipientRecord>) -> DispatchReport {
        let total = records.len();
        self.diagnostics.emit(DiagnosticEvent::DispatchStarted {
            total,
            max_concurrency: self.config.max_concurrency,
        });
        info!(total, "Dispatch started");

        let limiter = self
            .config
            .max_concurrency
            .map(|permits| Arc::new(Semaphore::new(permits.clamp(1, Semaphore::MAX_PERMITS))));

        let tasks: Vec<(RecipientRecord, JoinHandle<Result<(), DeliveryError>>)> = records
            .into_iter()
            .map(|record| {
                let handle = self.spawn_send(record.clone(), limiter.clone());
                (record, handle)
            })
            .collect();

        let mut outcomes = Vec::with_capacity(total);
        for (record, handle) in tasks {
            let result = match handle.await {
                Ok(result) => result,
                Err(e) => Err(DeliveryError::aborted(e.to_string())),
            };
            outcomes.push(SendOutcome { record, result });
        }

        let report = DispatchReport::new(outcomes);
        self.diagnostics.emit(DiagnosticEvent::DispatchFinished {
            sent: report.sent(),
            failed: report.failed(),
        });
        info!(
            sent = report.sent(),
            failed = report.failed(),
            "Dispatch finished"
        );

        report
    }

    /// Dispatch the loader's output
    ///
    /// A load error means there are no records: nothing is sent and the
    /// error is returned as `DispatchError::Aborted`.
    pub async fn run(
        &self,
        loaded: Result<Vec<RecipientRecord>, LoadError>,
    ) -> Result<DispatchReport, DispatchError> {
        let records = loaded?;
        Ok(self.dispatch_all(records).await)
    }

    fn spawn_send(
        &self,
        record: RecipientRecord,
        limiter: Option<Arc<Semaphore>>,
    ) -> JoinHandle<Result<(), DeliveryError>> {
        let dispatcher = self.clone();
        tokio::spawn(async move {
            let _permit = match limiter {
                Some(limiter) => Some(
                    limiter
                        .acquire_owned()
                        .await
                        .map_err(|e| DeliveryError::aborted(e.to_string()))?,
                ),
                None => None,
            };
            debug!(destination = %record.phone_number(), "Send task running");
            dispatcher.send_one(&record).await
        })
    }
}

/// Convenience function to create a dispatcher from sender configuration
pub fn create_dispatcher(
    config: &SenderConfig,
    diagnostics: Arc<dyn DiagnosticSink>,
) -> Dispatcher<Gateway> {
    let gateway = create_gateway(&config.gateway);
    Dispatcher::new(
        gateway,
        diagnostics,
        DispatcherConfig {
            max_concurrency: config.dispatch.max_concurrency,
        },
    )
}

//! Batch statistics printed after `send`.

use std::time::Duration;

use dispatcher::{DispatchReport, MetricsSnapshot};

/// Statistics from one dispatched batch
#[derive(Debug, Clone, Default)]
pub struct BatchSummary {
    /// Records in the batch
    pub total: usize,

    /// Messages accepted by the gateway
    pub sent: usize,

    /// Messages rejected by the gateway
    pub failed: usize,

    /// Most sends waiting on the gateway at once
    pub peak_in_flight: usize,

    /// Wall time from first send to last completion
    pub duration: Duration,

    /// `(destination, error)` for every failed send
    pub failures: Vec<(String, String)>,
}

impl BatchSummary {
    pub fn from_report(
        report: &DispatchReport,
        metrics: MetricsSnapshot,
        duration: Duration,
    ) -> Self {
        Self {
            total: report.total(),
            sent: report.sent(),
            failed: report.failed(),
            peak_in_flight: metrics.peak_in_flight,
            duration,
            failures: report
                .failures()
                .map(|(record, error)| (record.phone_number().to_string(), error.to_string()))
                .collect(),
        }
    }

    /// Messages per second
    pub fn rate(&self) -> f64 {
        if self.duration.as_secs_f64() > 0.0 {
            self.total as f64 / self.duration.as_secs_f64()
        } else {
            0.0
        }
    }

    /// Print detailed summary
    pub fn print(&self) {
        println!("\n=== Dispatch Summary ===\n");
        println!("  Duration: {:.2}s", self.duration.as_secs_f64());
        println!("  Messages: {}", self.total);
        println!("  Sent: {}", self.sent);
        println!("  Failed: {}", self.failed);
        println!("  Peak in flight: {}", self.peak_in_flight);
        println!("  Rate: {:.2} msg/s", self.rate());

        if !self.failures.is_empty() {
            println!("\nFailures:");
            for (destination, error) in &self.failures {
                println!("  - {}: {}", destination, error);
            }
        }

        println!();
    }
}

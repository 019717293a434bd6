//! Dispatch metrics for observability

use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};

/// Counters shared by every send task of a dispatcher
#[derive(Debug, Default)]
pub struct DispatchMetrics {
    /// Sends currently waiting on the gateway
    in_flight: AtomicUsize,
    /// Highest `in_flight` seen
    peak_in_flight: AtomicUsize,
    /// Total messages accepted by the gateway
    sent_count: AtomicU64,
    /// Total messages rejected by the gateway
    failure_count: AtomicU64,
}

impl DispatchMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn in_flight(&self) -> usize {
        self.in_flight.load(Ordering::Relaxed)
    }

    pub fn inc_in_flight(&self) {
        let now = self.in_flight.fetch_add(1, Ordering::Relaxed) + 1;
        self.peak_in_flight.fetch_max(now, Ordering::Relaxed);
    }

    pub fn peak_in_flight(&self) -> usize {
        self.peak_in_flight.load(Ordering::Relaxed)
    }

    pub fn dec_in_flight(&self) {
        self.in_flight.fetch_sub(1, Ordering::Relaxed);
    }

    pub fn sent_count(&self) -> u64 {
        self.sent_count.load(Ordering::Relaxed)
    }

    pub fn inc_sent_count(&self) {
        self.sent_count.fetch_add(1, Ordering::Relaxed);
    }

    pub fn failure_count(&self) -> u64 {
        self.failure_count.load(Ordering::Relaxed)
    }

    pub fn inc_failure_count(&self) {
        self.failure_count.fetch_add(1, Ordering::Relaxed);
    }

    /// Get snapshot of all metrics
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            in_flight: self.in_flight(),
            peak_in_flight: self.peak_in_flight(),
            sent_count: self.sent_count(),
            failure_count: self.failure_count(),
        }
    }
}

/// Snapshot of dispatch metrics (for reporting)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MetricsSnapshot {
    pub in_flight: usize,
    pub peak_in_flight: usize,
    pub sent_count: u64,
    pub failure_count: u64,
}

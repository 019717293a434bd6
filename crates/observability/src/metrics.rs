//! Sender metrics
//!
//! Thin wrappers over the `metrics` facade; a no-op unless a recorder
//! (e.g. the Prometheus exporter) is installed.

use metrics::{counter, gauge};

/// Record the outcome of one gateway call
pub fn record_message_sent(gateway: &str, success: bool) {
    let status = if success { "success" } else { "failure" };
    counter!(
        "sms_sender_messages_total",
        "gateway" => gateway.to_string(),
        "status" => status.to_string()
    )
    .increment(1);
}

/// Record the size of a loaded recipient list
pub fn record_records_loaded(count: usize) {
    counter!("sms_sender_records_loaded_total").increment(count as u64);
    gauge!("sms_sender_batch_size").set(count as f64);
}

/// Record a rejected input file
pub fn record_validation_failure() {
    counter!("sms_sender_validation_failures_total").increment(1);
}

/// Record the result of a whole batch
pub fn record_batch_finished(sent: usize, failed: usize) {
    counter!("sms_sender_batches_total").increment(1);
    gauge!("sms_sender_last_batch_sent").set(sent as f64);
    gauge!("sms_sender_last_batch_failed").set(failed as f64);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_without_recorder_is_noop() {
        record_message_sent("log", true);
        record_message_sent("log", false);
        record_records_loaded(3);
        record_validation_failure();
        record_batch_finished(2, 1);
    }
}

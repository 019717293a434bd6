//! Message body composition

use contracts::RecipientRecord;

/// Compose the SMS body for a record
///
/// One `label: value` pair per line, in a fixed order.
pub fn compose_message(record: &RecipientRecord) -> String {
    format!(
        "id: {}\nfirstname: {}\nlastname: {}\nmobile number: {}\nmessage: {}",
        record.external_id(),
        record.first_name(),
        record.last_name(),
        record.phone_number(),
        record.message_body(),
    )
}

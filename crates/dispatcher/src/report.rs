//! Batch outcome reporting

use contracts::{DeliveryError, RecipientRecord};

use crate::error::DispatchError;

/// Result of one send
#[derive(Debug)]
pub struct SendOutcome {
    pub record: RecipientRecord,
    pub result: Result<(), DeliveryError>,
}

impl SendOutcome {
    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }
}

/// Every outcome of a dispatched batch, in input order
#[derive(Debug, Default)]
pub struct DispatchReport {
    outcomes: Vec<SendOutcome>,
}

impl DispatchReport {
    pub fn new(outcomes: Vec<SendOutcome>) -> Self {
        Self { outcomes }
    }

    pub fn outcomes(&self) -> &[SendOutcome] {
        &self.outcomes
    }

    pub fn total(&self) -> usize {
        self.outcomes.len()
    }

    pub fn sent(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_success()).count()
    }

    pub fn failed(&self) -> usize {
        self.total() - self.sent()
    }

    pub fn is_success(&self) -> bool {
        self.failed() == 0
    }

    /// Failed outcomes with their errors
    pub fn failures(&self) -> impl Iterator<Item = (&RecipientRecord, &DeliveryError)> {
        self.outcomes
            .iter()
            .filter_map(|o| o.result.as_ref().err().map(|e| (&o.record, e)))
    }

    /// Turn any failure into `DispatchError::PartialFailure`
    pub fn into_result(self) -> Result<Self, DispatchError> {
        let first = self
            .failures()
            .next()
            .map(|(record, error)| format!("{}: {error}", record.phone_number()));

        match first {
            None => Ok(self),
            Some(first) => Err(DispatchError::PartialFailure {
                failed: self.failed(),
                total: self.total(),
                first,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outcome(phone: &str, ok: bool) -> SendOutcome {
        let record = RecipientRecord::new(phone, "Ann", "Lee", "7", "Hi").unwrap();
        let result = if ok {
            Ok(())
        } else {
            Err(DeliveryError::gateway("mock", "no signal"))
        };
        SendOutcome { record, result }
    }

    #[test]
    fn test_counts() {
        let report = DispatchReport::new(vec![
            outcome("07000000001", true),
            outcome("07000000002", false),
            outcome("07000000003", true),
        ]);
        assert_eq!(report.total(), 3);
        assert_eq!(report.sent(), 2);
        assert_eq!(report.failed(), 1);
        assert!(!report.is_success());
        let failed: Vec<_> = report.failures().map(|(r, _)| r.phone_number()).collect();
        assert_eq!(failed, vec!["07000000002"]);
    }

    #[test]
    fn test_into_result_partial_failure() {
        let report = DispatchReport::new(vec![
            outcome("07000000001", true),
            outcome("07000000002", false),
        ]);
        let err = report.into_result().unwrap_err();
        assert!(matches!(
            err,
            DispatchError::PartialFailure {
                failed: 1,
                total: 2,
                ..
            }
        ));
        assert!(err.to_string().contains("07000000002"));
    }

    #[test]
    fn test_empty_report_is_success() {
        let report = DispatchReport::default();
        assert!(report.is_success());
        assert!(report.into_result().is_ok());
    }
}

//! RecipientRecord - Record Loader output
//!
//! One validated CSV row, i.e. one message to send.

use std::fmt;

use serde::Serialize;
use validator::ValidateLength;

use crate::RowDefect;

/// Number of fields in a data row
pub const FIELD_COUNT: usize = 5;

/// Number of digits in a phone number
pub const PHONE_NUMBER_LEN: u64 = 11;

/// Positional fields of a data row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum RecordField {
    PhoneNumber,
    FirstName,
    LastName,
    ExternalId,
    MessageBody,
}

impl RecordField {
    /// Fields in column order
    pub const ALL: [RecordField; FIELD_COUNT] = [
        Self::PhoneNumber,
        Self::FirstName,
        Self::LastName,
        Self::ExternalId,
        Self::MessageBody,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PhoneNumber => "phoneNumber",
            Self::FirstName => "firstName",
            Self::LastName => "lastName",
            Self::ExternalId => "externalId",
            Self::MessageBody => "messageBody",
        }
    }
}

impl fmt::Display for RecordField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single recipient
///
/// Invariant: all fields non-empty, `phone_number` is exactly 11 ASCII digits.
/// Only constructible through [`RecipientRecord::from_row`] or [`RecipientRecord::new`],
/// immutable afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipientRecord {
    phone_number: String,
    first_name: String,
    last_name: String,
    external_id: String,
    message_body: String,
}

impl RecipientRecord {
    /// Build a record from its five fields
    ///
    /// # Errors
    /// Returns the first violated invariant
    pub fn new(
        phone_number: impl Into<String>,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        external_id: impl Into<String>,
        message_body: impl Into<String>,
    ) -> Result<Self, RowDefect> {
        let record = Self {
            phone_number: phone_number.into(),
            first_name: first_name.into(),
            last_name: last_name.into(),
            external_id: external_id.into(),
            message_body: message_body.into(),
        };
        record.check()?;
        Ok(record)
    }

    /// Build a record from a positional row
    ///
    /// Column order: phoneNumber, firstName, lastName, externalId, messageBody.
    ///
    /// # Errors
    /// - Field count other than 5
    /// - Malformed phone number
    /// - Empty text field
    pub fn from_row(fields: &[&str]) -> Result<Self, RowDefect> {
        match fields {
            [phone, first, last, id, body] => Self::new(*phone, *first, *last, *id, *body),
            _ => Err(RowDefect::FieldCount {
                found: fields.len(),
            }),
        }
    }

    pub fn phone_number(&self) -> &str {
        &self.phone_number
    }

    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    pub fn external_id(&self) -> &str {
        &self.external_id
    }

    pub fn message_body(&self) -> &str {
        &self.message_body
    }

    /// "First Last", used in diagnostics
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Value of a positional field
    pub fn field(&self, field: RecordField) -> &str {
        match field {
            RecordField::PhoneNumber => &self.phone_number,
            RecordField::FirstName => &self.first_name,
            RecordField::LastName => &self.last_name,
            RecordField::ExternalId => &self.external_id,
            RecordField::MessageBody => &self.message_body,
        }
    }

    fn check(&self) -> Result<(), RowDefect> {
        if !is_phone_number(&self.phone_number) {
            return Err(RowDefect::PhoneNumber {
                value: self.phone_number.clone(),
            });
        }

        for field in &RecordField::ALL[1..] {
            let value = self.field(*field);
            if !value.validate_length(Some(1), None, None) {
                return Err(RowDefect::EmptyField { field: *field });
            }
        }

        Ok(())
    }
}

/// Exactly 11 ASCII digits
pub fn is_phone_number(value: &str) -> bool {
    value.validate_length(None, None, Some(PHONE_NUMBER_LEN))
        && value.bytes().all(|b| b.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row() -> Vec<&'static str> {
        vec!["07123456789", "Ann", "Lee", "7", "Hi"]
    }

    #[test]
    fn test_from_row_maps_positionally() {
        let record = RecipientRecord::from_row(&row()).unwrap();
        assert_eq!(record.phone_number(), "07123456789");
        assert_eq!(record.first_name(), "Ann");
        assert_eq!(record.last_name(), "Lee");
        assert_eq!(record.external_id(), "7");
        assert_eq!(record.message_body(), "Hi");
        assert_eq!(record.full_name(), "Ann Lee");
    }

    #[test]
    fn test_field_count() {
        let mut fields = row();
        fields.pop();
        assert_eq!(
            RecipientRecord::from_row(&fields),
            Err(RowDefect::FieldCount { found: 4 })
        );

        let mut fields = row();
        fields.push("extra");
        assert_eq!(
            RecipientRecord::from_row(&fields),
            Err(RowDefect::FieldCount { found: 6 })
        );
    }

    #[test]
    fn test_phone_number_rules() {
        assert!(is_phone_number("07123456789"));
        assert!(!is_phone_number("1234567890"));
        assert!(!is_phone_number("071234567890"));
        assert!(!is_phone_number("0712345678a"));
        assert!(!is_phone_number("+7123456789"));
        assert!(!is_phone_number(""));
    }

    #[test]
    fn test_phone_number_checked_before_empty_fields() {
        let result = RecipientRecord::from_row(&["123", "", "", "", ""]);
        assert!(matches!(result, Err(RowDefect::PhoneNumber { .. })));
    }

    #[test]
    fn test_each_empty_field_rejected() {
        for (idx, field) in RecordField::ALL.iter().enumerate().skip(1) {
            let mut fields = row();
            fields[idx] = "";
            assert_eq!(
                RecipientRecord::from_row(&fields),
                Err(RowDefect::EmptyField { field: *field }),
                "column {idx}"
            );
        }
    }

    #[test]
    fn test_whitespace_is_not_empty() {
        let record = RecipientRecord::new("07123456789", " ", "Lee", "7", "Hi");
        assert!(record.is_ok());
    }

    #[test]
    fn test_serialize_camel_case() {
        let record = RecipientRecord::from_row(&row()).unwrap();
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["phoneNumber"], "07123456789");
        assert_eq!(json["externalId"], "7");
    }
}

//! Validation errors for incoming wire records.

use thiserror::Error;

/// Errors raised while decoding or validating a single wire record.
///
/// Validation is per-record: a failed record is reported as a conflict
/// with the failure reason attached, and never aborts the batch it
/// arrived in.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// The record could not be decoded into the entity shape at all
    /// (wrong JSON type, missing required field, unparseable value).
    #[error("malformed record: {0}")]
    Malformed(String),

    /// A field decoded but failed a range or content check.
    #[error("invalid {field}: {reason}")]
    InvalidField {
        /// Name of the offending field.
        field: &'static str,
        /// Why the value was rejected.
        reason: String,
    },
}

impl ValidationError {
    /// Creates an invalid-field error.
    pub fn field(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidField {
            field,
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_error_display() {
        let err = ValidationError::field("sale_price", "must not be negative");
        assert_eq!(err.to_string(), "invalid sale_price: must not be negative");
    }

    #[test]
    fn malformed_display() {
        let err = ValidationError::Malformed("missing field `sku`".into());
        assert!(err.to_string().contains("missing field"));
    }
}

//! Error types for the store.

use thiserror::Error;

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors that can occur while committing a unit of work.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StoreError {
    /// A staged row would duplicate a natural unique key held by a
    /// different row. The whole unit of work is rolled back.
    #[error("unique violation on {field}: {value:?} already belongs to row {existing_id}")]
    UniqueViolation {
        /// Name of the unique field.
        field: &'static str,
        /// The duplicated value.
        value: String,
        /// Id of the row that already owns the value.
        existing_id: i64,
    },
}

//! Error types for the sync engine.

use thiserror::Error;
use tillpoint_store::StoreError;

/// Result type for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;

/// Errors that abort a whole push or pull call.
///
/// Per-record failures (validation, stale writes) are not errors; they
/// are reported inside [`SyncResult`](crate::SyncResult) and never abort
/// the batch.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Entity-type name not present in the registry. Rejected before
    /// any engine work.
    #[error("unknown entity type: {name}")]
    UnknownEntity {
        /// The name that failed to resolve.
        name: String,
    },

    /// Committing the batch's unit of work failed; every staged write
    /// was rolled back and no partial result exists.
    #[error("persistence failure: {0}")]
    Persistence(#[from] StoreError),

    /// An accepted record could not be re-encoded for the response.
    #[error("encode failure: {0}")]
    Encode(#[from] serde_json::Error),
}

impl EngineError {
    /// Creates an unknown-entity error.
    pub fn unknown_entity(name: impl Into<String>) -> Self {
        Self::UnknownEntity { name: name.into() }
    }

    /// Returns true if the caller is at fault (4xx).
    pub fn is_client_error(&self) -> bool {
        matches!(self, EngineError::UnknownEntity { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classification() {
        assert!(EngineError::unknown_entity("gadgets").is_client_error());
        let err = EngineError::Persistence(StoreError::UniqueViolation {
            field: "sku",
            value: "X".into(),
            existing_id: 1,
        });
        assert!(!err.is_client_error());
    }
}

//! Sync metadata carried by every syncable record.

use crate::error::ValidationError;
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Synchronization metadata attached to every entity row.
///
/// `last_updated` is the timestamp of the most recent accepted write and
/// never decreases as a result of a sync operation. `is_active` is the
/// soft-delete flag: inactive rows are kept for audit but excluded from
/// pull results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncMeta {
    /// Timestamp of the most recent accepted write.
    pub last_updated: DateTime<Utc>,
    /// True once server and the submitting client agree on the content.
    #[serde(default)]
    pub synced: bool,
    /// Soft-delete flag; `false` rows exist for audit only.
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

impl SyncMeta {
    /// Creates metadata for a fresh, not-yet-synced row.
    pub fn new(last_updated: DateTime<Utc>) -> Self {
        Self {
            last_updated,
            synced: false,
            is_active: true,
        }
    }

    /// Marks the row as accepted at `stamp`, keeping `last_updated`
    /// monotonically non-decreasing.
    pub fn mark_synced(&mut self, stamp: DateTime<Utc>) {
        self.last_updated = self.last_updated.max(stamp);
        self.synced = true;
    }
}

/// Implemented by every entity type that flows through the sync engine.
///
/// A record owns its server-assigned `id`, its [`SyncMeta`], and its
/// entity-specific fields. Identity is never reassigned or reused across
/// entity types.
pub trait Syncable:
    Serialize + DeserializeOwned + Clone + Send + Sync + 'static
{
    /// Entity-type name as it appears in the sync URL path.
    const KIND: &'static str;

    /// Server-assigned identifier, unique per entity type.
    fn id(&self) -> i64;

    /// Sync metadata for this row.
    fn meta(&self) -> &SyncMeta;

    /// Mutable sync metadata for this row.
    fn meta_mut(&mut self) -> &mut SyncMeta;

    /// Natural unique key enforced at commit, if the entity has one
    /// (e.g. product `sku`, user `username`).
    fn unique_key(&self) -> Option<(&'static str, String)> {
        None
    }

    /// Range and content checks beyond structural decoding.
    fn validate(&self) -> Result<(), ValidationError>;
}

/// Decodes and validates one wire record.
///
/// Structural failures (wrong shape, missing required field) and field
/// validation failures are both reported as [`ValidationError`], scoped
/// to this single record.
pub fn decode_record<R: Syncable>(value: &serde_json::Value) -> Result<R, ValidationError> {
    let record: R = serde_json::from_value(value.clone())
        .map_err(|e| ValidationError::Malformed(e.to_string()))?;
    record.validate()?;
    Ok(record)
}

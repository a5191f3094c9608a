//! Sync outcome reporting.

use serde::{Serialize, Serializer};
use serde_json::Value;
use tillpoint_model::ValidationError;

/// Why an incoming record was routed to `conflicts`.
#[derive(Debug, Clone, PartialEq)]
pub enum ConflictReason {
    /// The stored record's timestamp was greater than or equal to the
    /// incoming one; the server retains authority.
    StoredWins,
    /// The record failed decoding or field validation.
    Invalid(ValidationError),
}

/// One conflicted record with its reason.
///
/// On the wire a conflict entry is the offending incoming record itself;
/// validation failures additionally carry an `_error` field with the
/// reason, matching what terminals already parse.
#[derive(Debug, Clone, PartialEq)]
pub struct ConflictEntry {
    /// The incoming record as received.
    pub record: Value,
    /// Why it conflicted.
    pub reason: ConflictReason,
}

impl ConflictEntry {
    /// Conflict because the stored row won the comparison.
    pub fn stored_wins(record: Value) -> Self {
        Self {
            record,
            reason: ConflictReason::StoredWins,
        }
    }

    /// Conflict because the record failed validation.
    pub fn invalid(record: Value, error: ValidationError) -> Self {
        Self {
            record,
            reason: ConflictReason::Invalid(error),
        }
    }

    fn wire_value(&self) -> Value {
        match &self.reason {
            ConflictReason::StoredWins => self.record.clone(),
            ConflictReason::Invalid(err) => {
                let mut value = self.record.clone();
                match value.as_object_mut() {
                    Some(map) => {
                        map.insert("_error".into(), Value::String(err.to_string()));
                        value
                    }
                    // Not even an object; wrap it so the reason survives.
                    None => serde_json::json!({
                        "record": value,
                        "_error": err.to_string(),
                    }),
                }
            }
        }
    }
}

impl Serialize for ConflictEntry {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.wire_value().serialize(serializer)
    }
}

/// Outcome of one push call.
///
/// The three sets are mutually exclusive per record: every record of the
/// incoming batch lands in exactly one of `synced`/`conflicts`, and
/// `server_updated` reports server-side changes past the caller's
/// watermark (empty when no watermark was supplied).
#[derive(Debug, Clone, Default, Serialize)]
pub struct SyncResult {
    /// Records accepted into the store, as stored (re-stamped).
    #[serde(rename = "synced_records")]
    pub synced: Vec<Value>,
    /// Records rejected per-record, with reasons.
    pub conflicts: Vec<ConflictEntry>,
    /// Active records changed server-side since the watermark.
    pub server_updated: Vec<Value>,
}

impl SyncResult {
    /// True if nothing was accepted, rejected, or reported.
    pub fn is_empty(&self) -> bool {
        self.synced.is_empty() && self.conflicts.is_empty() && self.server_updated.is_empty()
    }
}

/// Pull response body: active records changed since the watermark.
#[derive(Debug, Clone, Serialize)]
pub struct PullResult {
    /// Active records with `last_updated` strictly after the watermark.
    pub server_updated: Vec<Value>,
}

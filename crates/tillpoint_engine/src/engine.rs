//! The compare-and-merge algorithm.

use crate::error::EngineResult;
use crate::result::{ConflictEntry, SyncResult};
use chrono::{DateTime, Utc};
use serde_json::Value;
use tillpoint_model::{decode_record, Syncable};
use tillpoint_store::Table;

/// Applies one batch of incoming records to a table.
///
/// Records are processed strictly in batch order inside a single unit
/// of work. Per record:
///
/// 1. Decode and validate. A malformed record is routed to `conflicts`
///    with its reason and never aborts the batch.
/// 2. Unknown `id` → first-seen insertion, accepted unconditionally.
/// 3. Known `id` → last-write-wins on `last_updated`; ties resolve to
///    the stored row.
///
/// Accepted rows are re-stamped (`synced = true`, `last_updated` bumped
/// to at least now) and staged; the stage commits atomically after the
/// loop, and the result is only returned once the commit has succeeded.
/// When a watermark is supplied, `server_updated` is computed against
/// the committed state, so it includes rows this batch just accepted.
pub fn push_batch<R: Syncable>(
    table: &Table<R>,
    batch: &[Value],
    watermark: Option<DateTime<Utc>>,
) -> EngineResult<SyncResult> {
    let now = Utc::now();
    let mut uow = table.begin();
    let mut synced = Vec::new();
    let mut conflicts: Vec<ConflictEntry> = Vec::new();

    for raw in batch {
        let mut incoming: R = match decode_record(raw) {
            Ok(record) => record,
            Err(err) => {
                tracing::debug!(kind = R::KIND, %err, "rejecting malformed record");
                conflicts.push(ConflictEntry::invalid(raw.clone(), err));
                continue;
            }
        };

        match uow.get(incoming.id()) {
            None => {
                incoming.meta_mut().mark_synced(now);
                synced.push(serde_json::to_value(&incoming)?);
                uow.stage(incoming);
            }
            Some(stored) => {
                if incoming.meta().last_updated > stored.meta().last_updated {
                    incoming.meta_mut().mark_synced(now);
                    synced.push(serde_json::to_value(&incoming)?);
                    uow.stage(incoming);
                } else {
                    // Ties resolve to the stored row. Accepting equal
                    // stamps would let two terminals overwrite each
                    // other on every exchange.
                    conflicts.push(ConflictEntry::stored_wins(raw.clone()));
                }
            }
        }
    }

    let accepted = uow.staged_len();
    uow.commit()?;
    tracing::debug!(
        kind = R::KIND,
        accepted,
        conflicts = conflicts.len(),
        "batch committed"
    );

    let server_updated = match watermark {
        Some(watermark) => table
            .list_changed_since(watermark)
            .iter()
            .map(serde_json::to_value)
            .collect::<Result<Vec<_>, _>>()?,
        None => Vec::new(),
    };

    Ok(SyncResult {
        synced,
        conflicts,
        server_updated,
    })
}

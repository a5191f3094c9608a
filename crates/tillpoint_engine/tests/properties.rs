//! Property tests for the merge algorithm.

use chrono::{DateTime, TimeZone, Utc};
use proptest::prelude::*;
use serde_json::{json, Value};
use tillpoint_engine::push_batch;
use tillpoint_model::Category;
use tillpoint_store::Table;

fn stamp(offset_secs: i64) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap() + chrono::Duration::seconds(offset_secs)
}

/// A wire category record; `valid` controls whether `name` survives.
fn record(id: i64, offset_secs: i64, valid: bool) -> Value {
    let name = if valid { format!("cat-{id}") } else { String::new() };
    json!({
        "id": id,
        "name": name,
        "last_updated": stamp(offset_secs).to_rfc3339(),
    })
}

proptest! {
    /// Every incoming record lands in exactly one of synced/conflicts,
    /// no matter how ids, stamps, and validity interleave.
    #[test]
    fn no_record_is_dropped_or_double_counted(
        entries in prop::collection::vec((1_i64..6, -30_i64..30, any::<bool>()), 0..24)
    ) {
        let table: Table<Category> = Table::new();
        let batch: Vec<Value> = entries
            .iter()
            .map(|&(id, offset, valid)| record(id, offset, valid))
            .collect();

        let result = push_batch(&table, &batch, None).unwrap();
        prop_assert_eq!(result.synced.len() + result.conflicts.len(), batch.len());
    }

    /// Stored timestamps never decrease across a push, and stored rows
    /// are always marked synced.
    #[test]
    fn timestamps_never_decrease(
        first in prop::collection::vec((1_i64..6, -30_i64..30), 1..12),
        second in prop::collection::vec((1_i64..6, -30_i64..30), 1..12),
    ) {
        let table: Table<Category> = Table::new();
        let to_batch = |entries: &[(i64, i64)]| -> Vec<Value> {
            entries.iter().map(|&(id, off)| record(id, off, true)).collect()
        };

        push_batch(&table, &to_batch(&first), None).unwrap();
        let before: Vec<(i64, DateTime<Utc>)> = table
            .list()
            .iter()
            .map(|c| (c.id, c.meta.last_updated))
            .collect();

        push_batch(&table, &to_batch(&second), None).unwrap();

        for (id, old_stamp) in before {
            let row = table.get(id).unwrap();
            prop_assert!(row.meta.last_updated >= old_stamp);
            prop_assert!(row.meta.synced);
        }
    }
}

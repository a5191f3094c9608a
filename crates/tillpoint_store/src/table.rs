//! Entity tables and unit-of-work commits.

use crate::error::{StoreError, StoreResult};
use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use std::collections::{BTreeMap, HashMap};
use tillpoint_model::Syncable;

/// One table holding every row of a single entity type.
///
/// Rows are keyed by the server-assigned id. Reads clone the row; writes
/// go either through [`Table::upsert`] (the CRUD path) or through a
/// [`UnitOfWork`] (the sync path).
pub struct Table<R: Syncable> {
    rows: RwLock<BTreeMap<i64, R>>,
}

impl<R: Syncable> Table<R> {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self {
            rows: RwLock::new(BTreeMap::new()),
        }
    }

    /// Gets a row by id.
    pub fn get(&self, id: i64) -> Option<R> {
        self.rows.read().get(&id).cloned()
    }

    /// Inserts or fully overwrites a row.
    ///
    /// This is the single-row CRUD write; batch writes from the sync
    /// engine go through [`Table::begin`] instead.
    pub fn upsert(&self, record: R) {
        self.rows.write().insert(record.id(), record);
    }

    /// Returns every row, ascending by id.
    pub fn list(&self) -> Vec<R> {
        self.rows.read().values().cloned().collect()
    }

    /// Returns active rows with `last_updated` strictly after the
    /// watermark, ascending by id.
    ///
    /// Soft-deleted rows never appear here regardless of their
    /// timestamp.
    pub fn list_changed_since(&self, watermark: DateTime<Utc>) -> Vec<R> {
        self.rows
            .read()
            .values()
            .filter(|r| r.meta().is_active && r.meta().last_updated > watermark)
            .cloned()
            .collect()
    }

    /// Returns the number of rows.
    pub fn len(&self) -> usize {
        self.rows.read().len()
    }

    /// Returns true if the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.read().is_empty()
    }

    /// Begins a unit of work over this table.
    pub fn begin(&self) -> UnitOfWork<'_, R> {
        UnitOfWork {
            table: self,
            staged: BTreeMap::new(),
        }
    }
}

impl<R: Syncable> Default for Table<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Syncable> std::fmt::Debug for Table<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Table")
            .field("kind", &R::KIND)
            .field("len", &self.len())
            .finish_non_exhaustive()
    }
}

/// A set of staged writes applied atomically at commit.
///
/// Reads through the unit of work see staged rows first, so later
/// records in a batch compare against earlier staged writes for the same
/// id. Dropping the unit of work without committing discards the stage.
pub struct UnitOfWork<'t, R: Syncable> {
    table: &'t Table<R>,
    staged: BTreeMap<i64, R>,
}

impl<R: Syncable> UnitOfWork<'_, R> {
    /// Gets a row by id, staged rows shadowing committed ones.
    pub fn get(&self, id: i64) -> Option<R> {
        self.staged
            .get(&id)
            .cloned()
            .or_else(|| self.table.get(id))
    }

    /// Stages an insert or full-row overwrite.
    pub fn stage(&mut self, record: R) {
        self.staged.insert(record.id(), record);
    }

    /// Returns the number of staged rows.
    pub fn staged_len(&self) -> usize {
        self.staged.len()
    }

    /// Applies every staged row, or nothing.
    ///
    /// Natural unique keys are checked against the post-commit view of
    /// the table under the same write-lock acquisition that applies the
    /// rows, so a violation leaves the table untouched and concurrent
    /// commits cannot interleave.
    pub fn commit(self) -> StoreResult<()> {
        let mut rows = self.table.rows.write();

        let mut keys: HashMap<(&'static str, String), i64> = HashMap::new();
        let mut claim = |record: &R| -> StoreResult<()> {
            if let Some((field, value)) = record.unique_key() {
                if let Some(&existing_id) = keys.get(&(field, value.clone())) {
                    if existing_id != record.id() {
                        return Err(StoreError::UniqueViolation {
                            field,
                            value,
                            existing_id,
                        });
                    }
                }
                keys.insert((field, value), record.id());
            }
            Ok(())
        };

        // Post-commit view: staged rows replace committed rows of the
        // same id, everything else keeps its current key.
        for (id, row) in rows.iter() {
            claim(self.staged.get(id).unwrap_or(row))?;
        }
        for (id, row) in &self.staged {
            if !rows.contains_key(id) {
                claim(row)?;
            }
        }

        for (id, row) in self.staged {
            rows.insert(id, row);
        }
        Ok(())
    }
}

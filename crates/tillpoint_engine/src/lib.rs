//! # Tillpoint Sync Engine
//!
//! Compare-and-merge synchronization for the Tillpoint backend.
//!
//! This crate provides:
//! - The per-record merge algorithm (last-write-wins, ties to the server)
//! - `SyncResult`: applied / conflicted / server-ahead outcome report
//! - A closed, typed adapter registry over the eight entity types
//!
//! ## Key invariants
//!
//! - A record's `last_updated` never decreases through a sync operation
//! - Every incoming record lands in exactly one of `synced`/`conflicts`
//! - `server_updated` never contains a soft-deleted row
//! - A batch's accepted writes commit as one unit of work; the result is
//!   only returned after the commit succeeds

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod engine;
mod error;
mod registry;
mod result;

pub use engine::push_batch;
pub use error::{EngineError, EngineResult};
pub use registry::{EntityAdapter, EntityKind, SyncRegistry, SyncStats, TableAdapter};
pub use result::{ConflictEntry, ConflictReason, PullResult, SyncResult};

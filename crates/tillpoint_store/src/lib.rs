//! # Tillpoint Store
//!
//! Per-entity tables for the Tillpoint sync backend.
//!
//! This crate provides:
//! - `Table<R>`: one in-memory table per entity type
//! - Watermark range queries (`list_changed_since`)
//! - `UnitOfWork`: staged writes applied atomically at commit
//! - Unique-key enforcement at the commit boundary
//!
//! ## Consistency
//!
//! Every table is independent; calls for different entity types never
//! contend. Within one table, a unit of work stages writes privately and
//! applies them under a single write-lock acquisition, so concurrent
//! commits serialize and a reader never observes a half-applied batch.

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod error;
mod table;

pub use error::{StoreError, StoreResult};
pub use table::{Table, UnitOfWork};

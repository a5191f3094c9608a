//! # Tillpoint Model
//!
//! Syncable entity records for the Tillpoint point-of-sale backend.
//!
//! This crate provides:
//! - Sync metadata carried by every record (`SyncMeta`)
//! - The `Syncable` trait implemented by all entity types
//! - The eight entity record types (users, products, categories,
//!   customers, sales, sale items, employees, inventory movements)
//! - Per-record wire decoding and field validation
//!
//! Records travel as JSON; timestamps are ISO-8601 (`chrono` RFC 3339),
//! monetary amounts are `rust_decimal::Decimal`.

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod entities;
mod error;
mod meta;

pub use entities::{
    Category, Customer, Employee, InventoryMovement, MovementType, PaymentMethod, Product, Sale,
    SaleItem, SaleStatus, User, UserRole,
};
pub use error::ValidationError;
pub use meta::{decode_record, SyncMeta, Syncable};

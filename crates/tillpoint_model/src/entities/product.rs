//! Product records.

use crate::error::ValidationError;
use crate::meta::{SyncMeta, Syncable};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A sellable product.
///
/// Prices are non-negative decimals; stock counters are non-negative
/// integers. The `sku` is unique across the products table and enforced
/// when a sync batch commits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Server-assigned identifier.
    pub id: i64,
    /// Stock-keeping unit, unique per store.
    pub sku: String,
    /// Owning category, if categorized.
    pub category_id: Option<i64>,
    /// Display name.
    pub name: String,
    /// Free-form description.
    pub description: Option<String>,
    /// Purchase cost.
    pub cost_price: Decimal,
    /// Retail price.
    pub sale_price: Decimal,
    /// Units currently on hand.
    pub current_stock: i32,
    /// Restock threshold.
    pub min_stock: i32,
    /// Whether the product is sold by weight instead of unit count.
    #[serde(default)]
    pub sell_by_weight: bool,
    /// Synchronization metadata.
    #[serde(flatten)]
    pub meta: SyncMeta,
}

impl Syncable for Product {
    const KIND: &'static str = "products";

    fn id(&self) -> i64 {
        self.id
    }

    fn meta(&self) -> &SyncMeta {
        &self.meta
    }

    fn meta_mut(&mut self) -> &mut SyncMeta {
        &mut self.meta
    }

    fn unique_key(&self) -> Option<(&'static str, String)> {
        Some(("sku", self.sku.clone()))
    }

    fn validate(&self) -> Result<(), ValidationError> {
        if self.sku.trim().is_empty() {
            return Err(ValidationError::field("sku", "must not be empty"));
        }
        if self.name.trim().is_empty() {
            return Err(ValidationError::field("name", "must not be empty"));
        }
        if self.cost_price < Decimal::ZERO {
            return Err(ValidationError::field("cost_price", "must not be negative"));
        }
        if self.sale_price < Decimal::ZERO {
            return Err(ValidationError::field("sale_price", "must not be negative"));
        }
        if self.current_stock < 0 {
            return Err(ValidationError::field(
                "current_stock",
                "must not be negative",
            ));
        }
        if self.min_stock < 0 {
            return Err(ValidationError::field("min_stock", "must not be negative"));
        }
        Ok(())
    }
}

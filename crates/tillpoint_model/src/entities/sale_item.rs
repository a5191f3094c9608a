//! Sale line-item records.

use crate::error::ValidationError;
use crate::meta::{SyncMeta, Syncable};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One line of a sale.
///
/// Quantity is a decimal to support weight-based sales (e.g. 0.350 kg).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaleItem {
    /// Server-assigned identifier.
    pub id: i64,
    /// Owning sale.
    pub sale_id: i64,
    /// Product sold.
    pub product_id: i64,
    /// Quantity sold; strictly positive.
    pub quantity: Decimal,
    /// Price per unit at time of sale.
    pub unit_price: Decimal,
    /// Percentage discount applied to this line.
    #[serde(default)]
    pub discount_percent: Decimal,
    /// Line total after discount.
    pub total_price: Decimal,
    /// Whether this line was sold by weight.
    #[serde(default)]
    pub is_weight_sale: bool,
    /// Weight in kilograms for weight sales.
    pub weight_in_kg: Option<Decimal>,
    /// Operator-entered price override, if any.
    pub custom_price: Option<Decimal>,
    /// Synchronization metadata.
    #[serde(flatten)]
    pub meta: SyncMeta,
}

impl Syncable for SaleItem {
    const KIND: &'static str = "sale_items";

    fn id(&self) -> i64 {
        self.id
    }

    fn meta(&self) -> &SyncMeta {
        &self.meta
    }

    fn meta_mut(&mut self) -> &mut SyncMeta {
        &mut self.meta
    }

    fn validate(&self) -> Result<(), ValidationError> {
        if self.quantity <= Decimal::ZERO {
            return Err(ValidationError::field("quantity", "must be positive"));
        }
        if self.unit_price < Decimal::ZERO {
            return Err(ValidationError::field("unit_price", "must not be negative"));
        }
        if self.total_price < Decimal::ZERO {
            return Err(ValidationError::field("total_price", "must not be negative"));
        }
        if self.discount_percent < Decimal::ZERO || self.discount_percent > Decimal::ONE_HUNDRED {
            return Err(ValidationError::field(
                "discount_percent",
                "must be between 0 and 100",
            ));
        }
        if self.is_weight_sale && self.weight_in_kg.is_none() {
            return Err(ValidationError::field(
                "weight_in_kg",
                "required for weight sales",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use rust_decimal_macros::dec;

    fn sample() -> SaleItem {
        SaleItem {
            id: 1,
            sale_id: 7,
            product_id: 3,
            quantity: dec!(2),
            unit_price: dec!(12.50),
            discount_percent: dec!(0),
            total_price: dec!(25.00),
            is_weight_sale: false,
            weight_in_kg: None,
            custom_price: None,
            meta: SyncMeta::new(Utc::now()),
        }
    }

    #[test]
    fn zero_quantity_rejected() {
        let mut item = sample();
        item.quantity = dec!(0);
        assert!(item.validate().is_err());
    }

    #[test]
    fn fractional_quantity_allowed_for_weight_sale() {
        let mut item = sample();
        item.is_weight_sale = true;
        item.quantity = dec!(0.350);
        item.weight_in_kg = Some(dec!(0.350));
        assert!(item.validate().is_ok());
    }

    #[test]
    fn discount_over_hundred_rejected() {
        let mut item = sample();
        item.discount_percent = dec!(101);
        assert!(item.validate().is_err());
    }
}

//! Sale records.

use crate::error::ValidationError;
use crate::meta::{SyncMeta, Syncable};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Lifecycle status of a sale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SaleStatus {
    /// Opened but not paid.
    Pending,
    /// Paid and closed.
    Completed,
    /// Voided.
    Cancelled,
}

/// Accepted payment methods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    /// Cash at the register.
    Cash,
    /// Credit card.
    CreditCard,
    /// Debit card.
    DebitCard,
    /// Instant bank transfer (PIX).
    Pix,
    /// Other bank transfer.
    Transfer,
}

/// A completed or in-progress sale.
///
/// Monetary totals are recorded as decimals and validated to be
/// non-negative; the arithmetic producing them belongs to the checkout
/// service, not the sync path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sale {
    /// Server-assigned identifier.
    pub id: i64,
    /// Human-readable sale number, unique per store.
    pub sale_number: String,
    /// Lifecycle status.
    pub status: SaleStatus,
    /// Sum of item totals.
    pub subtotal: Decimal,
    /// Tax applied.
    #[serde(default)]
    pub tax_amount: Decimal,
    /// Discount applied.
    #[serde(default)]
    pub discount_amount: Decimal,
    /// Amount charged.
    pub total_amount: Decimal,
    /// How the sale was paid, once known.
    pub payment_method: Option<PaymentMethod>,
    /// Processor-reported payment state.
    pub payment_status: Option<String>,
    /// Buying customer, when identified.
    pub customer_id: Option<i64>,
    /// Employee who rang the sale.
    pub employee_id: Option<i64>,
    /// User session that recorded the sale.
    pub user_id: Option<i64>,
    /// Free-form notes.
    pub notes: Option<String>,
    /// Whether the sale is a delivery order.
    #[serde(default)]
    pub is_delivery: bool,
    /// Delivery address for delivery orders.
    pub delivery_address: Option<String>,
    /// Synchronization metadata.
    #[serde(flatten)]
    pub meta: SyncMeta,
}

impl Syncable for Sale {
    const KIND: &'static str = "sales";

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
        Some(("sale_number", self.sale_number.clone()))
    }

    fn validate(&self) -> Result<(), ValidationError> {
        if self.sale_number.trim().is_empty() {
            return Err(ValidationError::field("sale_number", "must not be empty"));
        }
        for (field, amount) in [
            ("subtotal", self.subtotal),
            ("tax_amount", self.tax_amount),
            ("discount_amount", self.discount_amount),
            ("total_amount", self.total_amount),
        ] {
            if amount < Decimal::ZERO {
                return Err(ValidationError::field(field, "must not be negative"));
            }
        }
        if self.is_delivery && self.delivery_address.is_none() {
            return Err(ValidationError::field(
                "delivery_address",
                "required for delivery sales",
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

    fn sample() -> Sale {
        Sale {
            id: 7,
            sale_number: "S-000123".into(),
            status: SaleStatus::Completed,
            subtotal: dec!(100.00),
            tax_amount: dec!(10.00),
            discount_amount: dec!(0.00),
            total_amount: dec!(110.00),
            payment_method: Some(PaymentMethod::Pix),
            payment_status: Some("approved".into()),
            customer_id: None,
            employee_id: Some(2),
            user_id: None,
            notes: None,
            is_delivery: false,
            delivery_address: None,
            meta: SyncMeta::new(Utc::now()),
        }
    }

    #[test]
    fn status_wire_values() {
        assert_eq!(
            serde_json::to_string(&SaleStatus::Completed).unwrap(),
            r#""completed""#
        );
        assert_eq!(
            serde_json::to_string(&PaymentMethod::CreditCard).unwrap(),
            r#""credit_card""#
        );
    }

    #[test]
    fn delivery_requires_address() {
        let mut sale = sample();
        sale.is_delivery = true;
        assert!(sale.validate().is_err());

        sale.delivery_address = Some("12 Rua das Flores".into());
        assert!(sale.validate().is_ok());
    }

    #[test]
    fn negative_total_rejected() {
        let mut sale = sample();
        sale.total_amount = dec!(-5.00);
        assert!(sale.validate().is_err());
    }
}

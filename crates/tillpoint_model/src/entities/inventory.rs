//! Inventory movement records.

use crate::error::ValidationError;
use crate::meta::{SyncMeta, Syncable};
use serde::{Deserialize, Serialize};

/// Why stock changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MovementType {
    /// Stock received from a supplier.
    Purchase,
    /// Stock sold at the register.
    Sale,
    /// Manual correction.
    Adjustment,
    /// Transfer between locations.
    Transfer,
    /// Customer return.
    Return,
    /// Breakage or loss.
    Loss,
}

/// An audit entry for one stock change.
///
/// `previous_stock` and `new_stock` snapshot the product's counter
/// around the movement; the movement itself never mutates product rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryMovement {
    /// Server-assigned identifier.
    pub id: i64,
    /// Product whose stock changed.
    pub product_id: i64,
    /// Reason for the change.
    pub movement_type: MovementType,
    /// Signed quantity moved.
    pub quantity: i32,
    /// Stock level before the movement.
    pub previous_stock: i32,
    /// Stock level after the movement.
    pub new_stock: i32,
    /// Identifier of the originating document (sale, purchase order).
    pub reference_id: Option<String>,
    /// Kind of the originating document.
    pub reference_type: Option<String>,
    /// Free-form notes.
    pub notes: Option<String>,
    /// Synchronization metadata.
    #[serde(flatten)]
    pub meta: SyncMeta,
}

impl Syncable for InventoryMovement {
    const KIND: &'static str = "inventory_movements";

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
        if self.quantity == 0 {
            return Err(ValidationError::field("quantity", "must not be zero"));
        }
        if self.previous_stock < 0 {
            return Err(ValidationError::field(
                "previous_stock",
                "must not be negative",
            ));
        }
        if self.new_stock < 0 {
            return Err(ValidationError::field("new_stock", "must not be negative"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn movement_type_wire_values() {
        assert_eq!(
            serde_json::to_string(&MovementType::Purchase).unwrap(),
            r#""purchase""#
        );
        assert_eq!(
            serde_json::from_str::<MovementType>(r#""loss""#).unwrap(),
            MovementType::Loss
        );
    }
}

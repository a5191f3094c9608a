//! User account records.

use crate::error::ValidationError;
use crate::meta::{SyncMeta, Syncable};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Access role of a user account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    /// Full administrative access.
    Admin,
    /// Store management access.
    Manager,
    /// Point-of-sale access only.
    Cashier,
    /// Read-only access.
    Viewer,
}

/// A backend user account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// Server-assigned identifier.
    pub id: i64,
    /// Login name, unique per store.
    pub username: String,
    /// Contact e-mail.
    pub email: Option<String>,
    /// Display name.
    pub full_name: String,
    /// Access role.
    pub role: UserRole,
    /// Whether the user may restock products.
    #[serde(default)]
    pub can_supply: bool,
    /// Monthly salary, if tracked.
    pub salary: Option<Decimal>,
    /// Synchronization metadata.
    #[serde(flatten)]
    pub meta: SyncMeta,
}

impl Syncable for User {
    const KIND: &'static str = "users";

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
        Some(("username", self.username.clone()))
    }

    fn validate(&self) -> Result<(), ValidationError> {
        if self.username.trim().is_empty() {
            return Err(ValidationError::field("username", "must not be empty"));
        }
        if self.full_name.trim().is_empty() {
            return Err(ValidationError::field("full_name", "must not be empty"));
        }
        if let Some(salary) = self.salary {
            if salary < Decimal::ZERO {
                return Err(ValidationError::field("salary", "must not be negative"));
            }
        }
        Ok(())
    }
}

//! Employee records.

use crate::error::ValidationError;
use crate::meta::{SyncMeta, Syncable};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A store employee and their terminal permissions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    /// Server-assigned identifier.
    pub id: i64,
    /// Display name.
    pub full_name: String,
    /// Login name, unique per store.
    pub username: String,
    /// Password hash as produced by the auth service.
    pub password_hash: String,
    /// Monthly salary, if tracked.
    pub salary: Option<Decimal>,
    /// Administrative access on the terminal.
    #[serde(default)]
    pub is_admin: bool,
    /// May operate the register.
    #[serde(default = "default_true")]
    pub can_sell: bool,
    /// May record inventory movements.
    #[serde(default)]
    pub can_manage_inventory: bool,
    /// May record expenses.
    #[serde(default)]
    pub can_manage_expenses: bool,
    /// Synchronization metadata.
    #[serde(flatten)]
    pub meta: SyncMeta,
}

fn default_true() -> bool {
    true
}

impl Syncable for Employee {
    const KIND: &'static str = "employees";

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
        if self.full_name.trim().is_empty() {
            return Err(ValidationError::field("full_name", "must not be empty"));
        }
        if self.username.trim().is_empty() {
            return Err(ValidationError::field("username", "must not be empty"));
        }
        if self.password_hash.is_empty() {
            return Err(ValidationError::field("password_hash", "must not be empty"));
        }
        if let Some(salary) = self.salary {
            if salary < Decimal::ZERO {
                return Err(ValidationError::field("salary", "must not be negative"));
            }
        }
        Ok(())
    }
}

//! Customer records.

use crate::error::ValidationError;
use crate::meta::{SyncMeta, Syncable};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A registered customer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    /// Server-assigned identifier.
    pub id: i64,
    /// Customer name.
    pub name: String,
    /// Contact e-mail.
    pub email: Option<String>,
    /// Contact phone.
    pub phone: Option<String>,
    /// National tax identifier (CPF/CNPJ), unique when present.
    pub tax_id: Option<String>,
    /// Street address.
    pub address: Option<String>,
    /// City.
    pub city: Option<String>,
    /// State or province.
    pub state: Option<String>,
    /// Postal code.
    pub zip_code: Option<String>,
    /// Date of birth.
    pub birth_date: Option<NaiveDate>,
    /// Free-form notes.
    pub notes: Option<String>,
    /// Whether the customer has VIP pricing.
    #[serde(default)]
    pub is_vip: bool,
    /// Synchronization metadata.
    #[serde(flatten)]
    pub meta: SyncMeta,
}

impl Syncable for Customer {
    const KIND: &'static str = "customers";

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
        self.tax_id.as_ref().map(|t| ("tax_id", t.clone()))
    }

    fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::field("name", "must not be empty"));
        }
        if let Some(email) = &self.email {
            if !email.contains('@') {
                return Err(ValidationError::field("email", "missing '@'"));
            }
        }
        Ok(())
    }
}

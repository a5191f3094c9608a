//! Product category records.

use crate::error::ValidationError;
use crate::meta::{SyncMeta, Syncable};
use serde::{Deserialize, Serialize};

/// A product category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    /// Server-assigned identifier.
    pub id: i64,
    /// Category name, unique per store.
    pub name: String,
    /// Free-form description.
    pub description: Option<String>,
    /// Display color as `#rrggbb`.
    pub color: Option<String>,
    /// Synchronization metadata.
    #[serde(flatten)]
    pub meta: SyncMeta,
}

impl Syncable for Category {
    const KIND: &'static str = "categories";

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
        Some(("name", self.name.clone()))
    }

    fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::field("name", "must not be empty"));
        }
        if let Some(color) = &self.color {
            let ok = color.len() == 7
                && color.starts_with('#')
                && color[1..].chars().all(|c| c.is_ascii_hexdigit());
            if !ok {
                return Err(ValidationError::field("color", "expected #rrggbb"));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn color_format_checked() {
        let mut cat = Category {
            id: 1,
            name: "Beverages".into(),
            description: None,
            color: Some("#00ff99".into()),
            meta: SyncMeta::new(Utc::now()),
        };
        assert!(cat.validate().is_ok());

        cat.color = Some("00ff99".into());
        assert!(cat.validate().is_err());

        cat.color = Some("#00ff9".into());
        assert!(cat.validate().is_err());
    }
}

use crate::error::{StorageError, StorageResult};
use crate::models::PropertyRecord;
use crate::storage::traits::StorageBackend;
use std::sync::Arc;
use tracing::debug;

/// Slot name the collection is kept under unless configured otherwise
pub const DEFAULT_KEY: &str = "properties";

/// Whole-collection save/load of property records under a fixed key
#[derive(Clone)]
pub struct StorageAdapter {
    backend: Arc<dyn StorageBackend>,
    key: String,
}

impl StorageAdapter {
    pub fn new(backend: Arc<dyn StorageBackend>, key: impl Into<String>) -> Self {
        Self {
            backend,
            key: key.into(),
        }
    }

    /// Slot that receives an unreadable document before it can be overwritten
    pub fn quarantine_key(&self) -> String {
        format!("{}.corrupt", self.key)
    }

    pub fn describe(&self) -> String {
        format!("{:?} in {}", self.key, self.backend.describe())
    }

    pub async fn save(&self, records: &[PropertyRecord]) -> StorageResult<()> {
        let json = serde_json::to_string(records).map_err(StorageError::Serialize)?;
        self.backend.set_item(&self.key, &json).await?;
        debug!("Saved {} properties under {:?}", records.len(), self.key);
        Ok(())
    }

    /// An absent slot is the first-run state and loads as empty
    pub async fn load(&self) -> StorageResult<Vec<PropertyRecord>> {
        let Some(text) = self.backend.get_item(&self.key).await? else {
            debug!("No stored properties under {:?}", self.key);
            return Ok(Vec::new());
        };

        serde_json::from_str(&text).map_err(|source| StorageError::Malformed {
            key: self.key.clone(),
            source,
        })
    }

    /// Copy the current raw document to the quarantine slot
    pub async fn quarantine(&self) -> StorageResult<Option<String>> {
        let Some(text) = self.backend.get_item(&self.key).await? else {
            return Ok(None);
        };
        let target = self.quarantine_key();
        self.backend.set_item(&target, &text).await?;
        Ok(Some(target))
    }
}

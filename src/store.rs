//! In-memory property collection, persisted in full after every mutation.

use crate::error::{StorageError, StorageResult};
use crate::models::{PropertyRecord, RecordId};
use crate::storage::StorageAdapter;
use tracing::{debug, info, warn};

/// Ordered collection of listings for the current session.
///
/// Iteration order is insertion order. Mutations are applied to memory first
/// and then the whole collection is written through the adapter; when that
/// write fails the error is returned but the in-memory change stays.
pub struct PropertyStore {
    records: Vec<PropertyRecord>,
    adapter: StorageAdapter,
}

impl PropertyStore {
    /// Load the collection once from storage.
    ///
    /// A malformed document does not stop the session: it is copied to the
    /// quarantine slot and the store opens empty.
    pub async fn open(adapter: StorageAdapter) -> StorageResult<Self> {
        let records = match adapter.load().await {
            Ok(records) => records,
            Err(StorageError::Malformed { key, source }) => {
                warn!("Stored properties under {:?} are unreadable: {}", key, source);
                match adapter.quarantine().await {
                    Ok(Some(target)) => warn!("Kept the unreadable document under {:?}", target),
                    Ok(None) => {}
                    Err(e) => warn!("Could not keep a copy of the unreadable document: {}", e),
                }
                Vec::new()
            }
            Err(e) => return Err(e),
        };

        info!("Loaded {} properties from {}", records.len(), adapter.describe());
        Ok(Self { records, adapter })
    }

    pub async fn add(&mut self, record: PropertyRecord) -> StorageResult<()> {
        debug!("Adding property {} ({})", record.id, record.name);
        self.records.push(record);
        self.persist().await
    }

    /// Removing an id that is not present is not an error
    pub async fn remove(&mut self, id: RecordId) -> StorageResult<Option<PropertyRecord>> {
        let removed = self
            .records
            .iter()
            .position(|r| r.id == id)
            .map(|pos| self.records.remove(pos));
        if removed.is_none() {
            debug!("No property {} to remove", id);
        }
        self.persist().await?;
        Ok(removed)
    }

    pub fn find(&self, id: RecordId) -> Option<&PropertyRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    pub fn all(&self) -> &[PropertyRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    async fn persist(&self) -> StorageResult<()> {
        self.adapter.save(&self.records).await
    }
}

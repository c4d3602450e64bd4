use crate::error::StorageResult;
use async_trait::async_trait;

/// Durable key-value slots scoped to one data location.
/// Reads of a key that was never written return `None`.
#[async_trait]
pub trait StorageBackend: Send + Sync {
    async fn get_item(&self, key: &str) -> StorageResult<Option<String>>;

    async fn set_item(&self, key: &str, value: &str) -> StorageResult<()>;

    /// Short description used in log lines
    fn describe(&self) -> String;
}

use crate::error::{StorageError, StorageResult};
use crate::storage::traits::StorageBackend;
use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;
use tracing::debug;

/// Slot storage backed by one JSON file per key inside a data directory
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn slot_path(&self, key: &str) -> StorageResult<PathBuf> {
        validate_key(key)?;
        Ok(self.dir.join(format!("{}.json", key)))
    }
}

/// Keys become file names, so no separators and no leading dot
fn validate_key(key: &str) -> StorageResult<()> {
    let valid = !key.is_empty()
        && !key.starts_with('.')
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'));
    if valid {
        Ok(())
    } else {
        Err(StorageError::InvalidKey(key.to_string()))
    }
}

async fn write_synced(path: &Path, value: &str) -> std::io::Result<()> {
    let mut file = tokio::fs::File::create(path).await?;
    file.write_all(value.as_bytes()).await?;
    file.flush().await?;
    file.sync_all().await
}

#[async_trait]
impl StorageBackend for FileStorage {
    async fn get_item(&self, key: &str) -> StorageResult<Option<String>> {
        let path = self.slot_path(key)?;
        match tokio::fs::read_to_string(&path).await {
            Ok(text) => {
                debug!("Read {} bytes from {}", text.len(), path.display());
                Ok(Some(text))
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn set_item(&self, key: &str, value: &str) -> StorageResult<()> {
        let path = self.slot_path(key)?;
        tokio::fs::create_dir_all(&self.dir).await?;

        let temp_path = path.with_extension("json.tmp");
        let written = match write_synced(&temp_path, value).await {
            Ok(()) => tokio::fs::rename(&temp_path, &path).await,
            Err(e) => Err(e),
        };
        if let Err(e) = written {
            if let Err(cleanup) = tokio::fs::remove_file(&temp_path).await {
                debug!("Could not remove {}: {}", temp_path.display(), cleanup);
            }
            return Err(e.into());
        }

        debug!("Wrote {} bytes to {}", value.len(), path.display());
        Ok(())
    }

    fn describe(&self) -> String {
        format!("files in {}", self.dir.display())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn missing_slot_reads_as_none() {
        let dir = tempdir().unwrap();
        let storage = FileStorage::new(dir.path());

        assert_eq!(storage.get_item("properties").await.unwrap(), None);
    }

    #[tokio::test]
    async fn set_creates_directory_and_overwrites() {
        let dir = tempdir().unwrap();
        let storage = FileStorage::new(dir.path().join("nested").join("data"));

        storage.set_item("properties", "[1]").await.unwrap();
        storage.set_item("properties", "[1,2]").await.unwrap();

        assert_eq!(
            storage.get_item("properties").await.unwrap().as_deref(),
            Some("[1,2]")
        );
        assert!(!storage.dir().join("properties.json.tmp").exists());
    }

    #[tokio::test]
    async fn failed_write_leaves_no_temp_file() {
        let dir = tempdir().unwrap();
        let storage = FileStorage::new(dir.path());
        let blocker = dir.path().join("properties.json");
        std::fs::create_dir(&blocker).unwrap();
        std::fs::write(blocker.join("keep"), "x").unwrap();

        let result = storage.set_item("properties", "[]").await;

        assert!(matches!(result, Err(StorageError::Io(_))));
        assert!(!dir.path().join("properties.json.tmp").exists());
        assert!(blocker.join("keep").exists());
    }

    #[tokio::test]
    async fn temp_path_taken_by_a_directory_is_an_error() {
        let dir = tempdir().unwrap();
        let storage = FileStorage::new(dir.path());
        std::fs::create_dir(dir.path().join("properties.json.tmp")).unwrap();

        let result = storage.set_item("properties", "[]").await;

        assert!(matches!(result, Err(StorageError::Io(_))));
        assert_eq!(storage.get_item("properties").await.unwrap(), None);
    }

    #[tokio::test]
    async fn rejects_keys_that_escape_the_directory() {
        let dir = tempdir().unwrap();
        let storage = FileStorage::new(dir.path());

        for key in ["../properties", "a/b", ".hidden", ""] {
            assert!(matches!(
                storage.set_item(key, "[]").await,
                Err(StorageError::InvalidKey(_))
            ));
        }
        assert!(storage.get_item("properties.corrupt").await.unwrap().is_none());
    }
}

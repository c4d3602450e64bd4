use crate::storage::DEFAULT_KEY;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Settings for where listings live and how they are shown
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    /// Directory holding the storage slots
    pub data_dir: PathBuf,
    /// Slot the collection is kept under
    pub storage_key: String,
    /// Label printed before rent amounts
    pub currency: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("property_data"),
            storage_key: DEFAULT_KEY.to_string(),
            currency: "KSh".to_string(),
        }
    }
}

impl AppConfig {
    /// Read a JSON config file; missing keys take their defaults
    pub async fn from_file(path: &Path) -> Result<Self> {
        let text = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        serde_json::from_str(&text)
            .with_context(|| format!("Failed to parse config {}", path.display()))
    }

    /// Defaults, then the optional file, then explicit overrides
    pub async fn load(
        path: Option<&Path>,
        data_dir: Option<PathBuf>,
        storage_key: Option<String>,
    ) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path).await?,
            None => Self::default(),
        };
        if let Some(dir) = data_dir {
            config.data_dir = dir;
        }
        if let Some(key) = storage_key {
            config.storage_key = key;
        }
        Ok(config)
    }
}

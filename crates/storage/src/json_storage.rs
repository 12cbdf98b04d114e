//! JSON file storage implementation.
//!
//! The whole deck lives in one pretty-printed JSON manifest. Every load reads
//! the file again so edits show up without restarting.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use tracing::{debug, info};

use crate::manifest::DeckManifest;
use crate::trait_::{ContentStorage, Result, StorageError};

/// File-based JSON content backend.
#[derive(Debug, Clone)]
pub struct JsonStorage {
    path: PathBuf,
}

impl JsonStorage {
    /// Point storage at a manifest file. Nothing is read until the first load.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Manifest location.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write a manifest, creating parent directories as needed.
    pub async fn save_manifest(&self, manifest: &DeckManifest) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await?;
        }
        let json = serde_json::to_string_pretty(manifest)?;
        fs::write(&self.path, json.as_bytes()).await?;
        info!("Wrote deck manifest to {}", self.path.display());
        Ok(())
    }
}

#[async_trait]
impl ContentStorage for JsonStorage {
    async fn load_manifest(&self) -> Result<DeckManifest> {
        let manifest: DeckManifest = read_json(&self.path)
            .await?
            .ok_or_else(|| StorageError::NotFound(self.path.display().to_string()))?;
        debug!(
            "Loaded deck '{}' ({} objectives, {} assets)",
            manifest.title,
            manifest.objectives.len(),
            manifest.critical_images.len()
        );
        Ok(manifest)
    }
}

async fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<Option<T>> {
    match fs::read_to_string(path).await {
        Ok(json) => {
            let value = serde_json::from_str(&json)?;
            Ok(Some(value))
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let storage = JsonStorage::new(dir.path().join("nested").join("deck.json"));
        let sample = DeckManifest::sample().unwrap();

        storage.save_manifest(&sample).await.unwrap();
        let loaded = storage.load_manifest().await.unwrap();
        assert_eq!(loaded, sample);
    }

    #[tokio::test]
    async fn test_load_missing_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let storage = JsonStorage::new(dir.path().join("absent.json"));

        let err = storage.load_manifest().await.unwrap_err();
        assert!(matches!(err, StorageError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_load_malformed_is_json_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("deck.json");
        std::fs::write(&path, "{ not json").unwrap();

        let err = JsonStorage::new(&path).load_manifest().await.unwrap_err();
        assert!(matches!(err, StorageError::Json(_)));
    }

    #[tokio::test]
    async fn test_default_lookups() {
        let dir = tempfile::tempdir().unwrap();
        let storage = JsonStorage::new(dir.path().join("deck.json"));
        storage.save_manifest(&DeckManifest::sample().unwrap()).await.unwrap();

        let objectives = storage.load_objectives().await.unwrap();
        assert_eq!(
            objectives.iter().map(|o| o.number).collect::<Vec<_>>(),
            vec![1, 2, 3]
        );

        let second = storage.load_objective(2).await.unwrap().unwrap();
        assert_eq!(second.indicators.len(), 2);
        assert!(storage.load_objective(42).await.unwrap().is_none());

        let targets = storage.load_preload_targets().await.unwrap();
        assert_eq!(targets[0].as_str(), "/molbio-black-logo.png");
    }
}

//! Content storage trait abstraction.

use async_trait::async_trait;
use radeck_core::{Objective, PreloadTarget};

use crate::manifest::DeckManifest;

/// Error type for storage operations.
pub type Result<T> = std::result::Result<T, StorageError>;

/// Errors that can occur while loading or saving deck content.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Content file not found
    #[error("Not found: {0}")]
    NotFound(String),
}

/// Source of deck content.
///
/// Content is static for the lifetime of a deck; implementations only read.
#[async_trait]
pub trait ContentStorage: Send + Sync {
    /// Load the whole manifest.
    async fn load_manifest(&self) -> Result<DeckManifest>;

    /// Load all objectives in display order.
    async fn load_objectives(&self) -> Result<Vec<Objective>> {
        Ok(self.load_manifest().await?.objectives)
    }

    /// Load one objective by number.
    async fn load_objective(&self, number: u32) -> Result<Option<Objective>> {
        Ok(self
            .load_objectives()
            .await?
            .into_iter()
            .find(|o| o.number == number))
    }

    /// Load the list of assets to preload before showing the deck.
    async fn load_preload_targets(&self) -> Result<Vec<PreloadTarget>> {
        Ok(self.load_manifest().await?.critical_images)
    }
}

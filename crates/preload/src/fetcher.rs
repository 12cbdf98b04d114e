//! Resource fetchers.
//!
//! A fetcher loads one target and reports how many bytes it read. The
//! preloader only cares whether the fetch settled successfully.

use async_trait::async_trait;
use radeck_core::PreloadTarget;
use reqwest::{Client, ClientBuilder, Url};
use std::path::{Component, Path, PathBuf};
use tracing::debug;

use crate::error::PreloadError;

/// Loads a single resource.
#[async_trait]
pub trait ResourceFetcher: Send + Sync {
    /// Fetch the target, returning the number of bytes read.
    async fn fetch(&self, target: &PreloadTarget) -> Result<u64, PreloadError>;
}

/// Fetches targets over HTTP relative to a base URL.
///
/// No request timeout is configured; a hanging server keeps the target
/// unsettled.
#[derive(Clone)]
pub struct HttpFetcher {
    /// HTTP client
    client: Client,

    /// Base the targets are resolved against
    base: Url,
}

impl HttpFetcher {
    /// Create a fetcher for the given base URL.
    pub fn new(base_url: &str) -> Result<Self, PreloadError> {
        let base = Url::parse(base_url)
            .map_err(|e| PreloadError::InvalidTarget(format!("{}: {}", base_url, e)))?;

        Ok(Self {
            client: ClientBuilder::new().build().unwrap_or_default(),
            base,
        })
    }

    /// Resolve a target the way a browser resolves an image `src`:
    /// absolute URLs are kept, anything else is joined onto the base.
    pub fn resolve(&self, target: &PreloadTarget) -> Result<Url, PreloadError> {
        if let Ok(url) = Url::parse(target.as_str()) {
            return Ok(url);
        }
        self.base
            .join(target.as_str())
            .map_err(|e| PreloadError::InvalidTarget(format!("{}: {}", target, e)))
    }
}

#[async_trait]
impl ResourceFetcher for HttpFetcher {
    async fn fetch(&self, target: &PreloadTarget) -> Result<u64, PreloadError> {
        let url = self.resolve(target)?;
        debug!("GET {}", url);

        let response = self.client.get(url).send().await?;
        if !response.status().is_success() {
            return Err(PreloadError::Status {
                target: target.clone(),
                status: response.status().as_u16(),
            });
        }

        let body = response.bytes().await?;
        Ok(body.len() as u64)
    }
}

/// Fetches targets from a local asset directory.
///
/// `/logo.png` maps to `<root>/logo.png`, matching how a static web root
/// serves the deck's assets.
#[derive(Debug, Clone)]
pub struct FsFetcher {
    root: PathBuf,
}

impl FsFetcher {
    /// Create a fetcher rooted at `root`.
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// Map a target onto a path under the root.
    pub fn resolve(&self, target: &PreloadTarget) -> Result<PathBuf, PreloadError> {
        let relative = Path::new(target.as_str().trim_start_matches('/'));
        if relative.as_os_str().is_empty() {
            return Err(PreloadError::InvalidTarget(format!("{}: empty path", target)));
        }
        if relative
            .components()
            .any(|c| matches!(c, Component::ParentDir | Component::RootDir | Component::Prefix(_)))
        {
            return Err(PreloadError::InvalidTarget(format!(
                "{}: escapes asset root",
                target
            )));
        }
        Ok(self.root.join(relative))
    }
}

#[async_trait]
impl ResourceFetcher for FsFetcher {
    async fn fetch(&self, target: &PreloadTarget) -> Result<u64, PreloadError> {
        let path = self.resolve(target)?;
        let bytes = tokio::fs::read(&path).await?;
        Ok(bytes.len() as u64)
    }
}

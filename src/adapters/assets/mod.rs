//! Asset fetchers
//!
//! An asset is the binary document or image a record points at. Fetch failures
//! are reported as [`AssetError`] and never abort an export.

pub mod http;
pub mod local;

pub use http::HttpAssetFetcher;
pub use local::LocalAssetFetcher;

use crate::config::{AssetSource, AssetsConfig};
use crate::domain::{AssetError, MedirecordError, Result};
use async_trait::async_trait;
use std::sync::Arc;

/// Retrieves the bytes behind an asset locator
#[async_trait]
pub trait AssetFetcher: Send + Sync {
    /// Fetch one asset
    async fn fetch(&self, locator: &str) -> std::result::Result<Vec<u8>, AssetError>;
}

/// Build the fetcher selected by configuration
pub fn create_fetcher(config: &AssetsConfig) -> Result<Arc<dyn AssetFetcher>> {
    match config.source {
        AssetSource::Http => Ok(Arc::new(HttpAssetFetcher::new(config)?)),
        AssetSource::Local => {
            let root = config.local_root.as_deref().ok_or_else(|| {
                MedirecordError::Configuration(
                    "assets.local_root is required when source = 'local'".to_string(),
                )
            })?;
            Ok(Arc::new(LocalAssetFetcher::new(root)?))
        }
    }
}

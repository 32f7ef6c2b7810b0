//! Asset fetching from a local directory tree

use super::AssetFetcher;
use crate::domain::{AssetError, MedirecordError, Result};
use async_trait::async_trait;
use std::path::Path;
use strict_path::{PathBoundary, StrictPath};

/// Reads assets beneath a root directory
///
/// A leading `/` on the locator is stripped, so `/sample-pdfs/a.pdf` maps to
/// `<root>/sample-pdfs/a.pdf`. Locators that would leave the root, directly or
/// through a symlink, are refused.
#[derive(Debug, Clone)]
pub struct LocalAssetFetcher {
    root: PathBoundary,
}

impl LocalAssetFetcher {
    /// Anchor the fetcher at an existing directory
    pub fn new(root: impl AsRef<Path>) -> Result<Self> {
        let root = root.as_ref();
        let boundary = PathBoundary::try_new(root).map_err(|e| {
            MedirecordError::Configuration(format!(
                "assets root {} is not usable: {e}",
                root.display()
            ))
        })?;
        Ok(Self { root: boundary })
    }

    /// Map a locator to a path under the root
    pub fn resolve(&self, locator: &str) -> std::result::Result<StrictPath, AssetError> {
        let relative = locator.trim_start_matches('/');
        if relative.is_empty() {
            return Err(AssetError::Unresolvable(format!("empty locator '{locator}'")));
        }

        self.root
            .strict_join(relative)
            .map_err(|e| AssetError::Unresolvable(format!("{locator}: {e}")))
    }
}

#[async_trait]
impl AssetFetcher for LocalAssetFetcher {
    async fn fetch(&self, locator: &str) -> std::result::Result<Vec<u8>, AssetError> {
        let path = self.resolve(locator)?;
        tokio::fs::read(path.interop_path())
            .await
            .map_err(|e| AssetError::Io(format!("{}: {e}", path.strictpath_display())))
    }
}

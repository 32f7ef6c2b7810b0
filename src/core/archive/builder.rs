//! Asset archive builder
//!
//! Builds the export archive in three steps:
//! 1. Plan every entry from the bundle ([`ArchiveManifest`])
//! 2. Create the container with the summary and all category folders
//! 3. Fetch assets concurrently, then insert them in manifest order
//!
//! A failing asset is recorded as a [`SkippedAsset`] and never aborts the build.

use super::container::{ArchiveContainer, Inserted};
use super::naming::{asset_path, folder_path, is_safe_file_stem};
use crate::adapters::assets::AssetFetcher;
use crate::config::AssetsConfig;
use crate::domain::{AssetError, Category, RecordBundle, RecordId, Result};
use futures::stream::{self, StreamExt};
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;

/// One asset the archive should contain
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedAsset<'a> {
    pub category: Category,
    pub record_id: &'a RecordId,
    pub locator: &'a str,
    /// Entry name inside the archive
    pub path: String,
}

/// Planned archive layout for one bundle
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveManifest<'a> {
    /// Category folders, always all five
    pub folders: Vec<String>,
    /// Assets to fetch, in category then list order
    pub assets: Vec<PlannedAsset<'a>>,
    /// Records whose asset cannot be given a safe entry name
    pub rejected: Vec<SkippedAsset>,
}

impl<'a> ArchiveManifest<'a> {
    pub fn plan(bundle: &'a RecordBundle) -> Self {
        let mut assets = Vec::new();
        let mut rejected = Vec::new();

        for category in Category::ALL {
            for entry in bundle.entries(category) {
                let (Some(locator), Some(path)) = (entry.asset_locator(), asset_path(&entry))
                else {
                    continue;
                };

                if !is_safe_file_stem(entry.id().as_str()) {
                    rejected.push(SkippedAsset {
                        category,
                        record_id: entry.id().clone(),
                        locator: locator.to_string(),
                        reason: "record id is not a valid archive file name".to_string(),
                    });
                    continue;
                }

                assets.push(PlannedAsset {
                    category,
                    record_id: entry.id(),
                    locator,
                    path,
                });
            }
        }

        Self {
            folders: Category::ALL.into_iter().map(folder_path).collect(),
            assets,
            rejected,
        }
    }
}

/// An asset left out of the archive
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedAsset {
    pub category: Category,
    pub record_id: RecordId,
    pub locator: String,
    pub reason: String,
}

/// Result of a successful archive build
#[derive(Debug, Clone)]
pub struct ArchiveOutcome {
    pub bytes: Vec<u8>,
    /// Entry names in write order, folders with a trailing slash
    pub entries: Vec<String>,
    pub skipped: Vec<SkippedAsset>,
}

/// Fetch limits applied while building
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArchiveSettings {
    pub fetch_timeout: Duration,
    pub max_concurrent_fetches: usize,
}

impl ArchiveSettings {
    pub fn from_config(config: &AssetsConfig) -> Self {
        Self {
            fetch_timeout: Duration::from_secs(config.fetch_timeout_seconds),
            max_concurrent_fetches: config.max_concurrent_fetches,
        }
    }
}

impl Default for ArchiveSettings {
    fn default() -> Self {
        Self::from_config(&AssetsConfig::default())
    }
}

/// Packs the summary and the bundle's assets into one zip archive
pub struct ArchiveBuilder {
    fetcher: Arc<dyn AssetFetcher>,
    settings: ArchiveSettings,
}

impl ArchiveBuilder {
    pub fn new(fetcher: Arc<dyn AssetFetcher>, settings: ArchiveSettings) -> Self {
        Self { fetcher, settings }
    }

    /// Build the archive
    ///
    /// # Errors
    ///
    /// A bundle that fails [`RecordBundle::validate`] is rejected before any
    /// fetch. Otherwise only container creation and serialization failures are
    /// returned. Asset failures end up in [`ArchiveOutcome::skipped`].
    pub async fn build(&self, bundle: &RecordBundle, summary: &[u8]) -> Result<ArchiveOutcome> {
        bundle.validate()?;
        let manifest = ArchiveManifest::plan(bundle);

        let mut container = ArchiveContainer::create(summary)?;
        for folder in &manifest.folders {
            container.add_folder(folder)?;
        }

        tracing::debug!(
            subject_id = %bundle.subject.id,
            planned_assets = manifest.assets.len(),
            max_concurrent_fetches = self.settings.max_concurrent_fetches,
            "Fetching assets"
        );

        let fetched = self.fetch_all(&manifest.assets).await;

        let mut skipped = manifest.rejected;
        for (asset, result) in manifest.assets.iter().zip(fetched) {
            let outcome = match result {
                Ok(bytes) => container.insert(&asset.path, &bytes)?,
                Err(e) => Inserted::Rejected(e.to_string()),
            };

            if let Inserted::Rejected(reason) = outcome {
                crate::log_asset_skipped!(asset.category, asset.record_id, asset.locator, reason);
                skipped.push(SkippedAsset {
                    category: asset.category,
                    record_id: asset.record_id.clone(),
                    locator: asset.locator.to_string(),
                    reason,
                });
            }
        }

        let (bytes, entries) = container.finish()?;

        Ok(ArchiveOutcome {
            bytes,
            entries,
            skipped,
        })
    }

    /// Fetch every planned asset; results come back in manifest order
    async fn fetch_all(
        &self,
        assets: &[PlannedAsset<'_>],
    ) -> Vec<std::result::Result<Vec<u8>, AssetError>> {
        stream::iter(assets.iter().map(|asset| self.fetch_one(asset)))
            .buffered(self.settings.max_concurrent_fetches.max(1))
            .collect()
            .await
    }

    async fn fetch_one(
        &self,
        asset: &PlannedAsset<'_>,
    ) -> std::result::Result<Vec<u8>, AssetError> {
        match tokio::time::timeout(self.settings.fetch_timeout, self.fetcher.fetch(asset.locator))
            .await
        {
            Ok(result) => result,
            Err(_) => Err(AssetError::Timeout {
                seconds: self.settings.fetch_timeout.as_secs(),
                locator: asset.locator.to_string(),
            }),
        }
    }
}

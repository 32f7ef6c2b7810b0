//! Record bundle providers
//!
//! The export pipeline treats bundle retrieval as one opaque asynchronous call.
//! Retrying transient failures is the provider's job, not the caller's.

pub mod fixture;
pub mod http;

pub use fixture::FixtureBundleProvider;
pub use http::HttpBundleProvider;

use crate::config::{ProviderConfig, ProviderKind};
use crate::domain::ids::SubjectId;
use crate::domain::{MedirecordError, ProviderError, RecordBundle, Result};
use async_trait::async_trait;
use std::sync::Arc;

/// Source of complete record bundles
///
/// # Example
///
/// ```no_run
/// use medirecord::adapters::provider::{FixtureBundleProvider, RecordBundleProvider};
/// use medirecord::domain::SubjectId;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let provider = FixtureBundleProvider::new("./fixtures")?;
/// let bundle = provider.fetch_bundle(&SubjectId::new("P-1001")?).await?;
/// println!("{} records", bundle.total_records());
/// # Ok(())
/// # }
/// ```
#[async_trait]
pub trait RecordBundleProvider: Send + Sync {
    /// Fetch the full bundle for one subject
    ///
    /// # Errors
    ///
    /// `NotFound` when the subject does not exist, `Unavailable` or `Timeout`
    /// when the source cannot answer, `InvalidResponse` for undecodable data.
    async fn fetch_bundle(&self, subject: &SubjectId) -> std::result::Result<RecordBundle, ProviderError>;

    /// Short name used in logs
    fn name(&self) -> &'static str;
}

/// Build the provider selected by configuration
pub fn create_provider(config: &ProviderConfig) -> Result<Arc<dyn RecordBundleProvider>> {
    match config.kind {
        ProviderKind::Http => Ok(Arc::new(HttpBundleProvider::new(config)?)),
        ProviderKind::Fixture => {
            let dir = config.fixture_dir.as_deref().ok_or_else(|| {
                MedirecordError::Configuration(
                    "provider.fixture_dir is required when kind = 'fixture'".to_string(),
                )
            })?;
            Ok(Arc::new(FixtureBundleProvider::new(dir)?))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_fixture_provider() {
        let config = ProviderConfig {
            kind: ProviderKind::Fixture,
            fixture_dir: Some("./fixtures".to_string()),
            ..Default::default()
        };
        let provider = create_provider(&config).unwrap();
        assert_eq!(provider.name(), "fixture");
    }

    #[test]
    fn test_create_fixture_provider_without_dir() {
        let config = ProviderConfig {
            kind: ProviderKind::Fixture,
            fixture_dir: None,
            ..Default::default()
        };
        assert!(create_provider(&config).is_err());
    }

    #[test]
    fn test_create_http_provider() {
        let config = ProviderConfig {
            base_url: Some("https://records.example.com/api".to_string()),
            ..Default::default()
        };
        let provider = create_provider(&config).unwrap();
        assert_eq!(provider.name(), "http");
    }
}

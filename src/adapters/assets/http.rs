//! Asset fetching over HTTP(S)

use super::AssetFetcher;
use crate::config::AssetsConfig;
use crate::domain::{AssetError, MedirecordError, Result};
use async_trait::async_trait;
use reqwest::{Client, ClientBuilder};
use std::time::Duration;
use url::Url;

/// Fetches assets with a shared HTTP client
///
/// Absolute `http(s)` locators are used as-is. Relative locators such as
/// `/sample-pdfs/report.pdf` are joined onto the configured base URL.
pub struct HttpAssetFetcher {
    base_url: Option<Url>,
    client: Client,
    timeout_seconds: u64,
}

impl HttpAssetFetcher {
    /// # Errors
    ///
    /// Returns a configuration error for an invalid base URL or if the HTTP
    /// client cannot be built.
    pub fn new(config: &AssetsConfig) -> Result<Self> {
        let base_url = config
            .base_url
            .as_deref()
            .map(Url::parse)
            .transpose()
            .map_err(|e| MedirecordError::Configuration(format!("Invalid assets.base_url: {e}")))?;

        if !config.tls_verify {
            tracing::warn!(
                "TLS certificate verification is DISABLED for asset fetches. \
                 This should only be used in development environments."
            );
        }

        let client = ClientBuilder::new()
            .timeout(Duration::from_secs(config.fetch_timeout_seconds))
            .danger_accept_invalid_certs(!config.tls_verify)
            .build()
            .map_err(|e| {
                MedirecordError::Configuration(format!("Failed to build HTTP client: {e}"))
            })?;

        Ok(Self {
            base_url,
            client,
            timeout_seconds: config.fetch_timeout_seconds,
        })
    }

    /// Turn a locator into an absolute URL
    pub fn resolve(&self, locator: &str) -> std::result::Result<Url, AssetError> {
        let url = match Url::parse(locator) {
            Ok(url) => url,
            Err(url::ParseError::RelativeUrlWithoutBase) => {
                let base = self.base_url.as_ref().ok_or_else(|| {
                    AssetError::Unresolvable(format!(
                        "relative locator '{locator}' without assets.base_url"
                    ))
                })?;
                base.join(locator)
                    .map_err(|e| AssetError::Unresolvable(format!("{locator}: {e}")))?
            }
            Err(e) => return Err(AssetError::Unresolvable(format!("{locator}: {e}"))),
        };

        match url.scheme() {
            "http" | "https" => Ok(url),
            other => Err(AssetError::Unresolvable(format!(
                "unsupported scheme '{other}' in {locator}"
            ))),
        }
    }
}

#[async_trait]
impl AssetFetcher for HttpAssetFetcher {
    async fn fetch(&self, locator: &str) -> std::result::Result<Vec<u8>, AssetError> {
        let url = self.resolve(locator)?;

        let response = self.client.get(url).send().await.map_err(|e| {
            if e.is_timeout() {
                AssetError::Timeout {
                    seconds: self.timeout_seconds,
                    locator: locator.to_string(),
                }
            } else {
                AssetError::Connection(e.to_string())
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(AssetError::Status {
                status: status.as_u16(),
                locator: locator.to_string(),
            });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| AssetError::Connection(format!("failed to read {locator}: {e}")))?;

        Ok(bytes.to_vec())
    }
}

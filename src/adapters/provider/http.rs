//! Records API provider over HTTP
//!
//! Fetches `GET {base_url}/patients/{subject}/records` and decodes the JSON
//! bundle. Connection failures, timeouts and 5xx/429 answers are retried with
//! exponential backoff; everything else fails on the first attempt.

use super::RecordBundleProvider;
use crate::config::{ProviderConfig, RetryConfig, SecretString};
use crate::domain::ids::SubjectId;
use crate::domain::{MedirecordError, ProviderError, RecordBundle, Result};
use async_trait::async_trait;
use reqwest::{Client, ClientBuilder, StatusCode};
use secrecy::ExposeSecret;
use std::time::Duration;
use url::Url;

/// HTTP record bundle provider
pub struct HttpBundleProvider {
    base_url: Url,
    client: Client,
    api_token: Option<SecretString>,
    retry: RetryConfig,
}

impl HttpBundleProvider {
    /// Create a provider from configuration
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the base URL is missing or invalid, or
    /// the HTTP client cannot be built.
    pub fn new(config: &ProviderConfig) -> Result<Self> {
        let raw = config.base_url.as_deref().ok_or_else(|| {
            MedirecordError::Configuration("provider.base_url is required".to_string())
        })?;
        let base_url = Url::parse(raw).map_err(|e| {
            MedirecordError::Configuration(format!("Invalid provider.base_url '{raw}': {e}"))
        })?;

        let client = ClientBuilder::new()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .connect_timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| {
                MedirecordError::Configuration(format!("Failed to build HTTP client: {e}"))
            })?;

        Ok(Self {
            base_url,
            client,
            api_token: config.api_token.clone(),
            retry: config.retry.clone(),
        })
    }

    /// URL of the bundle endpoint for a subject
    fn records_url(&self, subject: &SubjectId) -> std::result::Result<Url, ProviderError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| {
                ProviderError::InvalidResponse(format!(
                    "base URL cannot carry a path: {}",
                    self.base_url
                ))
            })?
            .pop_if_empty()
            .push("patients")
            .push(subject.as_str())
            .push("records");
        Ok(url)
    }

    async fn fetch_once(&self, url: &Url) -> std::result::Result<RecordBundle, ProviderError> {
        let mut request = self.client.get(url.clone());
        if let Some(token) = &self.api_token {
            request = request.bearer_auth(token.expose_secret());
        }

        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                ProviderError::Timeout(e.to_string())
            } else {
                ProviderError::Unavailable(e.to_string())
            }
        })?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(ProviderError::NotFound(url.to_string()));
        }
        if status.is_server_error() || status == StatusCode::TOO_MANY_REQUESTS {
            return Err(ProviderError::Unavailable(format!(
                "records API answered {status}"
            )));
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::InvalidResponse(format!(
                "records API rejected the request with {status}: {body}"
            )));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| ProviderError::Unavailable(format!("failed to read body: {e}")))?;

        serde_json::from_slice(&body)
            .map_err(|e| ProviderError::InvalidResponse(format!("malformed bundle: {e}")))
    }
}

#[async_trait]
impl RecordBundleProvider for HttpBundleProvider {
    async fn fetch_bundle(
        &self,
        subject: &SubjectId,
    ) -> std::result::Result<RecordBundle, ProviderError> {
        let url = self.records_url(subject)?;
        let max_attempts = self.retry.max_attempts.max(1);
        let mut attempt = 0;

        loop {
            attempt += 1;
            match self.fetch_once(&url).await {
                Ok(bundle) => {
                    tracing::debug!(subject_id = %subject, attempt, "Fetched record bundle");
                    return Ok(bundle);
                }
                Err(e) if e.is_transient() && attempt < max_attempts => {
                    let delay_ms = self.retry.delay_for_attempt(attempt);
                    tracing::warn!(
                        subject_id = %subject,
                        attempt,
                        max_attempts,
                        delay_ms,
                        error = %e,
                        "Retrying bundle request after error"
                    );
                    tokio::time::sleep(Duration::from_millis(delay_ms)).await;
                }
                Err(e) => return Err(e),
            }
        }
    }

    fn name(&self) -> &'static str {
        "http"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn provider(base_url: &str) -> HttpBundleProvider {
        let config = ProviderConfig {
            base_url: Some(base_url.to_string()),
            ..Default::default()
        };
        HttpBundleProvider::new(&config).unwrap()
    }

    #[test]
    fn test_records_url() {
        let p = provider("https://records.example.com/api");
        let subject = SubjectId::new("P-1001").unwrap();
        assert_eq!(
            p.records_url(&subject).unwrap().as_str(),
            "https://records.example.com/api/patients/P-1001/records"
        );
    }

    #[test]
    fn test_records_url_trailing_slash_and_escaping() {
        let p = provider("https://records.example.com/api/");
        let subject = SubjectId::new("P 10/01").unwrap();
        assert_eq!(
            p.records_url(&subject).unwrap().as_str(),
            "https://records.example.com/api/patients/P%2010%2F01/records"
        );
    }

    #[test]
    fn test_new_rejects_missing_base_url() {
        let config = ProviderConfig {
            base_url: None,
            ..Default::default()
        };
        assert!(HttpBundleProvider::new(&config).is_err());
    }
}

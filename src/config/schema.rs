//! Configuration schema types
//!
//! This module defines the configuration structure that maps to `medirecord.toml`.

use crate::config::SecretString;
use serde::{Deserialize, Serialize};

/// Runtime environment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Development environment
    #[default]
    Development,
    /// Staging environment
    Staging,
    /// Production environment
    Production,
}

/// Main MediRecord configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MedirecordConfig {
    /// Application-level settings
    #[serde(default)]
    pub application: ApplicationConfig,

    /// Runtime environment (development, staging, production)
    #[serde(default)]
    pub environment: Environment,

    /// Where record bundles come from
    pub provider: ProviderConfig,

    /// How remote assets are fetched
    #[serde(default)]
    pub assets: AssetsConfig,

    /// Export pipeline settings
    #[serde(default)]
    pub export: ExportConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl MedirecordConfig {
    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns an error describing the first invalid value found
    pub fn validate(&self) -> Result<(), String> {
        self.application.validate()?;
        self.provider.validate()?;
        self.assets.validate(&self.environment)?;
        self.export.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}

/// Application-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl ApplicationConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level.as_str()) {
            return Err(format!(
                "Invalid log_level '{}'. Must be one of: {}",
                self.log_level,
                valid_levels.join(", ")
            ));
        }
        Ok(())
    }
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

/// Retry configuration for the record bundle provider
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetryConfig {
    /// Maximum number of attempts (1 = no retry)
    #[serde(default = "default_max_attempts")]
    pub max_attempts: usize,

    /// Initial delay in milliseconds
    #[serde(default = "default_initial_delay_ms")]
    pub initial_delay_ms: u64,

    /// Maximum delay in milliseconds
    #[serde(default = "default_max_delay_ms")]
    pub max_delay_ms: u64,

    /// Backoff multiplier
    #[serde(default = "default_backoff_multiplier")]
    pub backoff_multiplier: f64,
}

impl RetryConfig {
    /// Delay before the given retry attempt (1-based)
    pub fn delay_for_attempt(&self, attempt: usize) -> u64 {
        let factor = self
            .backoff_multiplier
            .powf(attempt.saturating_sub(1) as f64);
        let delay_ms = (self.initial_delay_ms as f64 * factor) as u64;
        delay_ms.min(self.max_delay_ms)
    }

    fn validate(&self) -> Result<(), String> {
        if self.max_attempts == 0 {
            return Err("provider.retry.max_attempts must be >= 1".to_string());
        }
        if self.backoff_multiplier < 1.0 {
            return Err("provider.retry.backoff_multiplier must be >= 1.0".to_string());
        }
        Ok(())
    }
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            initial_delay_ms: default_initial_delay_ms(),
            max_delay_ms: default_max_delay_ms(),
            backoff_multiplier: default_backoff_multiplier(),
        }
    }
}

/// Record bundle provider selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    /// Records API over HTTP
    #[default]
    Http,
    /// JSON bundle files on disk
    Fixture,
}

/// Record bundle provider configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Provider implementation
    #[serde(default)]
    pub kind: ProviderKind,

    /// Base URL of the records API (required for `http`)
    #[serde(default)]
    pub base_url: Option<String>,

    /// Directory of `<subject-id>.json` bundles (required for `fixture`)
    #[serde(default)]
    pub fixture_dir: Option<String>,

    /// Bearer token for the records API
    /// Stored securely in memory and automatically zeroized on drop
    #[serde(default)]
    pub api_token: Option<SecretString>,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,

    /// Retry policy for transient failures
    #[serde(default)]
    pub retry: RetryConfig,
}

impl ProviderConfig {
    fn validate(&self) -> Result<(), String> {
        match self.kind {
            ProviderKind::Http => {
                let base_url = self.base_url.as_deref().unwrap_or_default();
                if base_url.is_empty() {
                    return Err("provider.base_url is required when kind = 'http'".to_string());
                }
                if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
                    return Err("provider.base_url must start with http:// or https://".to_string());
                }
            }
            ProviderKind::Fixture => {
                if self.fixture_dir.as_deref().unwrap_or_default().is_empty() {
                    return Err(
                        "provider.fixture_dir is required when kind = 'fixture'".to_string()
                    );
                }
            }
        }

        if self.timeout_seconds == 0 {
            return Err("provider.timeout_seconds must be > 0".to_string());
        }

        self.retry.validate()
    }
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            kind: ProviderKind::Http,
            base_url: Some("http://localhost:3000/api".to_string()),
            fixture_dir: None,
            api_token: None,
            timeout_seconds: default_timeout_seconds(),
            retry: RetryConfig::default(),
        }
    }
}

/// Asset source selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum AssetSource {
    /// Fetch over HTTP(S)
    #[default]
    Http,
    /// Read from a local directory
    Local,
}

/// Asset fetching configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssetsConfig {
    /// Asset source implementation
    #[serde(default)]
    pub source: AssetSource,

    /// Base URL that relative locators are resolved against
    #[serde(default)]
    pub base_url: Option<String>,

    /// Root directory for `local` assets
    #[serde(default)]
    pub local_root: Option<String>,

    /// Time budget for a single asset fetch, in seconds
    #[serde(default = "default_fetch_timeout_seconds")]
    pub fetch_timeout_seconds: u64,

    /// Maximum number of asset fetches in flight
    #[serde(default = "default_max_concurrent_fetches")]
    pub max_concurrent_fetches: usize,

    /// TLS certificate verification enabled
    #[serde(default = "default_true")]
    pub tls_verify: bool,
}

impl AssetsConfig {
    fn validate(&self, environment: &Environment) -> Result<(), String> {
        if self.source == AssetSource::Local
            && self.local_root.as_deref().unwrap_or_default().is_empty()
        {
            return Err("assets.local_root is required when source = 'local'".to_string());
        }

        if let Some(base_url) = &self.base_url {
            if url::Url::parse(base_url).is_err() {
                return Err(format!("assets.base_url '{base_url}' is not a valid URL"));
            }
        }

        if self.fetch_timeout_seconds == 0 {
            return Err("assets.fetch_timeout_seconds must be > 0".to_string());
        }

        if self.max_concurrent_fetches == 0 || self.max_concurrent_fetches > 32 {
            return Err("assets.max_concurrent_fetches must be between 1 and 32".to_string());
        }

        if *environment == Environment::Production && !self.tls_verify {
            return Err(
                "TLS certificate verification cannot be disabled in production environments"
                    .to_string(),
            );
        }

        Ok(())
    }
}

impl Default for AssetsConfig {
    fn default() -> Self {
        Self {
            source: AssetSource::Http,
            base_url: None,
            local_root: None,
            fetch_timeout_seconds: default_fetch_timeout_seconds(),
            max_concurrent_fetches: default_max_concurrent_fetches(),
            tls_verify: true,
        }
    }
}

/// Export pipeline configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Directory the finished archives are written to
    #[serde(default = "default_output_dir")]
    pub output_dir: String,

    /// Interval between progress ticks while assets are archived
    #[serde(default = "default_progress_tick_ms")]
    pub progress_tick_ms: u64,

    /// Grace delay before progress resets to idle
    #[serde(default = "default_reset_delay_ms")]
    pub reset_delay_ms: u64,

    /// Render a section page even when the category has no records
    #[serde(default = "default_true")]
    pub render_empty_sections: bool,
}

impl ExportConfig {
    fn validate(&self) -> Result<(), String> {
        if self.output_dir.trim().is_empty() {
            return Err("export.output_dir cannot be empty".to_string());
        }
        if self.progress_tick_ms == 0 {
            return Err("export.progress_tick_ms must be > 0".to_string());
        }
        Ok(())
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            progress_tick_ms: default_progress_tick_ms(),
            reset_delay_ms: default_reset_delay_ms(),
            render_empty_sections: true,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Enable local JSON file logging
    #[serde(default)]
    pub local_enabled: bool,

    /// Local log directory
    #[serde(default = "default_local_path")]
    pub local_path: String,

    /// Log rotation strategy (daily, hourly, never)
    #[serde(default = "default_local_rotation")]
    pub local_rotation: String,
}

impl LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_rotations = ["daily", "hourly", "never"];
        if !valid_rotations.contains(&self.local_rotation.as_str()) {
            return Err(format!(
                "Invalid logging.local_rotation '{}'. Must be one of: {}",
                self.local_rotation,
                valid_rotations.join(", ")
            ));
        }

        if self.local_enabled && self.local_path.trim().is_empty() {
            return Err("logging.local_path cannot be empty when local logging is enabled".to_string());
        }

        Ok(())
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            local_enabled: false,
            local_path: default_local_path(),
            local_rotation: default_local_rotation(),
        }
    }
}

// Default value functions
fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

fn default_timeout_seconds() -> u64 {
    30
}

fn default_max_attempts() -> usize {
    3
}

fn default_initial_delay_ms() -> u64 {
    500
}

fn default_max_delay_ms() -> u64 {
    10_000
}

fn default_backoff_multiplier() -> f64 {
    2.0
}

fn default_fetch_timeout_seconds() -> u64 {
    15
}

fn default_max_concurrent_fetches() -> usize {
    4
}

fn default_output_dir() -> String {
    "./exports".to_string()
}

fn default_progress_tick_ms() -> u64 {
    500
}

fn default_reset_delay_ms() -> u64 {
    1000
}

fn default_local_path() -> String {
    "./logs".to_string()
}

fn default_local_rotation() -> String {
    "daily".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::secret::secret_string;

    fn http_provider() -> ProviderConfig {
        ProviderConfig {
            base_url: Some("https://records.example.com/api".to_string()),
            api_token: Some(secret_string("token".to_string())),
            ..Default::default()
        }
    }

    #[test]
    fn test_application_config_validation() {
        let mut config = ApplicationConfig {
            log_level: "info".to_string(),
        };
        assert!(config.validate().is_ok());

        config.log_level = "verbose".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_provider_http_requires_base_url() {
        let mut config = http_provider();
        assert!(config.validate().is_ok());

        config.base_url = None;
        assert!(config.validate().is_err());

        config.base_url = Some("ftp://records.example.com".to_string());
        let err = config.validate().unwrap_err();
        assert!(err.contains("must start with http://"));
    }

    #[test]
    fn test_provider_fixture_requires_dir() {
        let mut config = ProviderConfig {
            kind: ProviderKind::Fixture,
            base_url: None,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        config.fixture_dir = Some("./fixtures".to_string());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_retry_delay_backoff() {
        let retry = RetryConfig {
            max_attempts: 5,
            initial_delay_ms: 100,
            max_delay_ms: 350,
            backoff_multiplier: 2.0,
        };
        assert_eq!(retry.delay_for_attempt(1), 100);
        assert_eq!(retry.delay_for_attempt(2), 200);
        assert_eq!(retry.delay_for_attempt(3), 350);
    }

    #[test]
    fn test_assets_config_validation() {
        let mut config = AssetsConfig::default();
        assert!(config.validate(&Environment::Development).is_ok());

        config.max_concurrent_fetches = 0;
        assert!(config.validate(&Environment::Development).is_err());

        config.max_concurrent_fetches = 4;
        config.source = AssetSource::Local;
        assert!(config.validate(&Environment::Development).is_err());

        config.local_root = Some("./public".to_string());
        assert!(config.validate(&Environment::Development).is_ok());

        config.base_url = Some("not a url".to_string());
        assert!(config.validate(&Environment::Development).is_err());
    }

    #[test]
    fn test_assets_tls_verification_in_production() {
        let config = AssetsConfig {
            tls_verify: false,
            ..Default::default()
        };

        assert!(config.validate(&Environment::Development).is_ok());
        assert!(config.validate(&Environment::Staging).is_ok());

        let err = config.validate(&Environment::Production).unwrap_err();
        assert!(err.contains("cannot be disabled in production"));
    }

    #[test]
    fn test_export_config_validation() {
        let mut config = ExportConfig::default();
        assert!(config.validate().is_ok());
        assert!(config.render_empty_sections);

        config.progress_tick_ms = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_logging_config_default() {
        let config = LoggingConfig::default();
        assert!(!config.local_enabled);
        assert_eq!(config.local_rotation, "daily");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_full_config_validation() {
        let config = MedirecordConfig {
            application: ApplicationConfig::default(),
            environment: Environment::Production,
            provider: http_provider(),
            assets: AssetsConfig::default(),
            export: ExportConfig::default(),
            logging: LoggingConfig {
                local_rotation: "weekly".to_string(),
                ..Default::default()
            },
        };

        let err = config.validate().unwrap_err();
        assert!(err.contains("local_rotation"));
    }
}

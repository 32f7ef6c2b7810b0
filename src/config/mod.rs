//! Configuration management for MediRecord.
//!
//! MediRecord reads a TOML file with support for:
//! - Environment variable substitution (`${VAR_NAME}`)
//! - `MEDIRECORD_<SECTION>_<KEY>` environment overrides
//! - Default values for optional settings
//! - Validation on load
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use medirecord::config::load_config;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("medirecord.toml")?;
//! println!("Archives go to {}", config.export.output_dir);
//! # Ok(())
//! # }
//! ```
//!
//! # Example Configuration
//!
//! ```toml
//! [application]
//! log_level = "info"
//!
//! [provider]
//! kind = "http"
//! base_url = "https://records.example.com/api"
//! api_token = "${MEDIRECORD_API_TOKEN}"
//!
//! [assets]
//! source = "http"
//! base_url = "https://records.example.com"
//! fetch_timeout_seconds = 15
//! max_concurrent_fetches = 4
//!
//! [export]
//! output_dir = "./exports"
//! ```

pub mod loader;
pub mod schema;
pub mod secret;

pub use loader::{load_config, parse_config};
pub use schema::{
    ApplicationConfig, AssetSource, AssetsConfig, Environment, ExportConfig, LoggingConfig,
    MedirecordConfig, ProviderConfig, ProviderKind, RetryConfig,
};
pub use secret::{secret_string, SecretString, SecretValue};

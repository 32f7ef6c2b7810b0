//! External system integrations for MediRecord.
//!
//! This module provides adapters for the collaborators around the export core:
//!
//! - [`provider`] - Record bundle retrieval (records API over HTTP, JSON fixtures)
//! - [`assets`] - Asset retrieval (HTTP(S), local directory)
//! - [`delivery`] - Hand-off of finished archives (output directory)
//!
//! # Design Pattern
//!
//! Adapters follow the **Adapter Pattern** to isolate external dependencies and
//! enable testing with mock implementations. Each seam is an async trait so the
//! export coordinator can be driven by in-memory fakes in tests.
//!
//! ```rust,no_run
//! use medirecord::adapters::provider::{HttpBundleProvider, RecordBundleProvider};
//! use medirecord::config::ProviderConfig;
//! use medirecord::domain::SubjectId;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ProviderConfig {
//!     base_url: Some("https://records.example.com/api".to_string()),
//!     ..Default::default()
//! };
//!
//! let provider = HttpBundleProvider::new(&config)?;
//! let bundle = provider.fetch_bundle(&SubjectId::new("P-1001")?).await?;
//! # Ok(())
//! # }
//! ```

pub mod assets;
pub mod delivery;
pub mod provider;

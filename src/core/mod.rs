//! Core business logic for MediRecord.
//!
//! This module contains the export pipeline itself.
//!
//! # Modules
//!
//! - [`layout`] - Summary document synthesis (page composition and PDF rendering)
//! - [`archive`] - Asset retrieval and zip packaging with per-asset fault isolation
//! - [`export`] - Export orchestration, progress reporting and reports
//!
//! # Export Workflow
//!
//! 1. **Fetch**: Request the subject's record bundle from the provider
//! 2. **Synthesize**: Lay out and render the summary PDF
//! 3. **Archive**: Fetch assets concurrently, skip failures, pack everything
//! 4. **Deliver**: Hand the archive to the sink
//! 5. **Report**: Produce an [`export::ExportReport`]
//!
//! # Example
//!
//! ```rust,no_run
//! use medirecord::config::load_config;
//! use medirecord::core::export::ExportCoordinator;
//! use medirecord::domain::SubjectId;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("medirecord.toml")?;
//! let coordinator = ExportCoordinator::from_config(&config)?;
//!
//! let progress = |percent: u8| eprintln!("{percent}%");
//! let report = coordinator
//!     .export_records(&SubjectId::new("P-1001")?, &progress)
//!     .await?;
//!
//! println!("Wrote {}", report.location.display());
//! println!("Skipped assets: {}", report.skipped.len());
//! # Ok(())
//! # }
//! ```

pub mod archive;
pub mod export;
pub mod layout;

// MediRecord - Patient Data Export Pipeline
// Copyright (c) 2025 MediRecord Contributors
// Licensed under the MIT License

//! # MediRecord - Patient Data Export Pipeline
//!
//! MediRecord packages a patient's medical records into a single downloadable
//! zip archive: a synthesized, paginated summary PDF plus every referenced
//! document and image that could be retrieved.
//!
//! ## Overview
//!
//! This library provides:
//! - **Fetching** a subject's record bundle from a records API or fixture files
//! - **Synthesizing** a summary PDF with cover, personal information, one
//!   section per record category and a closing disclaimer
//! - **Archiving** the summary and remote assets, fetched concurrently, where a
//!   failed asset is skipped and reported instead of aborting the export
//! - **Delivering** the archive and reporting progress as a 0-100 value
//!
//! ## Architecture
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`core`] - Pipeline logic (layout, archive, export orchestration)
//! - [`adapters`] - External integrations (records API, asset sources, delivery)
//! - [`domain`] - Record bundle model and error types
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use medirecord::config::load_config;
//! use medirecord::core::export::{ExportCoordinator, NoProgress};
//! use medirecord::domain::SubjectId;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = load_config("medirecord.toml")?;
//!     let coordinator = ExportCoordinator::from_config(&config)?;
//!
//!     let report = coordinator
//!         .export_records(&SubjectId::new("P-1001")?, &NoProgress)
//!         .await?;
//!
//!     println!("Archive written to {}", report.location.display());
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! Fatal failures surface as [`domain::MedirecordError`]. Per-asset failures
//! never do: they are collected in [`core::export::ExportReport::skipped`].
//!
//! ## Logging
//!
//! MediRecord uses structured logging with the `tracing` crate; see
//! [`logging::init_logging`].

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;

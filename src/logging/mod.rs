//! Logging and observability
//!
//! This module provides structured logging with support for:
//! - Console output filtered by level or `RUST_LOG`
//! - JSON-formatted local file logs with rotation
//!
//! # Example
//!
//! ```no_run
//! use medirecord::logging::init_logging;
//! use medirecord::config::LoggingConfig;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//!
//! tracing::info!("Application started");
//! ```

pub mod structured;

pub use structured::{init_logging, LoggingGuard};

/// Log the start of an export operation
///
/// # Example
///
/// ```no_run
/// use medirecord::log_export_start;
/// use medirecord::domain::SubjectId;
///
/// let subject = SubjectId::new("P-1001").unwrap();
/// log_export_start!(&subject, "3f0c9a42");
/// ```
#[macro_export]
macro_rules! log_export_start {
    ($subject_id:expr, $export_id:expr) => {
        tracing::info!(
            subject_id = %$subject_id,
            export_id = %$export_id,
            "Starting export"
        );
    };
}

/// Log the completion of an export operation
///
/// # Example
///
/// ```no_run
/// use medirecord::log_export_complete;
/// use std::time::Duration;
///
/// log_export_complete!("patient_data_P-1001_2024-01-01.zip", 12, Duration::from_secs(2));
/// ```
#[macro_export]
macro_rules! log_export_complete {
    ($file_name:expr, $entries:expr, $duration:expr) => {
        tracing::info!(
            file_name = %$file_name,
            entries = $entries,
            duration_ms = $duration.as_millis() as u64,
            "Export completed"
        );
    };
}

/// Log an asset that was left out of the archive
///
/// # Example
///
/// ```no_run
/// use medirecord::log_asset_skipped;
///
/// log_asset_skipped!("medical_images", "img-001", "/scans/chest.jpg", "status 404");
/// ```
#[macro_export]
macro_rules! log_asset_skipped {
    ($category:expr, $record_id:expr, $locator:expr, $reason:expr) => {
        tracing::warn!(
            category = %$category,
            record_id = %$record_id,
            locator = %$locator,
            reason = %$reason,
            "Asset skipped"
        );
    };
}

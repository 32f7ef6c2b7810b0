//! Asset archive builder
//!
//! Packages the summary document and every retrievable asset into a zip
//! archive with a fixed layout:
//!
//! ```text
//! patient_summary.pdf
//! medical_records/<id>.pdf
//! prescriptions/<id>.pdf
//! test_results/<id>.pdf
//! medical_images/<id><ext>
//! certificates/<id>.pdf
//! ```

pub mod builder;
mod container;
pub mod naming;

pub use builder::{
    ArchiveBuilder, ArchiveManifest, ArchiveOutcome, ArchiveSettings, PlannedAsset, SkippedAsset,
};
pub use naming::SUMMARY_FILE_NAME;

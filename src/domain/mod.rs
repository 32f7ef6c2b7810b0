//! Domain models and types for MediRecord.
//!
//! # Overview
//!
//! The domain layer provides:
//! - **Strongly-typed identifiers** ([`SubjectId`], [`RecordId`])
//! - **The record bundle model** ([`RecordBundle`], [`Subject`], the five record
//!   types, [`Category`] and the [`RecordEntry`] sum type)
//! - **Error types** ([`MedirecordError`], [`ProviderError`], [`AssetError`],
//!   [`ArchiveError`])
//! - **Result type alias** ([`Result`])
//!
//! # Example
//!
//! ```rust
//! use medirecord::domain::{Category, RecordBundle};
//!
//! # fn example(bundle: &RecordBundle) -> medirecord::domain::Result<()> {
//! bundle.validate()?;
//! for category in Category::ALL {
//!     for entry in bundle.entries(category) {
//!         println!("{}/{}", category.folder_name(), entry.id());
//!     }
//! }
//! # Ok(())
//! # }
//! ```

pub mod bundle;
pub mod errors;
pub mod ids;
pub mod records;
pub mod result;
pub mod subject;

pub use bundle::{Category, RecordBundle, RecordEntry};
pub use errors::{ArchiveError, AssetError, MedirecordError, ProviderError};
pub use ids::{RecordId, SubjectId};
pub use records::{
    Certificate, CertificateStatus, MedicalImage, Prescription, PrescriptionStatus, TestResult,
    VisitRecord,
};
pub use result::Result;
pub use subject::Subject;

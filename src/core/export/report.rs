//! Export report
//!
//! Describes one finished export: what was delivered, where, and which assets
//! could not be included.

use crate::core::archive::SkippedAsset;
use crate::domain::ids::SubjectId;
use serde::Serialize;
use sha2::{Digest, Sha256};
use std::path::PathBuf;
use std::time::Duration;
use uuid::Uuid;

/// Summary of a delivered export
#[derive(Debug, Clone, Serialize)]
pub struct ExportReport {
    /// Unique id of this export run
    pub export_id: Uuid,

    pub subject_id: SubjectId,

    /// Archive file name, `patient_data_<subject>_<date>.zip`
    pub file_name: String,

    /// Where the sink put the archive
    pub location: PathBuf,

    /// Archive size in bytes
    pub archive_size: usize,

    /// Hex-encoded SHA-256 of the archive bytes
    pub sha256: String,

    /// Number of records in the exported bundle
    pub record_count: usize,

    /// Archive entry names in write order
    pub entries: Vec<String>,

    /// Assets left out of the archive
    pub skipped: Vec<SkippedAsset>,

    #[serde(rename = "duration_ms", serialize_with = "serialize_millis")]
    pub duration: Duration,
}

impl ExportReport {
    /// True when every referenced asset made it into the archive
    pub fn is_complete(&self) -> bool {
        self.skipped.is_empty()
    }

    /// Number of asset files in the archive, excluding folders and the summary
    pub fn asset_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|name| name.contains('/') && !name.ends_with('/'))
            .count()
    }

    /// Log the report
    pub fn log_summary(&self) {
        tracing::info!(
            export_id = %self.export_id,
            subject_id = %self.subject_id,
            file_name = %self.file_name,
            location = %self.location.display(),
            archive_size = self.archive_size,
            sha256 = %self.sha256,
            records = self.record_count,
            assets = self.asset_count(),
            skipped = self.skipped.len(),
            duration_ms = self.duration.as_millis() as u64,
            "Export report"
        );

        if !self.is_complete() {
            tracing::warn!(
                skipped = self.skipped.len(),
                "Some files could not be included in the archive"
            );
        }
    }
}

/// Hex-encoded SHA-256 digest
pub fn sha256_hex(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    format!("{:x}", hasher.finalize())
}

fn serialize_millis<S: serde::Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_u64(duration.as_millis() as u64)
}

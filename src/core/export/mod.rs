//! Export orchestration
//!
//! This module provides the public entry point of the pipeline:
//! - Export coordination ([`ExportCoordinator`])
//! - Progress reporting ([`ProgressSink`], [`ProgressTracker`])
//! - The export phase state machine ([`ExportPhase`])
//! - Reporting ([`ExportReport`])

pub mod coordinator;
pub mod progress;
pub mod report;
pub mod state;

pub use coordinator::{archive_file_name, ExportCoordinator, ExportSettings};
pub use progress::{NoProgress, ProgressSink, ProgressTracker};
pub use report::{sha256_hex, ExportReport};
pub use state::{ActiveExport, ExportPhase, PhaseTracker};

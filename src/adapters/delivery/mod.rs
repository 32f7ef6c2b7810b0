//! Archive delivery
//!
//! A sink receives the finished archive and its file name. What "delivery"
//! means (a file on disk, an upload, a download response) is up to the sink.

pub mod directory;

pub use directory::DirectorySink;

use crate::domain::Result;
use async_trait::async_trait;
use std::path::PathBuf;

/// Consumer of finished archives
#[async_trait]
pub trait ArchiveSink: Send + Sync {
    /// Hand off one archive
    ///
    /// # Errors
    ///
    /// Returns `MedirecordError::Delivery` if the archive could not be handed off.
    async fn deliver(&self, file_name: &str, bytes: &[u8]) -> Result<Delivered>;
}

/// Where a delivered archive ended up
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Delivered {
    pub location: PathBuf,
}

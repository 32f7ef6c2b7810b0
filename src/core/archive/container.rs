//! In-memory zip container

use super::naming::SUMMARY_FILE_NAME;
use crate::domain::ArchiveError;
use std::io::{Cursor, Write};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

/// Outcome of inserting one asset
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Inserted {
    Written,
    /// The entry could not be added; the container is unchanged
    Rejected(String),
}

/// Zip archive being written into memory
///
/// Owned by a single build; entries are appended sequentially.
pub(crate) struct ArchiveContainer {
    writer: ZipWriter<Cursor<Vec<u8>>>,
    options: SimpleFileOptions,
    entries: Vec<String>,
}

impl ArchiveContainer {
    /// Create the container with the summary document at its root
    pub(crate) fn create(summary: &[u8]) -> Result<Self, ArchiveError> {
        let mut container = Self {
            writer: ZipWriter::new(Cursor::new(Vec::new())),
            options: SimpleFileOptions::default()
                .compression_method(CompressionMethod::Deflated)
                .unix_permissions(0o644),
            entries: Vec::new(),
        };

        let creation_error =
            |e: &dyn std::fmt::Display| ArchiveError::ContainerCreation(format!("{SUMMARY_FILE_NAME}: {e}"));
        container
            .writer
            .start_file(SUMMARY_FILE_NAME, container.options)
            .map_err(|e| creation_error(&e))?;
        container
            .writer
            .write_all(summary)
            .map_err(|e| creation_error(&e))?;
        container.entries.push(SUMMARY_FILE_NAME.to_string());

        Ok(container)
    }

    pub(crate) fn add_folder(&mut self, folder: &str) -> Result<(), ArchiveError> {
        self.writer
            .add_directory(folder, self.options)
            .map_err(|e| ArchiveError::ContainerCreation(format!("{folder}: {e}")))?;
        self.entries.push(folder.to_string());
        Ok(())
    }

    /// Insert one asset
    ///
    /// A rejected entry leaves earlier entries intact. Failing to roll back a
    /// partially written entry leaves the container unusable and is fatal.
    pub(crate) fn insert(&mut self, path: &str, bytes: &[u8]) -> Result<Inserted, ArchiveError> {
        // Nothing was started, so there is nothing to abort
        if let Err(e) = self.writer.start_file(path, self.options) {
            return Ok(Inserted::Rejected(format!("failed to start archive entry: {e}")));
        }

        if let Err(e) = self.writer.write_all(bytes) {
            self.writer.abort_file().map_err(|abort| {
                ArchiveError::Serialization(format!("{path}: {e}; rollback failed: {abort}"))
            })?;
            return Ok(Inserted::Rejected(format!("failed to write archive entry: {e}")));
        }

        self.entries.push(path.to_string());
        Ok(Inserted::Written)
    }

    /// Serialize the container, returning its bytes and entry names
    pub(crate) fn finish(self) -> Result<(Vec<u8>, Vec<String>), ArchiveError> {
        let cursor = self
            .writer
            .finish()
            .map_err(|e| ArchiveError::Serialization(e.to_string()))?;
        Ok((cursor.into_inner(), self.entries))
    }
}

//! Writes archives into an output directory

use super::{ArchiveSink, Delivered};
use crate::domain::{MedirecordError, Result};
use async_trait::async_trait;
use std::path::{Path, PathBuf};

/// Sink that saves each archive as a file in one directory
///
/// The archive is written under a temporary name and renamed into place, so
/// the final file name only ever holds a complete archive.
#[derive(Debug, Clone)]
pub struct DirectorySink {
    output_dir: PathBuf,
}

impl DirectorySink {
    pub fn new(output_dir: impl AsRef<Path>) -> Self {
        Self {
            output_dir: output_dir.as_ref().to_path_buf(),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }
}

#[async_trait]
impl ArchiveSink for DirectorySink {
    async fn deliver(&self, file_name: &str, bytes: &[u8]) -> Result<Delivered> {
        if file_name.is_empty() || file_name.contains(['/', '\\']) {
            return Err(MedirecordError::Delivery(format!(
                "invalid archive file name '{file_name}'"
            )));
        }

        tokio::fs::create_dir_all(&self.output_dir).await.map_err(|e| {
            MedirecordError::Delivery(format!(
                "failed to create {}: {e}",
                self.output_dir.display()
            ))
        })?;

        let location = self.output_dir.join(file_name);
        let partial = self.output_dir.join(format!(".{file_name}.partial"));

        if let Err(e) = tokio::fs::write(&partial, bytes).await {
            let _ = tokio::fs::remove_file(&partial).await;
            return Err(MedirecordError::Delivery(format!(
                "failed to write {}: {e}",
                partial.display()
            )));
        }
        if let Err(e) = tokio::fs::rename(&partial, &location).await {
            let _ = tokio::fs::remove_file(&partial).await;
            return Err(MedirecordError::Delivery(format!(
                "failed to move archive to {}: {e}",
                location.display()
            )));
        }

        tracing::debug!(
            location = %location.display(),
            bytes = bytes.len(),
            "Archive written"
        );

        Ok(Delivered { location })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_deliver_creates_directory_and_file() {
        let dir = TempDir::new().unwrap();
        let sink = DirectorySink::new(dir.path().join("nested/exports"));

        let delivered = sink.deliver("archive.zip", b"PK\x05\x06").await.unwrap();

        assert_eq!(delivered.location, dir.path().join("nested/exports/archive.zip"));
        assert_eq!(std::fs::read(&delivered.location).unwrap(), b"PK\x05\x06");

        let names: Vec<_> = std::fs::read_dir(dir.path().join("nested/exports"))
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(names, vec!["archive.zip"]);
    }

    #[tokio::test]
    async fn test_failed_rename_leaves_no_partial_file() {
        let dir = TempDir::new().unwrap();
        // A directory at the target name makes the final rename fail
        std::fs::create_dir(dir.path().join("archive.zip")).unwrap();
        std::fs::write(dir.path().join("archive.zip/keep"), b"").unwrap();
        let sink = DirectorySink::new(dir.path());

        let err = sink.deliver("archive.zip", b"PK").await.unwrap_err();

        assert!(matches!(err, MedirecordError::Delivery(_)));
        assert!(!dir.path().join(".archive.zip.partial").exists());
    }

    #[tokio::test]
    async fn test_deliver_rejects_path_in_file_name() {
        let dir = TempDir::new().unwrap();
        let sink = DirectorySink::new(dir.path());

        let err = sink.deliver("../escape.zip", b"x").await.unwrap_err();
        assert!(matches!(err, MedirecordError::Delivery(_)));
    }

    #[tokio::test]
    async fn test_deliver_into_file_path_fails() {
        let dir = TempDir::new().unwrap();
        let blocker = dir.path().join("not-a-dir");
        std::fs::write(&blocker, b"").unwrap();
        let sink = DirectorySink::new(&blocker);

        let err = sink.deliver("archive.zip", b"x").await.unwrap_err();
        assert!(matches!(err, MedirecordError::Delivery(_)));
    }
}

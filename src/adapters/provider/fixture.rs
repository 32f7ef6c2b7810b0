//! Record bundles read from JSON files on disk
//!
//! Each subject lives in `<dir>/<subject-id>.json` in the records API payload format.

use super::RecordBundleProvider;
use crate::domain::ids::SubjectId;
use crate::domain::{MedirecordError, ProviderError, RecordBundle, Result};
use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::Path;
use strict_path::{PathBoundary, StrictPath};

/// Provider backed by a directory of bundle files
#[derive(Debug, Clone)]
pub struct FixtureBundleProvider {
    dir: PathBoundary,
}

impl FixtureBundleProvider {
    /// Anchor the provider at an existing fixture directory
    pub fn new(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref();
        let boundary = PathBoundary::try_new(dir).map_err(|e| {
            MedirecordError::Configuration(format!(
                "fixture directory {} is not usable: {e}",
                dir.display()
            ))
        })?;
        Ok(Self { dir: boundary })
    }

    fn bundle_path(&self, subject: &SubjectId) -> std::result::Result<StrictPath, ProviderError> {
        let id = subject.as_str();
        if id.contains(['/', '\\']) {
            return Err(ProviderError::NotFound(format!("invalid subject id '{subject}'")));
        }
        self.dir
            .strict_join(format!("{id}.json"))
            .map_err(|e| ProviderError::NotFound(format!("invalid subject id '{subject}': {e}")))
    }
}

#[async_trait]
impl RecordBundleProvider for FixtureBundleProvider {
    async fn fetch_bundle(
        &self,
        subject: &SubjectId,
    ) -> std::result::Result<RecordBundle, ProviderError> {
        let strict = self.bundle_path(subject)?;
        let path = Path::new(strict.interop_path());

        let raw = tokio::fs::read(path).await.map_err(|e| match e.kind() {
            ErrorKind::NotFound => ProviderError::NotFound(path.display().to_string()),
            _ => ProviderError::Unavailable(format!("{}: {e}", path.display())),
        })?;

        let bundle: RecordBundle = serde_json::from_slice(&raw).map_err(|e| {
            ProviderError::InvalidResponse(format!("{}: {e}", path.display()))
        })?;

        if bundle.subject.id != *subject {
            return Err(ProviderError::InvalidResponse(format!(
                "{} holds subject '{}', expected '{subject}'",
                path.display(),
                bundle.subject.id
            )));
        }

        tracing::debug!(path = %path.display(), "Loaded fixture bundle");
        Ok(bundle)
    }

    fn name(&self) -> &'static str {
        "fixture"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const MINIMAL: &str = r#"{
        "personalInfo": {
            "id": "P-2002",
            "name": "Jane Roe",
            "dateOfBirth": "1990-02-01",
            "gender": "Female",
            "bloodType": "O+"
        }
    }"#;

    #[tokio::test]
    async fn test_reads_bundle_file() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("P-2002.json"), MINIMAL).unwrap();

        let provider = FixtureBundleProvider::new(dir.path()).unwrap();
        let bundle = provider
            .fetch_bundle(&SubjectId::new("P-2002").unwrap())
            .await
            .unwrap();

        assert_eq!(bundle.subject.name, "Jane Roe");
        assert_eq!(bundle.total_records(), 0);
    }

    #[tokio::test]
    async fn test_missing_file_is_not_found() {
        let dir = TempDir::new().unwrap();
        let provider = FixtureBundleProvider::new(dir.path()).unwrap();

        let err = provider
            .fetch_bundle(&SubjectId::new("P-404").unwrap())
            .await
            .unwrap_err();
        assert!(matches!(err, ProviderError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_path_traversal_is_not_found() {
        let dir = TempDir::new().unwrap();
        let provider = FixtureBundleProvider::new(dir.path()).unwrap();

        let err = provider
            .fetch_bundle(&SubjectId::new("../etc/passwd").unwrap())
            .await
            .unwrap_err();
        assert!(matches!(err, ProviderError::NotFound(_)));

        let err = provider
            .fetch_bundle(&SubjectId::new("..").unwrap())
            .await
            .unwrap_err();
        assert!(matches!(err, ProviderError::NotFound(_)));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_symlinked_bundle_outside_dir_is_not_found() {
        let outside = TempDir::new().unwrap();
        std::fs::write(outside.path().join("target.json"), MINIMAL).unwrap();

        let dir = TempDir::new().unwrap();
        std::os::unix::fs::symlink(
            outside.path().join("target.json"),
            dir.path().join("P-2002.json"),
        )
        .unwrap();
        let provider = FixtureBundleProvider::new(dir.path()).unwrap();

        let err = provider
            .fetch_bundle(&SubjectId::new("P-2002").unwrap())
            .await
            .unwrap_err();
        assert!(matches!(err, ProviderError::NotFound(_)));
    }

    #[test]
    fn test_missing_dir_is_configuration_error() {
        let dir = TempDir::new().unwrap();
        assert!(matches!(
            FixtureBundleProvider::new(dir.path().join("absent")),
            Err(MedirecordError::Configuration(_))
        ));
    }

    #[tokio::test]
    async fn test_malformed_json_is_invalid_response() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("P-2002.json"), "{ not json").unwrap();
        let provider = FixtureBundleProvider::new(dir.path()).unwrap();

        let err = provider
            .fetch_bundle(&SubjectId::new("P-2002").unwrap())
            .await
            .unwrap_err();
        assert!(matches!(err, ProviderError::InvalidResponse(_)));
    }

    #[tokio::test]
    async fn test_subject_mismatch_is_invalid_response() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("P-3003.json"), MINIMAL).unwrap();
        let provider = FixtureBundleProvider::new(dir.path()).unwrap();

        let err = provider
            .fetch_bundle(&SubjectId::new("P-3003").unwrap())
            .await
            .unwrap_err();
        assert!(matches!(err, ProviderError::InvalidResponse(_)));
    }
}

//! Domain error types
//!
//! This module defines the error hierarchy for MediRecord. Fatal errors travel as
//! [`MedirecordError`]; per-asset failures stay inside the archive builder as
//! [`AssetError`] and are never converted into the fatal type.

use thiserror::Error;

/// Main MediRecord error type
///
/// Every fatal failure of an export surfaces as one of these variants.
#[derive(Debug, Error)]
pub enum MedirecordError {
    /// The subject's record bundle could not be retrieved
    #[error("Bundle unavailable: {0}")]
    BundleUnavailable(#[from] ProviderError),

    /// The bundle violates a data invariant
    #[error("Validation error: {0}")]
    Validation(String),

    /// Summary document synthesis failed
    #[error("Layout error: {0}")]
    Layout(String),

    /// Archive container could not be created or serialized
    #[error("Archive error: {0}")]
    Archive(#[from] ArchiveError),

    /// The finished archive could not be handed off
    #[error("Delivery error: {0}")]
    Delivery(String),

    /// Another export is already running on this coordinator
    #[error("An export is already in progress")]
    ExportInProgress,

    /// Shutdown was requested before the archive was delivered
    #[error("Export cancelled before delivery")]
    Cancelled,

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Record bundle provider errors
#[derive(Debug, Error)]
pub enum ProviderError {
    /// No bundle exists for the subject
    #[error("Subject not found: {0}")]
    NotFound(String),

    /// The provider could not be reached or kept failing
    #[error("Provider unavailable: {0}")]
    Unavailable(String),

    /// The provider answered with something that is not a bundle
    #[error("Invalid response from provider: {0}")]
    InvalidResponse(String),

    /// The provider did not answer in time
    #[error("Provider request timed out: {0}")]
    Timeout(String),
}

impl ProviderError {
    /// Whether retrying the request could succeed
    pub fn is_transient(&self) -> bool {
        matches!(self, ProviderError::Unavailable(_) | ProviderError::Timeout(_))
    }
}

/// Failure to retrieve a single remote asset
///
/// Asset failures are isolated per record: the archive builder records them
/// and moves on.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AssetError {
    /// The locator cannot be turned into something fetchable
    #[error("Unresolvable asset locator: {0}")]
    Unresolvable(String),

    /// The asset server answered with a non-success status
    #[error("Asset request failed with status {status}: {locator}")]
    Status { status: u16, locator: String },

    /// Network failure while fetching
    #[error("Asset connection failed: {0}")]
    Connection(String),

    /// The fetch exceeded its time budget
    #[error("Asset fetch timed out after {seconds}s: {locator}")]
    Timeout { seconds: u64, locator: String },

    /// Local read failure
    #[error("Asset I/O error: {0}")]
    Io(String),
}

/// Archive container errors
#[derive(Debug, Error)]
pub enum ArchiveError {
    /// The container or one of its fixed entries could not be created
    #[error("Failed to create archive container: {0}")]
    ContainerCreation(String),

    /// The populated container could not be finalized
    #[error("Failed to serialize archive: {0}")]
    Serialization(String),
}

// Conversion from std::io::Error
impl From<std::io::Error> for MedirecordError {
    fn from(err: std::io::Error) -> Self {
        MedirecordError::Io(err.to_string())
    }
}

// Conversion from serde_json::Error
impl From<serde_json::Error> for MedirecordError {
    fn from(err: serde_json::Error) -> Self {
        MedirecordError::Serialization(err.to_string())
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for MedirecordError {
    fn from(err: toml::de::Error) -> Self {
        MedirecordError::Configuration(format!("TOML parse error: {err}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_medirecord_error_display() {
        let err = MedirecordError::Configuration("Invalid config".to_string());
        assert_eq!(err.to_string(), "Configuration error: Invalid config");
    }

    #[test]
    fn test_provider_error_conversion() {
        let provider_err = ProviderError::NotFound("P-404".to_string());
        let err: MedirecordError = provider_err.into();
        assert!(matches!(err, MedirecordError::BundleUnavailable(_)));
        assert_eq!(err.to_string(), "Bundle unavailable: Subject not found: P-404");
    }

    #[test]
    fn test_archive_error_conversion() {
        let err: MedirecordError = ArchiveError::Serialization("disk full".to_string()).into();
        assert!(matches!(err, MedirecordError::Archive(_)));
    }

    #[test]
    fn test_provider_error_transience() {
        assert!(ProviderError::Unavailable("503".to_string()).is_transient());
        assert!(ProviderError::Timeout("30s".to_string()).is_transient());
        assert!(!ProviderError::NotFound("x".to_string()).is_transient());
        assert!(!ProviderError::InvalidResponse("x".to_string()).is_transient());
    }

    #[test]
    fn test_asset_error_display() {
        let err = AssetError::Status {
            status: 404,
            locator: "/sample-pdfs/missing.pdf".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Asset request failed with status 404: /sample-pdfs/missing.pdf"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "File not found");
        let err: MedirecordError = io_err.into();
        assert!(matches!(err, MedirecordError::Io(_)));
    }

    #[test]
    fn test_serde_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("invalid json").unwrap_err();
        let err: MedirecordError = json_err.into();
        assert!(matches!(err, MedirecordError::Serialization(_)));
    }

    #[test]
    fn test_toml_error_conversion() {
        let toml_err = toml::from_str::<toml::Value>("invalid = toml = syntax").unwrap_err();
        let err: MedirecordError = toml_err.into();
        assert!(matches!(err, MedirecordError::Configuration(_)));
        assert!(err.to_string().contains("TOML parse error"));
    }
}

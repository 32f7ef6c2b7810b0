//! Integration tests for logging functionality

mod common;

use medirecord::adapters::assets::LocalAssetFetcher;
use medirecord::config::LoggingConfig;
use medirecord::core::archive::{ArchiveBuilder, ArchiveSettings};
use medirecord::logging::init_logging;
use std::sync::Arc;
use tempfile::TempDir;

#[test]
fn test_logging_config_default() {
    let config = LoggingConfig::default();
    assert!(!config.local_enabled);
    assert_eq!(config.local_rotation, "daily");
    assert_eq!(config.local_path, "./logs");
}

#[test]
fn test_invalid_level_is_rejected_before_install() {
    let err = init_logging("verbose", &LoggingConfig::default())
        .err()
        .unwrap();
    assert!(err.to_string().contains("Invalid log level"));
}

// The global subscriber can be installed once per process, so file output and
// the second-install error are checked in a single test.
#[tokio::test]
async fn test_file_logging_writes_json_lines() {
    let temp_dir = TempDir::new().unwrap();
    let log_path = temp_dir.path().join("logs");

    let config = LoggingConfig {
        local_enabled: true,
        local_path: log_path.to_string_lossy().to_string(),
        local_rotation: "never".to_string(),
    };

    let guard = init_logging("info", &config).unwrap();
    assert!(log_path.exists());

    // No assets on disk: every asset is skipped with a warning
    let assets = TempDir::new().unwrap();
    let builder = ArchiveBuilder::new(
        Arc::new(LocalAssetFetcher::new(assets.path()).unwrap()),
        ArchiveSettings::default(),
    );
    let outcome = builder
        .build(&common::sample_bundle(), b"%PDF-summary")
        .await
        .unwrap();
    assert_eq!(outcome.skipped.len(), 17);

    assert!(init_logging("info", &LoggingConfig::default()).is_err());

    drop(guard);

    let contents = std::fs::read_to_string(log_path.join("medirecord.log")).unwrap();
    let lines: Vec<serde_json::Value> = contents
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();

    assert!(lines
        .iter()
        .any(|l| l["fields"]["message"] == "Logging initialized"));
    assert!(lines
        .iter()
        .any(|l| l["level"] == "WARN" && l["fields"]["record_id"] == "img-002"));
    assert!(lines
        .iter()
        .all(|l| l["target"].as_str().unwrap_or_default().starts_with("medirecord")));
}

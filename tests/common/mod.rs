//! Shared helpers for integration tests

#![allow(dead_code)]

use medirecord::domain::{RecordBundle, SubjectId};
use std::io::{Cursor, Read};
use std::path::{Path, PathBuf};

/// Directory holding the sample bundles
pub fn fixtures_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures")
}

/// The sample bundle for subject P-1001
pub fn sample_bundle() -> RecordBundle {
    let text = std::fs::read_to_string(fixtures_dir().join("P-1001.json")).unwrap();
    serde_json::from_str(&text).unwrap()
}

pub fn sample_subject() -> SubjectId {
    SubjectId::new("P-1001").unwrap()
}

/// Write an asset file below `root` at the locator's path
pub fn write_asset(root: &Path, locator: &str, bytes: &[u8]) {
    let path = root.join(locator.trim_start_matches('/'));
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, bytes).unwrap();
}

/// Entry names of a zip archive, in archive order
pub fn zip_entry_names(bytes: &[u8]) -> Vec<String> {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
    (0..archive.len())
        .map(|i| archive.by_index(i).unwrap().name().to_string())
        .collect()
}

/// Contents of one zip entry
pub fn zip_entry(bytes: &[u8], name: &str) -> Vec<u8> {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
    let mut file = archive.by_name(name).unwrap();
    let mut out = Vec::new();
    file.read_to_end(&mut out).unwrap();
    out
}

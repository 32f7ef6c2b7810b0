//! Archive entry naming
//!
//! Entry names are a pure function of the record's category, id and (for
//! images) the asset locator, so exporting the same bundle twice yields the
//! same layout.

use crate::domain::{Category, RecordEntry};

/// Name of the summary document at the archive root
pub const SUMMARY_FILE_NAME: &str = "patient_summary.pdf";

/// Extension of every non-image asset
pub const DOCUMENT_EXTENSION: &str = ".pdf";

/// Image extension used when the locator does not carry a usable one
pub const FALLBACK_IMAGE_EXTENSION: &str = ".jpg";

const MAX_EXTENSION_LEN: usize = 5;

/// Folder entry name for a category, with trailing slash
pub fn folder_path(category: Category) -> String {
    format!("{}/", category.folder_name())
}

/// Extension for an image asset, derived from its locator
///
/// Looks at the last path segment only, ignoring query and fragment.
///
/// ```
/// use medirecord::core::archive::naming::image_extension;
///
/// assert_eq!(image_extension("https://cdn.example.com/scans/chest.PNG?v=2"), ".png");
/// assert_eq!(image_extension("/images/mri-scan"), ".jpg");
/// ```
pub fn image_extension(locator: &str) -> String {
    let path = locator
        .split(['?', '#'])
        .next()
        .unwrap_or_default();
    let segment = path.rsplit('/').next().unwrap_or_default();

    match segment.rsplit_once('.') {
        Some((_, ext))
            if !ext.is_empty()
                && ext.len() <= MAX_EXTENSION_LEN
                && ext.chars().all(|c| c.is_ascii_alphanumeric()) =>
        {
            format!(".{}", ext.to_ascii_lowercase())
        }
        _ => FALLBACK_IMAGE_EXTENSION.to_string(),
    }
}

/// Whether a record id can be used verbatim as an archive file stem
pub fn is_safe_file_stem(id: &str) -> bool {
    !id.is_empty()
        && id != "."
        && id != ".."
        && !id.contains(['/', '\\'])
        && !id.chars().any(char::is_control)
}

/// Archive path of a record's asset, or `None` when the record has no asset
pub fn asset_path(entry: &RecordEntry<'_>) -> Option<String> {
    let locator = entry.asset_locator()?;
    let extension = match entry {
        RecordEntry::Image(_) => image_extension(locator),
        RecordEntry::Visit(_)
        | RecordEntry::Prescription(_)
        | RecordEntry::TestResult(_)
        | RecordEntry::Certificate(_) => DOCUMENT_EXTENSION.to_string(),
    };
    Some(format!(
        "{}{}{}",
        folder_path(entry.category()),
        entry.id(),
        extension
    ))
}

//! Summary document synthesis entry point

use super::composer::{LayoutOptions, SummaryComposer};
use super::document::Document;
use super::render::render_pdf;
use crate::domain::{RecordBundle, Result};
use chrono::{NaiveDate, Utc};

/// Turns a record bundle into the paginated summary PDF
///
/// # Example
///
/// ```rust,no_run
/// use medirecord::core::layout::LayoutEngine;
/// # use medirecord::domain::RecordBundle;
///
/// # fn example(bundle: &RecordBundle) -> medirecord::domain::Result<()> {
/// let pdf = LayoutEngine::default().synthesize(bundle)?;
/// assert!(pdf.starts_with(b"%PDF"));
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct LayoutEngine {
    composer: SummaryComposer,
}

impl LayoutEngine {
    pub fn new(options: LayoutOptions) -> Self {
        Self {
            composer: SummaryComposer::new(options),
        }
    }

    /// Compose the page model without rendering it
    pub fn compose(&self, bundle: &RecordBundle, generated_on: NaiveDate) -> Document {
        self.composer.compose(bundle, generated_on)
    }

    /// Synthesize the PDF stamped with an explicit generation date
    ///
    /// # Errors
    ///
    /// Returns a `Layout` error if PDF rendering fails.
    pub fn synthesize_at(&self, bundle: &RecordBundle, generated_on: NaiveDate) -> Result<Vec<u8>> {
        let document = self.compose(bundle, generated_on);
        tracing::debug!(
            subject_id = %bundle.subject.id,
            pages = document.page_count(),
            "Composed summary document"
        );
        render_pdf(&document)
    }

    /// Synthesize the PDF stamped with today's UTC date
    pub fn synthesize(&self, bundle: &RecordBundle) -> Result<Vec<u8>> {
        self.synthesize_at(bundle, Utc::now().date_naive())
    }
}

//! Summary document composition
//!
//! Lays out a record bundle onto fixed-size pages with a vertical cursor that
//! moves down one line height per text line. There is no text measurement or
//! wrapping: every field is one line.
//!
//! Record blocks are never split across pages. Before a block is placed the
//! cursor is checked against the bottom threshold, and when it is below the
//! threshold a continuation page (no header) is started first.

use super::document::{
    Document, FontWeight, Page, PageKind, TextColor, TextLine, PAGE_HEIGHT,
};
use crate::domain::{Category, RecordBundle, RecordEntry, Subject};
use chrono::NaiveDate;

/// Left margin of all body text
pub const MARGIN_X: f32 = 50.0;
/// Indentation of bullet list items
pub const BULLET_X: f32 = 70.0;
/// Vertical advance after one line
pub const LINE_HEIGHT: f32 = 20.0;
/// Vertical advance after a record block
pub const RECORD_SPACING: f32 = 30.0;
/// A new page is started when the cursor drops below this
pub const BOTTOM_THRESHOLD: f32 = 100.0;
/// Distance from the page top to a section header, and to the first line of a continuation page
pub const HEADER_OFFSET: f32 = 50.0;
/// Distance from the page top to the first body line under a header
pub const BODY_OFFSET: f32 = 80.0;

const COVER_TITLE: &str = "PATIENT MEDICAL RECORDS";
const PERSONAL_INFORMATION_TITLE: &str = "PERSONAL INFORMATION";
const DISCLAIMER_TITLE: &str = "DISCLAIMER";

const DISCLAIMER: [&str; 4] = [
    "This document contains confidential medical information.",
    "It is intended for personal use only and should be kept secure.",
    "Please consult with your healthcare provider before making any medical decisions based on this information.",
    "MediRecord is not responsible for any actions taken based on the information contained in this document.",
];

/// Layout switches
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutOptions {
    /// Emit a section page with its header even when the category is empty
    pub render_empty_sections: bool,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            render_empty_sections: true,
        }
    }
}

/// Builds the [`Document`] model for a bundle
#[derive(Debug, Clone, Default)]
pub struct SummaryComposer {
    options: LayoutOptions,
}

impl SummaryComposer {
    pub fn new(options: LayoutOptions) -> Self {
        Self { options }
    }

    /// Compose the summary document
    ///
    /// The result depends only on the bundle, the options and `generated_on`.
    pub fn compose(&self, bundle: &RecordBundle, generated_on: NaiveDate) -> Document {
        let generated = generated_on.format("%Y-%m-%d").to_string();
        let mut writer = PageWriter::default();

        cover_page(&mut writer, &bundle.subject, &generated);
        personal_information_page(&mut writer, &bundle.subject);

        for category in Category::ALL {
            let entries = bundle.entries(category);
            if entries.is_empty() && !self.options.render_empty_sections {
                continue;
            }
            section_pages(&mut writer, category, &entries);
        }

        disclaimer_page(&mut writer, &bundle.subject, &generated);

        Document {
            title: format!("Patient Medical Records - {}", bundle.subject.name),
            pages: writer.pages,
        }
    }
}

/// Metadata lines printed under a record title
pub fn record_metadata(entry: &RecordEntry<'_>) -> Vec<String> {
    match entry {
        RecordEntry::Visit(r) => vec![format!("Date: {} | Doctor: {}", r.date, r.clinician)],
        RecordEntry::Prescription(p) => vec![
            format!(
                "Date: {} | Status: {} | Doctor: {}",
                p.date, p.status, p.clinician
            ),
            format!("Details: {}", p.details),
        ],
        RecordEntry::TestResult(t) => vec![format!(
            "Date: {} | Type: {} | Doctor: {}",
            t.date, t.category, t.clinician
        )],
        RecordEntry::Image(i) => vec![
            format!(
                "Date: {} | Type: {} | Doctor: {}",
                i.date, i.modality, i.clinician
            ),
            format!("Description: {}", i.description),
        ],
        RecordEntry::Certificate(c) => vec![
            format!(
                "Date: {} | Valid Until: {} | Status: {}",
                c.date, c.valid_until, c.status
            ),
            format!("Doctor: {}", c.clinician),
        ],
    }
}

fn cover_page(writer: &mut PageWriter, subject: &Subject, generated: &str) {
    writer.begin(PageKind::Cover);
    writer.place_at(
        COVER_TITLE,
        PAGE_HEIGHT - 100.0,
        24.0,
        FontWeight::Bold,
        TextColor::HEADING,
    );

    let lines = [
        format!("Patient: {}", subject.name),
        format!("ID: {}", subject.id),
        format!("Date of Birth: {}", subject.date_of_birth),
        format!("Generated on: {generated}"),
    ];
    for (i, text) in lines.into_iter().enumerate() {
        let y = PAGE_HEIGHT - 150.0 - LINE_HEIGHT * i as f32;
        writer.place_at(text, y, 14.0, FontWeight::Regular, TextColor::BLACK);
    }
}

fn personal_information_page(writer: &mut PageWriter, subject: &Subject) {
    writer.begin(PageKind::PersonalInformation);
    writer.header(PERSONAL_INFORMATION_TITLE);

    for (label, value) in subject.personal_details() {
        writer.line(format!("{label}: {value}"), MARGIN_X, 12.0, FontWeight::Regular);
    }

    bullet_list(writer, "Allergies:", &subject.allergies);
    bullet_list(writer, "Chronic Conditions:", &subject.chronic_conditions);
}

fn bullet_list(writer: &mut PageWriter, heading: &str, items: &[String]) {
    writer.advance(LINE_HEIGHT);
    writer.break_if_low();
    writer.line(heading, MARGIN_X, 12.0, FontWeight::Bold);

    for item in items {
        writer.break_if_low();
        writer.line(format!("• {item}"), BULLET_X, 12.0, FontWeight::Regular);
    }
}

fn section_pages(writer: &mut PageWriter, category: Category, entries: &[RecordEntry<'_>]) {
    writer.begin(PageKind::Section(category));
    writer.header(category.section_title());

    for entry in entries {
        writer.break_if_low();
        writer.line(entry.title(), MARGIN_X, 12.0, FontWeight::Bold);

        let metadata = record_metadata(entry);
        let last = metadata.len().saturating_sub(1);
        for (i, text) in metadata.into_iter().enumerate() {
            writer.place(text, MARGIN_X, 10.0, FontWeight::Regular);
            writer.advance(if i == last { RECORD_SPACING } else { LINE_HEIGHT });
        }
    }
}

fn disclaimer_page(writer: &mut PageWriter, subject: &Subject, generated: &str) {
    writer.begin(PageKind::Disclaimer);
    writer.header(DISCLAIMER_TITLE);

    for sentence in DISCLAIMER {
        writer.line(sentence, MARGIN_X, 12.0, FontWeight::Regular);
    }
    writer.advance(LINE_HEIGHT);
    writer.line(format!("Generated on: {generated}"), MARGIN_X, 12.0, FontWeight::Regular);
    writer.line(format!("Patient ID: {}", subject.id), MARGIN_X, 12.0, FontWeight::Regular);
}

/// Page list plus the vertical cursor of the last page
struct PageWriter {
    pages: Vec<Page>,
    y: f32,
}

impl Default for PageWriter {
    fn default() -> Self {
        Self {
            pages: Vec::new(),
            y: PAGE_HEIGHT - BODY_OFFSET,
        }
    }
}

impl PageWriter {
    fn begin(&mut self, kind: PageKind) {
        self.pages.push(Page::new(kind, false));
        self.y = PAGE_HEIGHT - BODY_OFFSET;
    }

    fn break_if_low(&mut self) {
        if self.y >= BOTTOM_THRESHOLD {
            return;
        }
        let kind = self.pages.last().map_or(PageKind::Cover, |page| page.kind);
        self.pages.push(Page::new(kind, true));
        self.y = PAGE_HEIGHT - HEADER_OFFSET;
    }

    fn header(&mut self, title: &str) {
        self.place_at(
            title,
            PAGE_HEIGHT - HEADER_OFFSET,
            16.0,
            FontWeight::Bold,
            TextColor::HEADING,
        );
    }

    /// Place a line at the cursor and move down one line
    fn line(&mut self, text: impl Into<String>, x: f32, size: f32, weight: FontWeight) {
        self.push(text.into(), x, self.y, size, weight, TextColor::BLACK);
        self.advance(LINE_HEIGHT);
    }

    /// Place a line at the cursor without moving it
    fn place(&mut self, text: impl Into<String>, x: f32, size: f32, weight: FontWeight) {
        self.push(text.into(), x, self.y, size, weight, TextColor::BLACK);
    }

    fn place_at(
        &mut self,
        text: impl Into<String>,
        y: f32,
        size: f32,
        weight: FontWeight,
        color: TextColor,
    ) {
        self.push(text.into(), MARGIN_X, y, size, weight, color);
    }

    fn advance(&mut self, dy: f32) {
        self.y -= dy;
    }

    fn push(&mut self, text: String, x: f32, y: f32, size: f32, weight: FontWeight, color: TextColor) {
        if let Some(page) = self.pages.last_mut() {
            page.lines.push(TextLine {
                text,
                x,
                y,
                size,
                weight,
                color,
            });
        }
    }
}

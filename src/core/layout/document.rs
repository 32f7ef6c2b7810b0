//! Positioned-text document model
//!
//! The composer produces this model and the renderer turns it into PDF bytes.
//! Coordinates are in PDF points with the origin at the bottom-left corner.

use crate::domain::Category;

/// A4 page width in points
pub const PAGE_WIDTH: f32 = 595.28;

/// A4 page height in points
pub const PAGE_HEIGHT: f32 = 841.89;

/// Font weight of a text line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontWeight {
    Regular,
    Bold,
}

/// RGB fill colour with components in `0.0..=1.0`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextColor {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl TextColor {
    pub const BLACK: TextColor = TextColor {
        r: 0.0,
        g: 0.0,
        b: 0.0,
    };

    /// Dark blue used for titles and section headers
    pub const HEADING: TextColor = TextColor {
        r: 0.0,
        g: 0.0,
        b: 0.7,
    };
}

/// One line of text placed on a page
#[derive(Debug, Clone, PartialEq)]
pub struct TextLine {
    pub text: String,
    pub x: f32,
    pub y: f32,
    pub size: f32,
    pub weight: FontWeight,
    pub color: TextColor,
}

/// What a page is for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageKind {
    Cover,
    PersonalInformation,
    Section(Category),
    Disclaimer,
}

/// A single page
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    pub kind: PageKind,
    /// True for overflow pages that carry no header of their own
    pub continued: bool,
    pub lines: Vec<TextLine>,
}

impl Page {
    pub fn new(kind: PageKind, continued: bool) -> Self {
        Self {
            kind,
            continued,
            lines: Vec::new(),
        }
    }

    /// Whether any line on this page has exactly this text
    pub fn contains_text(&self, text: &str) -> bool {
        self.lines.iter().any(|line| line.text == text)
    }
}

/// A complete, already-paginated document
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub title: String,
    pub pages: Vec<Page>,
}

impl Document {
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Pages belonging to one category section, continuation pages included
    pub fn section_pages(&self, category: Category) -> impl Iterator<Item = &Page> {
        self.pages
            .iter()
            .filter(move |page| page.kind == PageKind::Section(category))
    }

    /// Page kinds in order, one per page
    pub fn outline(&self) -> Vec<PageKind> {
        self.pages.iter().map(|page| page.kind).collect()
    }
}

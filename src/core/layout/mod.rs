//! Document layout engine
//!
//! Synthesis runs in two stages:
//! - [`composer`] places every line of the summary onto pages (pure, deterministic)
//! - [`render`] writes the placed lines to PDF with `printpdf`

pub mod composer;
pub mod document;
pub mod engine;
pub mod render;

pub use composer::{record_metadata, LayoutOptions, SummaryComposer};
pub use document::{Document, FontWeight, Page, PageKind, TextColor, TextLine};
pub use engine::LayoutEngine;
pub use render::render_pdf;

//! PDF rendering of a composed [`Document`] with `printpdf`

use super::document::{Document, FontWeight, PAGE_HEIGHT, PAGE_WIDTH};
use crate::domain::{MedirecordError, Result};
use printpdf::{BuiltinFont, Color, Mm, PdfDocument, Rgb};
use std::io::BufWriter;

fn pt_to_mm(pt: f32) -> Mm {
    Mm(pt * 25.4 / 72.0)
}

/// Render the document to PDF bytes using the built-in Helvetica fonts
///
/// # Errors
///
/// Returns [`MedirecordError::Layout`] if a font cannot be initialised or the
/// PDF cannot be serialised.
pub fn render_pdf(document: &Document) -> Result<Vec<u8>> {
    let width = pt_to_mm(PAGE_WIDTH);
    let height = pt_to_mm(PAGE_HEIGHT);

    let (doc, first_page, first_layer) =
        PdfDocument::new(document.title.as_str(), width, height, "Layer 1");

    let regular = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|e| MedirecordError::Layout(format!("PDF font error: {e}")))?;
    let bold = doc
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(|e| MedirecordError::Layout(format!("PDF font error: {e}")))?;

    for (index, page) in document.pages.iter().enumerate() {
        let layer = if index == 0 {
            doc.get_page(first_page).get_layer(first_layer)
        } else {
            let (page_index, layer_index) = doc.add_page(width, height, "Layer 1");
            doc.get_page(page_index).get_layer(layer_index)
        };

        for line in &page.lines {
            let font = match line.weight {
                FontWeight::Regular => &regular,
                FontWeight::Bold => &bold,
            };
            layer.set_fill_color(Color::Rgb(Rgb::new(
                line.color.r,
                line.color.g,
                line.color.b,
                None,
            )));
            layer.use_text(
                line.text.as_str(),
                line.size,
                pt_to_mm(line.x),
                pt_to_mm(line.y),
                font,
            );
        }
    }

    let mut buf = BufWriter::new(Vec::new());
    doc.save(&mut buf)
        .map_err(|e| MedirecordError::Layout(format!("PDF save error: {e}")))?;
    buf.into_inner()
        .map_err(|e| MedirecordError::Layout(format!("PDF buffer error: {e}")))
}

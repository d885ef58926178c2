//! Export Encoder — encodes a result string as a downloadable PDF via
//! `printpdf`. Fixed title line, body wrapped below it in Helvetica 10pt.
//!
//! No pagination: everything is drawn on one letter page and overflow simply
//! runs off the bottom, matching what the canvas primitive does on its own.

use printpdf::{BuiltinFont, Mm, PdfDocument, Pt};
use std::io::BufWriter;
use thiserror::Error;

pub const EXPORT_FILE_NAME: &str = "response.pdf";
pub const EXPORT_TITLE: &str = "JobFit Analyzer Response";

// US letter, coordinates in points from the bottom-left corner.
const PAGE_WIDTH: Pt = Pt(612.0);
const PAGE_HEIGHT: Pt = Pt(792.0);
const MARGIN_X: Pt = Pt(50.0);
const TITLE_Y: Pt = Pt(750.0);
const BODY_START_Y: Pt = Pt(730.0);
const TITLE_FONT_SIZE: f32 = 12.0;
const BODY_FONT_SIZE: f32 = 10.0;
const LINE_LEADING: Pt = Pt(14.0);
// ~512pt of usable width at 10pt Helvetica.
const WRAP_COLUMNS: usize = 95;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("PDF encoding failed: {0}")]
    Pdf(String),
}

/// Encodes the result text as a single-page printable document and returns
/// the completed byte buffer.
pub fn encode_response_pdf(result_text: &str) -> Result<Vec<u8>, ExportError> {
    let (doc, page1, layer1) = PdfDocument::new(
        EXPORT_TITLE,
        Mm::from(PAGE_WIDTH),
        Mm::from(PAGE_HEIGHT),
        "Layer 1",
    );
    let layer = doc.get_page(page1).get_layer(layer1);
    let font = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|e| ExportError::Pdf(e.to_string()))?;

    let x = Mm::from(MARGIN_X);
    layer.use_text(EXPORT_TITLE, TITLE_FONT_SIZE, x, Mm::from(TITLE_Y), &font);

    let mut y = Mm::from(BODY_START_Y);
    for paragraph in result_text.lines() {
        for line in wrap_text(paragraph, WRAP_COLUMNS) {
            layer.use_text(&line, BODY_FONT_SIZE, x, y, &font);
            y -= Mm::from(LINE_LEADING);
        }
    }

    let mut buf = BufWriter::new(Vec::new());
    doc.save(&mut buf)
        .map_err(|e| ExportError::Pdf(e.to_string()))?;
    buf.into_inner()
        .map_err(|e| ExportError::Pdf(e.to_string()))
}

/// Greedy word wrap at a fixed column count. Always yields at least one line
/// so blank paragraphs still advance the cursor.
fn wrap_text(text: &str, max_chars: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        if current.len() + word.len() + 1 > max_chars && !current.is_empty() {
            lines.push(current.clone());
            current.clear();
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() {
        lines.push(current);
    }
    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}

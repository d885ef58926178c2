//! Document Text Extractor — flattens an uploaded PDF into one text string.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExtractError {
    /// No bytes were supplied at all. Distinct from a parse failure so the
    /// caller can tell "nothing uploaded" apart from "upload is garbage".
    #[error("No document provided")]
    NoDocumentProvided,

    #[error("Could not parse document: {0}")]
    Parse(String),
}

/// Result of flattening a document: the concatenated page text plus the
/// page count observed while parsing.
#[derive(Debug, Clone)]
pub struct Extraction {
    pub text: String,
    pub page_count: usize,
}

/// Extracts the plain text of every page, in file order, joined with a
/// single space. Pure transform of bytes → string; no side effects.
pub fn extract_document_text(bytes: &[u8]) -> Result<Extraction, ExtractError> {
    if bytes.is_empty() {
        return Err(ExtractError::NoDocumentProvided);
    }

    let pages = pdf_extract::extract_text_from_mem_by_pages(bytes)
        .map_err(|e| ExtractError::Parse(e.to_string()))?;

    Ok(Extraction {
        page_count: pages.len(),
        text: pages.join(" "),
    })
}

//! PDF loading and text extraction using lopdf and pdf-extract.

use lopdf::Document;
use tracing::{debug, trace, warn};

use crate::error::PdfError;

/// A PDF whose structure and per-page text have been read successfully.
pub struct PdfExtractor {
    raw_data: Vec<u8>,
    pages: Vec<String>,
}

impl PdfExtractor {
    /// Load and validate a PDF.
    ///
    /// The document is rejected when it cannot be parsed, is encrypted, has
    /// no pages, or when a page's content stream cannot be decoded. A page
    /// whose fonts cannot be mapped to text counts as empty.
    pub fn load(data: Vec<u8>) -> Result<Self, PdfError> {
        let doc = Document::load_mem(&data).map_err(|e| PdfError::Parse(e.to_string()))?;

        if doc.is_encrypted() {
            return Err(PdfError::Encrypted);
        }

        let page_ids = doc.get_pages();
        if page_ids.is_empty() {
            return Err(PdfError::NoPages);
        }

        let mut pages = Vec::with_capacity(page_ids.len());
        for (page, page_id) in page_ids {
            doc.get_and_decode_page_content(page_id)
                .map_err(|e| PdfError::TextExtraction {
                    page,
                    reason: e.to_string(),
                })?;

            let text = doc.extract_text(&[page]).unwrap_or_else(|e| {
                warn!("Cannot decode text of page {}: {}", page, e);
                String::new()
            });
            trace!("Page {}: {} chars", page, text.len());
            pages.push(text);
        }

        debug!("Loaded PDF with {} pages", pages.len());
        Ok(Self {
            raw_data: data,
            pages,
        })
    }

    /// Number of pages.
    pub fn page_count(&self) -> u32 {
        self.pages.len() as u32
    }

    /// Per-page text concatenated in page order, trimmed.
    pub fn text(&self) -> String {
        self.pages.concat().trim().to_string()
    }

    /// Original file bytes.
    pub fn raw_data(&self) -> &[u8] {
        &self.raw_data
    }
}

/// Whole-document text through pdf-extract, which decodes some fonts the
/// per-page reader cannot.
pub fn extract_text_fallback(data: &[u8]) -> Result<String, PdfError> {
    pdf_extract::extract_text_from_mem(data)
        .map(|text| text.trim().to_string())
        .map_err(|e| PdfError::TextExtraction {
            page: 0,
            reason: e.to_string(),
        })
}

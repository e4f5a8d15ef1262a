//! Core library for docsift: text, table, image, link and metadata
//! extraction from web pages, PDF, DjVu, DOC and DOCX.
//!
//! This crate provides:
//! - Input classification (URL or file) and processor dispatch
//! - One processor per format, all producing an [`ExtractionResult`]
//! - OCR through an injectable engine (Tesseract by default)
//! - A plain-text report renderer

pub mod error;
pub mod models;
pub mod tools;
pub mod ocr;
pub mod input;
pub mod web;
pub mod pdf;
pub mod djvu;
pub mod doc;
pub mod docx;
pub mod report;

pub use error::{DocsiftError, InputError, LoadError, PdfError, ToolError};
pub use input::{classify, select, Classification, Processor};
pub use models::config::DocsiftConfig;
pub use models::result::{DocumentKind, ExtractionResult, ImageRef, Link, MetaValue, Table};
pub use ocr::{OcrEngine, TesseractOcr};
pub use report::{render, truncate};
pub use tools::{CommandRunner, SystemRunner, ToolCommand, Toolbox};

use tracing::info;

/// Classify `input`, pick its processor and extract everything.
///
/// Only classification and dispatch can fail; a document that does not
/// load comes back as an invalid result.
pub async fn process(input: &str, toolbox: &Toolbox) -> Result<ExtractionResult, DocsiftError> {
    let processor = select(classify(input)?)?;
    info!("Processing {} as {}", input, processor.kind());
    Ok(processor.extract(toolbox).await)
}

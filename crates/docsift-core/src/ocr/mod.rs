//! OCR capability.
//!
//! Recognition itself is delegated to an external engine; this module only
//! defines the seam processors call through.

mod tesseract;

pub use tesseract::TesseractOcr;

use std::path::Path;

use async_trait::async_trait;

use crate::error::ToolError;

/// Turns a raster image on disk into text.
#[async_trait]
pub trait OcrEngine: Send + Sync {
    /// Recognize text in `image` using the given language hint
    /// (Tesseract syntax, e.g. `"rus+eng"`).
    async fn recognize(&self, image: &Path, language: &str) -> Result<String, ToolError>;
}

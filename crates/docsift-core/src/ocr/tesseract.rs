//! OCR through the `tesseract` command-line tool.

use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;
use tracing::debug;

use super::OcrEngine;
use crate::error::ToolError;
use crate::tools::{CommandRunner, ToolCommand};

/// OCR engine backed by the Tesseract CLI.
pub struct TesseractOcr {
    runner: Arc<dyn CommandRunner>,
    binary: String,
}

impl TesseractOcr {
    /// Create an engine that runs `binary` through `runner`.
    pub fn new(runner: Arc<dyn CommandRunner>, binary: impl Into<String>) -> Self {
        Self {
            runner,
            binary: binary.into(),
        }
    }
}

#[async_trait]
impl OcrEngine for TesseractOcr {
    async fn recognize(&self, image: &Path, language: &str) -> Result<String, ToolError> {
        let start = Instant::now();
        let command = ToolCommand::new(&self.binary)
            .arg(image)
            .arg("stdout")
            .arg("-l")
            .arg(language);

        let text = self.runner.run(&command).await?.into_stdout(&self.binary)?;

        debug!(
            "OCR of {} produced {} chars in {}ms",
            image.display(),
            text.chars().count(),
            start.elapsed().as_millis()
        );
        Ok(text)
    }
}

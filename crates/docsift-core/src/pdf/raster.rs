//! Page rasterization with `pdftoppm` followed by OCR of every page image.

use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::error::ToolError;
use crate::tools::{ToolCommand, Toolbox};

/// Rasterize every page of `path` and OCR the images in page order.
///
/// Images live in a fresh temporary directory that is removed on return.
pub async fn ocr_pages(path: &Path, toolbox: &Toolbox) -> Result<String, ToolError> {
    let dir = tempfile::Builder::new().prefix("docsift-pdf-").tempdir()?;
    let prefix = dir.path().join("page");

    let config = toolbox.config();
    let command = ToolCommand::new(&config.tools.pdftoppm)
        .arg("-r")
        .arg(config.ocr.dpi.to_string())
        .arg("-png")
        .arg(path)
        .arg(&prefix);
    toolbox.run_stdout(&command).await?;

    let images = page_images(dir.path())?;
    debug!("Rasterized {} pages at {} dpi", images.len(), config.ocr.dpi);

    let mut pages = Vec::with_capacity(images.len());
    for image in &images {
        pages.push(toolbox.ocr().recognize(image, &config.ocr.language).await?);
    }

    if let Err(e) = dir.close() {
        warn!("Failed to remove raster directory: {}", e);
    }

    Ok(pages.join("\n").trim().to_string())
}

/// PNG files in `dir`, sorted by name.
///
/// `pdftoppm` zero-pads page numbers to a common width, so name order is
/// page order.
fn page_images(dir: &Path) -> Result<Vec<PathBuf>, ToolError> {
    let mut images: Vec<PathBuf> = std::fs::read_dir(dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|p| p.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("png")))
        .collect();
    images.sort();
    Ok(images)
}

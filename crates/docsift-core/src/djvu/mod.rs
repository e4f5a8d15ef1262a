//! DjVu processing through the DjVuLibre command-line tools.

use std::path::Path;

use tracing::{debug, info, warn};

use crate::error::{LoadError, ToolError};
use crate::models::result::{DocumentKind, ExtractionResult};
use crate::tools::{ToolCommand, Toolbox};

/// Extract the text layer, fallback OCR text and the raw `djvudump` output.
///
/// The document is only usable when `djvutxt` and `ddjvu` are installed.
pub async fn extract(path: &Path, toolbox: &Toolbox) -> Result<ExtractionResult, LoadError> {
    let tools = &toolbox.config().tools;
    check_tools(toolbox, &[&tools.djvutxt, &tools.ddjvu]).await?;

    let mut result = ExtractionResult::new(DocumentKind::Djvu);

    result.text = match toolbox.run_stdout(&ToolCommand::new(&tools.djvutxt).arg(path)).await {
        Ok(text) => text.trim().to_string(),
        Err(e) => {
            warn!("djvutxt failed: {}", e);
            String::new()
        }
    };

    if result.text.is_empty() {
        info!("No text layer, falling back to OCR");
        result.ocr_text = ocr(path, toolbox).await.unwrap_or_else(|e| {
            warn!("DjVu OCR failed: {}", e);
            String::new()
        });
    }

    result.raw_metadata = toolbox
        .run_stdout(&ToolCommand::new(&tools.djvudump).arg(path))
        .await
        .unwrap_or_else(|e| {
            warn!("djvudump failed: {}", e);
            String::new()
        });

    Ok(result)
}

/// Fail with the list of tools that cannot be spawned.
///
/// Only a spawn that reports "not found" counts as missing; a tool that
/// starts but rejects `--version` is present.
async fn check_tools(toolbox: &Toolbox, programs: &[&str]) -> Result<(), LoadError> {
    let mut missing = Vec::new();

    for program in programs {
        match toolbox.run(&ToolCommand::new(*program).arg("--version")).await {
            Err(ToolError::NotFound(_)) => missing.push(program.to_string()),
            Err(e) => debug!("{} --version: {}", program, e),
            Ok(_) => {}
        }
    }

    if missing.is_empty() {
        Ok(())
    } else {
        Err(LoadError::MissingTools(missing))
    }
}

/// Render the document to a uniquely named TIFF and OCR it.
async fn ocr(path: &Path, toolbox: &Toolbox) -> Result<String, ToolError> {
    let image = tempfile::Builder::new()
        .prefix("docsift-djvu-")
        .suffix(".tiff")
        .tempfile()?
        .into_temp_path();

    let outcome = render_and_recognize(path, &image, toolbox).await;

    if let Err(e) = image.close() {
        warn!("Failed to remove temporary image: {}", e);
    }
    outcome
}

async fn render_and_recognize(path: &Path, image: &Path, toolbox: &Toolbox) -> Result<String, ToolError> {
    let config = toolbox.config();
    let command = ToolCommand::new(&config.tools.ddjvu)
        .arg("-format=tiff")
        .arg(path)
        .arg(image);
    toolbox.run_stdout(&command).await?;

    let text = toolbox.ocr().recognize(image, &config.ocr.language).await?;
    Ok(text.trim().to_string())
}

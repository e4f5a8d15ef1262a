//! Legacy `.doc` processing.
//!
//! LibreOffice converts the binary document into a Word package, which is
//! then read with the DOCX reader.

use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::docx::{self, DocxDocument};
use crate::error::{LoadError, ToolError};
use crate::models::result::{DocumentKind, ExtractionResult};
use crate::tools::{ToolCommand, Toolbox};

/// Convert and extract every paragraph, every table, author and creation
/// date.
pub async fn extract(path: &Path, toolbox: &Toolbox) -> Result<ExtractionResult, LoadError> {
    let dir = tempfile::Builder::new().prefix("docsift-doc-").tempdir()?;
    let converted = convert(path, dir.path(), toolbox).await?;
    let document = docx::load(&converted).await?;

    if let Err(e) = dir.close() {
        warn!("Failed to remove conversion directory: {}", e);
    }

    Ok(build_result(&document))
}

/// Run `soffice --headless --convert-to docx` into `outdir`.
async fn convert(path: &Path, outdir: &Path, toolbox: &Toolbox) -> Result<PathBuf, ToolError> {
    let command = ToolCommand::new(&toolbox.config().tools.soffice)
        .arg("--headless")
        .arg("--convert-to")
        .arg("docx")
        .arg("--outdir")
        .arg(outdir)
        .arg(path);
    toolbox.run_stdout(&command).await?;

    let stem = path
        .file_stem()
        .ok_or_else(|| ToolError::Output(format!("{} has no file name", path.display())))?;
    let mut name = stem.to_os_string();
    name.push(".docx");
    let converted = outdir.join(name);
    if !converted.is_file() {
        return Err(ToolError::Output(format!(
            "conversion produced no {}",
            converted.display()
        )));
    }

    debug!("Converted {} to {}", path.display(), converted.display());
    Ok(converted)
}

fn build_result(document: &DocxDocument) -> ExtractionResult {
    let mut result = ExtractionResult::new(DocumentKind::Doc);
    result.text = document
        .body
        .all_paragraphs
        .iter()
        .map(|p| p.trim())
        .collect::<Vec<_>>()
        .join("\n");
    result.tables = document.body.all_tables.clone();

    let mut metadata = document.metadata();
    metadata.remove("modified");
    result.metadata = metadata;
    result
}

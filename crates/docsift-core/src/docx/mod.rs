//! DOCX processing: docx-rs reads paragraphs and tables, the core
//! properties part is read from the zip package directly.

mod body;
mod check;
mod properties;

pub use body::Body;
pub use check::check_well_formed;
pub use properties::{parse_core, parse_w3cdtf, CoreProperties};

use std::collections::BTreeMap;
use std::io::{Cursor, Read};
use std::path::Path;

use tracing::{debug, warn};
use zip::result::ZipError;
use zip::ZipArchive;

use crate::error::LoadError;
use crate::models::result::{DocumentKind, ExtractionResult, MetaValue};

const DOCUMENT_PART: &str = "word/document.xml";
const CORE_PART: &str = "docProps/core.xml";

/// A loaded Word package.
#[derive(Debug, Clone, PartialEq)]
pub struct DocxDocument {
    pub body: Body,
    pub core: CoreProperties,
}

impl DocxDocument {
    /// `author`, `created` and `modified`; absent values are empty.
    pub fn metadata(&self) -> BTreeMap<String, MetaValue> {
        let mut metadata = BTreeMap::new();
        metadata.insert(
            "author".to_string(),
            match self.core.author.as_deref() {
                Some(author) if !author.is_empty() => MetaValue::from(author),
                _ => MetaValue::Empty,
            },
        );
        metadata.insert("created".to_string(), timestamp(self.core.created));
        metadata.insert("modified".to_string(), timestamp(self.core.modified));
        metadata
    }
}

fn timestamp(value: Option<chrono::DateTime<chrono::Utc>>) -> MetaValue {
    value.map_or(MetaValue::Empty, MetaValue::Timestamp)
}

/// Read a package from memory.
///
/// The main document part must exist and be well-formed. The core
/// properties part is optional.
pub fn read_package(data: &[u8]) -> Result<DocxDocument, LoadError> {
    let mut archive =
        ZipArchive::new(Cursor::new(data)).map_err(|e| LoadError::Package(e.to_string()))?;

    let document = read_part(&mut archive, DOCUMENT_PART)?
        .ok_or_else(|| LoadError::Package(format!("{DOCUMENT_PART} is missing")))?;
    check_well_formed(&document)?;

    let docx = docx_rs::read_docx(data)
        .map_err(|e| LoadError::Package(format!("DOCX parse error: {e}")))?;
    let body = Body::from_docx(&docx);
    debug!(
        "Read {} paragraphs and {} tables",
        body.paragraphs.len(),
        body.tables.len()
    );

    let core = match read_part(&mut archive, CORE_PART) {
        Ok(Some(xml)) => parse_core(&xml).unwrap_or_else(|e| {
            warn!("Malformed core properties: {}", e);
            CoreProperties::default()
        }),
        Ok(None) => {
            warn!("Package has no core properties");
            CoreProperties::default()
        }
        Err(e) => {
            warn!("Failed to read core properties: {}", e);
            CoreProperties::default()
        }
    };

    Ok(DocxDocument { body, core })
}

fn read_part<R: Read + std::io::Seek>(
    archive: &mut ZipArchive<R>,
    name: &str,
) -> Result<Option<String>, LoadError> {
    let mut file = match archive.by_name(name) {
        Ok(file) => file,
        Err(ZipError::FileNotFound) => return Ok(None),
        Err(e) => return Err(LoadError::Package(e.to_string())),
    };

    let mut xml = String::new();
    file.read_to_string(&mut xml)
        .map_err(|e| LoadError::Package(format!("{name}: {e}")))?;
    Ok(Some(xml))
}

/// Load a package from disk off the async runtime.
pub async fn load(path: &Path) -> Result<DocxDocument, LoadError> {
    let data = tokio::fs::read(path).await?;
    tokio::task::spawn_blocking(move || read_package(&data))
        .await
        .map_err(|e| LoadError::Package(format!("package reader crashed: {e}")))?
}

/// Extract body paragraphs, top-level tables and core metadata.
pub async fn extract(path: &Path) -> Result<ExtractionResult, LoadError> {
    let document = load(path).await?;

    let mut result = ExtractionResult::new(DocumentKind::Docx);
    result.text = document.body.paragraphs.join("\n");
    result.tables = document.body.tables.clone();
    result.metadata = document.metadata();
    Ok(result)
}

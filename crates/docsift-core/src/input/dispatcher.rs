//! Maps a classified input onto exactly one processor.

use std::path::PathBuf;

use tracing::{info, warn};

use super::classifier::Classification;
use crate::error::{InputError, LoadError};
use crate::models::result::{DocumentKind, ExtractionResult};
use crate::tools::Toolbox;
use crate::web::WebSource;
use crate::{djvu, doc, docx, pdf, web};

/// A selected processor together with the input it will read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Processor {
    WebPage(WebSource),
    Pdf(PathBuf),
    Djvu(PathBuf),
    Doc(PathBuf),
    Docx(PathBuf),
}

/// Pick the processor for a classified input.
pub fn select(classification: Classification) -> Result<Processor, InputError> {
    match classification {
        Classification::Url(url) => Ok(Processor::WebPage(WebSource::Url(url))),
        Classification::File { path, extension } => match extension.as_str() {
            "html" => Ok(Processor::WebPage(WebSource::File(path))),
            "pdf" => Ok(Processor::Pdf(path)),
            "djvu" => Ok(Processor::Djvu(path)),
            "doc" => Ok(Processor::Doc(path)),
            "docx" => Ok(Processor::Docx(path)),
            _ => Err(InputError::UnsupportedFormat(extension)),
        },
    }
}

impl Processor {
    /// Kind of document this processor handles.
    pub fn kind(&self) -> DocumentKind {
        match self {
            Processor::WebPage(_) => DocumentKind::WebPage,
            Processor::Pdf(_) => DocumentKind::Pdf,
            Processor::Djvu(_) => DocumentKind::Djvu,
            Processor::Doc(_) => DocumentKind::Doc,
            Processor::Docx(_) => DocumentKind::Docx,
        }
    }

    /// Load the document and extract everything from it.
    ///
    /// A load failure is logged and yields an invalid, blank result; it
    /// never aborts the run.
    pub async fn extract(&self, toolbox: &Toolbox) -> ExtractionResult {
        let kind = self.kind();
        info!("Extracting {}", kind);

        let outcome: Result<ExtractionResult, LoadError> = match self {
            Processor::WebPage(source) => web::extract(source, toolbox).await,
            Processor::Pdf(path) => pdf::extract(path, toolbox).await,
            Processor::Djvu(path) => djvu::extract(path, toolbox).await,
            Processor::Doc(path) => doc::extract(path, toolbox).await,
            Processor::Docx(path) => docx::extract(path).await,
        };

        outcome.unwrap_or_else(|e| {
            warn!("Failed to load {}: {}", kind, e);
            ExtractionResult::invalid(kind)
        })
    }
}

//! The extraction result every processor produces.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;

/// The closed set of document kinds docsift can process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentKind {
    /// HTML page, fetched over HTTP or read from disk.
    WebPage,
    /// PDF document.
    Pdf,
    /// DjVu document.
    Djvu,
    /// Legacy binary Word document.
    Doc,
    /// Office Open XML Word document.
    Docx,
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentKind::WebPage => write!(f, "web page"),
            DocumentKind::Pdf => write!(f, "PDF"),
            DocumentKind::Djvu => write!(f, "DjVu"),
            DocumentKind::Doc => write!(f, "DOC"),
            DocumentKind::Docx => write!(f, "DOCX"),
        }
    }
}

/// A metadata value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum MetaValue {
    /// Free-form text.
    Text(String),
    /// A point in time (creation/modification dates).
    Timestamp(DateTime<Utc>),
    /// The property exists but has no value.
    Empty,
}

impl fmt::Display for MetaValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetaValue::Text(text) => f.write_str(text),
            MetaValue::Timestamp(ts) => f.write_str(&ts.to_rfc3339_opts(SecondsFormat::Secs, true)),
            MetaValue::Empty => Ok(()),
        }
    }
}

impl From<&str> for MetaValue {
    fn from(value: &str) -> Self {
        MetaValue::Text(value.to_string())
    }
}

/// A table: optional header cells and rows of cell texts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Table {
    /// Header cell texts (web tables only).
    pub headers: Vec<String>,
    /// Rows of cell texts, in document order.
    pub rows: Vec<Vec<String>>,
}

impl Table {
    /// Create a table from rows only.
    pub fn from_rows(rows: Vec<Vec<String>>) -> Self {
        Self {
            headers: Vec::new(),
            rows,
        }
    }

    /// True when the table has neither headers nor cells.
    pub fn is_empty(&self) -> bool {
        self.headers.is_empty() && self.rows.iter().all(|row| row.is_empty())
    }
}

/// An image referenced by a web page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImageRef {
    pub src: String,
    pub alt: String,
}

/// A hyperlink found on a web page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Link {
    pub text: String,
    pub url: String,
}

/// Everything extracted from one input.
///
/// Built once, eagerly, by a processor. When `valid` is false every other
/// field holds its default value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExtractionResult {
    /// Processor that produced this result.
    pub kind: DocumentKind,
    /// Whether the source loaded at all.
    pub valid: bool,
    /// Primary extracted text.
    pub text: String,
    /// Text recognized from rasterized pages.
    pub ocr_text: String,
    /// Extracted tables.
    pub tables: Vec<Table>,
    /// Structured metadata (author, dates, meta tags).
    pub metadata: BTreeMap<String, MetaValue>,
    /// Unstructured metadata dump (DjVu).
    pub raw_metadata: String,
    /// Images referenced by a web page.
    pub images: Vec<ImageRef>,
    /// Links found on a web page.
    pub links: Vec<Link>,
}

impl ExtractionResult {
    /// An empty but valid result, to be filled field by field.
    pub fn new(kind: DocumentKind) -> Self {
        Self {
            kind,
            valid: true,
            text: String::new(),
            ocr_text: String::new(),
            tables: Vec::new(),
            metadata: BTreeMap::new(),
            raw_metadata: String::new(),
            images: Vec::new(),
            links: Vec::new(),
        }
    }

    /// The result of a document that failed to load.
    pub fn invalid(kind: DocumentKind) -> Self {
        Self {
            valid: false,
            ..Self::new(kind)
        }
    }

    /// True when nothing but the kind and validity flag is set.
    pub fn is_blank(&self) -> bool {
        self.text.is_empty()
            && self.ocr_text.is_empty()
            && self.tables.is_empty()
            && self.metadata.is_empty()
            && self.raw_metadata.is_empty()
            && self.images.is_empty()
            && self.links.is_empty()
    }
}

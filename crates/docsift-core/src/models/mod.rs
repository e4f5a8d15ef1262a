//! Data models for docsift.

pub mod config;
pub mod result;

pub use config::{DocsiftConfig, OcrConfig, ToolConfig, WebConfig};
pub use result::{DocumentKind, ExtractionResult, ImageRef, Link, MetaValue, Table};

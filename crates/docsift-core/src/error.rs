//! Error types for the docsift-core library.

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for the docsift library.
#[derive(Error, Debug)]
pub enum DocsiftError {
    /// The input could not be classified or dispatched.
    #[error(transparent)]
    Input(#[from] InputError),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors raised while classifying and dispatching the input.
///
/// These are the only errors that end a run with a non-zero exit code.
#[derive(Error, Debug)]
pub enum InputError {
    /// The input is not a URL and no such file exists.
    #[error("file {} not found", .0.display())]
    NotFound(PathBuf),

    /// The file extension has no processor.
    #[error("unsupported format: {}", display_extension(.0))]
    UnsupportedFormat(String),
}

fn display_extension(ext: &str) -> String {
    if ext.is_empty() {
        "(none)".to_string()
    } else {
        format!(".{ext}")
    }
}

/// Errors that make a whole document invalid.
#[derive(Error, Debug)]
pub enum LoadError {
    /// The page could not be fetched (connection error, timeout).
    #[error("failed to fetch page: {0}")]
    Fetch(String),

    /// The server answered with a non-success status.
    #[error("server returned HTTP {0}")]
    Status(u16),

    /// The PDF is structurally unusable.
    #[error("PDF error: {0}")]
    Pdf(#[from] PdfError),

    /// The office package (zip container) could not be read.
    #[error("failed to read package: {0}")]
    Package(String),

    /// The package XML is not well-formed.
    #[error("malformed XML: {0}")]
    Xml(String),

    /// Required external tools are not installed.
    #[error("missing tools: {}", .0.join(", "))]
    MissingTools(Vec<String>),

    /// An external tool needed for loading failed.
    #[error("tool error: {0}")]
    Tool(#[from] ToolError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors related to PDF processing.
#[derive(Error, Debug)]
pub enum PdfError {
    /// Failed to open/parse the PDF file.
    #[error("failed to parse PDF: {0}")]
    Parse(String),

    /// The PDF is encrypted and cannot be processed.
    #[error("PDF is encrypted")]
    Encrypted,

    /// The PDF is empty or has no pages.
    #[error("PDF has no pages")]
    NoPages,

    /// Text of a page could not be read.
    #[error("failed to extract text from page {page}: {reason}")]
    TextExtraction { page: u32, reason: String },
}

/// Errors from invoking external programs.
#[derive(Error, Debug)]
pub enum ToolError {
    /// The program is not installed or not on `PATH`.
    #[error("{0} not found")]
    NotFound(String),

    /// The program did not finish in time and was killed.
    #[error("{program} timed out after {secs}s")]
    Timeout { program: String, secs: u64 },

    /// The program exited unsuccessfully.
    #[error("{program} exited with {}: {stderr}", .code.map_or("signal".to_string(), |c| format!("code {c}")))]
    Failed {
        program: String,
        code: Option<i32>,
        stderr: String,
    },

    /// The program produced output we could not use.
    #[error("unusable output: {0}")]
    Output(String),

    /// I/O error while spawning or talking to the program.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

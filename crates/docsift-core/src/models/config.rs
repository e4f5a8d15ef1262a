//! Configuration structures for the extraction pipeline.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Main configuration for docsift.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DocsiftConfig {
    /// OCR configuration.
    pub ocr: OcrConfig,

    /// Web page fetching configuration.
    pub web: WebConfig,

    /// External command-line tools.
    pub tools: ToolConfig,
}

/// OCR configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OcrConfig {
    /// Tesseract language hint (e.g. "rus+eng").
    pub language: String,

    /// DPI for rasterizing PDF pages before OCR.
    pub dpi: u32,

    /// Tesseract binary.
    pub tesseract: String,
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            language: "rus+eng".to_string(),
            dpi: 300,
            tesseract: "tesseract".to_string(),
        }
    }
}

/// Web page fetching configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WebConfig {
    /// Request timeout in seconds.
    pub timeout_secs: u64,

    /// User-Agent header sent with requests.
    pub user_agent: String,
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 30,
            user_agent: concat!("docsift/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl WebConfig {
    /// Request timeout as a `Duration`.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// External tool binaries and limits.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolConfig {
    /// Time limit for any single external command, in seconds.
    pub timeout_secs: u64,

    /// DjVu text dumper.
    pub djvutxt: String,

    /// DjVu rasterizer.
    pub ddjvu: String,

    /// DjVu structure dumper.
    pub djvudump: String,

    /// PDF page rasterizer (poppler).
    pub pdftoppm: String,

    /// LibreOffice binary used to convert legacy .doc files.
    pub soffice: String,

    /// Java runtime for tabula.
    pub java: String,

    /// Path to the tabula-java jar.
    pub tabula_jar: PathBuf,
}

impl Default for ToolConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 120,
            djvutxt: "djvutxt".to_string(),
            ddjvu: "ddjvu".to_string(),
            djvudump: "djvudump".to_string(),
            pdftoppm: "pdftoppm".to_string(),
            soffice: "soffice".to_string(),
            java: "java".to_string(),
            tabula_jar: PathBuf::from("tabula.jar"),
        }
    }
}

impl ToolConfig {
    /// Command time limit as a `Duration`.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl DocsiftConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> Result<(), std::io::Error> {
        let content = serde_json::to_string_pretty(self).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })?;
        std::fs::write(path, content)
    }
}

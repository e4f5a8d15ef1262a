//! PDF processing module.

mod extractor;
mod raster;
mod tables;

pub use extractor::{extract_text_fallback, PdfExtractor};
pub use tables::parse_tabula_json;

use std::path::Path;

use tracing::{debug, warn};

use crate::error::{LoadError, PdfError};
use crate::models::result::{DocumentKind, ExtractionResult};
use crate::tools::Toolbox;

/// Load a PDF and extract its text, OCR text and tables.
pub async fn extract(path: &Path, toolbox: &Toolbox) -> Result<ExtractionResult, LoadError> {
    let data = tokio::fs::read(path).await?;
    let extractor = tokio::task::spawn_blocking(move || PdfExtractor::load(data))
        .await
        .map_err(|e| PdfError::Parse(format!("PDF parser crashed: {e}")))??;
    debug!("{} has {} pages", path.display(), extractor.page_count());

    let mut result = ExtractionResult::new(DocumentKind::Pdf);
    result.text = text(&extractor).await;

    result.ocr_text = raster::ocr_pages(path, toolbox).await.unwrap_or_else(|e| {
        warn!("PDF OCR failed: {}", e);
        String::new()
    });

    result.tables = tables::extract_tables(path, toolbox).await.unwrap_or_else(|e| {
        warn!("PDF table extraction failed: {}", e);
        Vec::new()
    });

    Ok(result)
}

/// Page text, or pdf-extract's reading when the pages yield nothing.
async fn text(extractor: &PdfExtractor) -> String {
    let text = extractor.text();
    if !text.is_empty() {
        return text;
    }

    debug!("No text layer found, trying pdf-extract");
    let data = extractor.raw_data().to_vec();
    match tokio::task::spawn_blocking(move || extract_text_fallback(&data)).await {
        Ok(Ok(text)) => text,
        Ok(Err(e)) => {
            warn!("PDF text fallback failed: {}", e);
            String::new()
        }
        Err(e) => {
            warn!("PDF text fallback crashed: {}", e);
            String::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ToolError;
    use crate::models::config::DocsiftConfig;
    use crate::tools::mock::MockRunner;
    use crate::tools::{CommandOutput, ToolCommand};
    use super::extractor::tests::{cid_font_pdf, empty_pages_pdf, encrypted_pdf, sample_pdf};
    use crate::input::Processor;
    use pretty_assertions::assert_eq;
    use std::path::PathBuf;
    use std::sync::Arc;

    const TABULA_JSON: &str = r#"[{"data": [[{"text": "a"}, {"text": "b"}], [{"text": "c"}, {"text": "d"}]]}]"#;

    /// Fake pdftoppm: writes one empty PNG per page next to the prefix.
    fn rasterize_two_pages(cmd: &ToolCommand) -> Result<CommandOutput, ToolError> {
        let prefix = PathBuf::from(cmd.args().last().unwrap());
        for page in 1..=2 {
            std::fs::write(format!("{}-{page}.png", prefix.display()), b"")?;
        }
        Ok(CommandOutput::success(""))
    }

    /// Fake tesseract: recognizes the page number from the image name.
    fn recognize_page(cmd: &ToolCommand) -> Result<CommandOutput, ToolError> {
        let image = PathBuf::from(&cmd.args()[0]);
        let stem = image.file_stem().unwrap().to_string_lossy().into_owned();
        Ok(CommandOutput::success(format!("OCR {stem}\n")))
    }

    fn write_pdf(dir: &tempfile::TempDir, pages: &[&str]) -> PathBuf {
        write_bytes(dir, &sample_pdf(pages))
    }

    fn write_bytes(dir: &tempfile::TempDir, bytes: &[u8]) -> PathBuf {
        let path = dir.path().join("doc.pdf");
        std::fs::write(&path, bytes).unwrap();
        path
    }

    fn toolbox(runner: Arc<MockRunner>) -> Toolbox {
        Toolbox::new(DocsiftConfig::default()).unwrap().with_runner(runner)
    }

    #[tokio::test]
    async fn test_valid_pdf_extracts_every_field() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_pdf(&dir, &["Hello World!", "Second"]);
        let runner = Arc::new(
            MockRunner::new()
                .on("pdftoppm", rasterize_two_pages)
                .on("tesseract", recognize_page)
                .ok("java", TABULA_JSON),
        );

        let result = extract(&path, &toolbox(runner.clone())).await.unwrap();

        assert!(result.valid);
        assert!(result.text.contains("Hello World!"));
        assert!(result.text.contains("Second"));
        assert_eq!(result.ocr_text, "OCR page-1\n\nOCR page-2");
        assert_eq!(result.tables.len(), 1);
        assert_eq!(result.tables[0].rows[1], vec!["c".to_string(), "d".to_string()]);

        let pdftoppm = runner.calls_to("pdftoppm");
        assert_eq!(pdftoppm.len(), 1);
        assert!(pdftoppm[0].display().starts_with("pdftoppm -r 300 -png "));
        assert_eq!(runner.calls_to("tesseract").len(), 2);

        let java = runner.calls_to("java");
        assert!(java[0].display().starts_with("java -Dfile.encoding=UTF8 -jar tabula.jar --pages all --format JSON"));
    }

    #[tokio::test]
    async fn test_ocr_runs_even_with_text_layer() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_pdf(&dir, &["Plenty of text"]);
        let runner = Arc::new(
            MockRunner::new()
                .on("pdftoppm", rasterize_two_pages)
                .on("tesseract", recognize_page),
        );

        let result = extract(&path, &toolbox(runner.clone())).await.unwrap();

        assert!(!result.text.is_empty());
        assert!(!result.ocr_text.is_empty());
        assert_eq!(runner.calls_to("pdftoppm").len(), 1);
    }

    #[tokio::test]
    async fn test_missing_tools_degrade_fields_only() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_pdf(&dir, &["Hello World!"]);

        let result = extract(&path, &toolbox(Arc::new(MockRunner::new()))).await.unwrap();

        assert!(result.valid);
        assert!(result.text.contains("Hello World!"));
        assert_eq!(result.ocr_text, "");
        assert!(result.tables.is_empty());
    }

    #[tokio::test]
    async fn test_failed_ocr_of_one_page_clears_ocr_text() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_pdf(&dir, &["Hello"]);
        let runner = Arc::new(
            MockRunner::new()
                .on("pdftoppm", rasterize_two_pages)
                .on("tesseract", |_| Ok(CommandOutput::failure(1, "Error opening data file"))),
        );

        let result = extract(&path, &toolbox(runner)).await.unwrap();
        assert_eq!(result.ocr_text, "");
        assert!(result.text.contains("Hello"));
    }

    #[tokio::test]
    async fn test_garbage_is_load_error_without_tool_calls() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fake.pdf");
        std::fs::write(&path, "<html>not a pdf</html>").unwrap();
        let runner = Arc::new(MockRunner::new().on("pdftoppm", rasterize_two_pages));

        let err = extract(&path, &toolbox(runner.clone())).await.unwrap_err();
        assert!(matches!(err, LoadError::Pdf(PdfError::Parse(_))));
        assert!(runner.calls().is_empty());
    }

    #[tokio::test]
    async fn test_unreadable_file_is_load_error() {
        let err = extract(Path::new("/nonexistent/doc.pdf"), &toolbox(Arc::new(MockRunner::new())))
            .await
            .unwrap_err();
        assert!(matches!(err, LoadError::Io(_)));
    }

    #[tokio::test]
    async fn test_undecodable_font_stays_valid_and_is_ocred() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_bytes(&dir, &cid_font_pdf());
        let runner = Arc::new(
            MockRunner::new()
                .on("pdftoppm", rasterize_two_pages)
                .on("tesseract", recognize_page)
                .ok("java", TABULA_JSON),
        );

        let result = Processor::Pdf(path).extract(&toolbox(runner.clone())).await;

        assert!(result.valid);
        assert_eq!(result.ocr_text, "OCR page-1\n\nOCR page-2");
        assert_eq!(result.tables.len(), 1);
        assert_eq!(runner.calls_to("tesseract").len(), 2);
    }

    #[tokio::test]
    async fn test_encrypted_pdf_is_invalid() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_bytes(&dir, &encrypted_pdf());
        let runner = Arc::new(MockRunner::new().on("pdftoppm", rasterize_two_pages));

        let result = Processor::Pdf(path).extract(&toolbox(runner.clone())).await;

        assert_eq!(result, ExtractionResult::invalid(DocumentKind::Pdf));
        assert!(runner.calls().is_empty());
    }

    #[tokio::test]
    async fn test_pdf_without_pages_is_invalid() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_bytes(&dir, &empty_pages_pdf());

        let result = Processor::Pdf(path).extract(&toolbox(Arc::new(MockRunner::new()))).await;

        assert_eq!(result, ExtractionResult::invalid(DocumentKind::Pdf));
    }
}

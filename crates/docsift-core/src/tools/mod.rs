//! External collaborators shared by every processor.

mod command;
#[cfg(test)]
pub(crate) mod mock;

pub use command::{CommandOutput, CommandRunner, SystemRunner, ToolCommand};

use std::sync::Arc;

use crate::error::{DocsiftError, ToolError};
use crate::models::config::DocsiftConfig;
use crate::ocr::{OcrEngine, TesseractOcr};

/// Configuration plus the capabilities processors call out to:
/// a command runner, an OCR engine and an HTTP client.
pub struct Toolbox {
    config: DocsiftConfig,
    runner: Arc<dyn CommandRunner>,
    ocr: Arc<dyn OcrEngine>,
    custom_ocr: bool,
    http: reqwest::Client,
}

impl Toolbox {
    /// Build the production toolbox: real processes and Tesseract.
    pub fn new(config: DocsiftConfig) -> Result<Self, DocsiftError> {
        let http = reqwest::Client::builder()
            .timeout(config.web.timeout())
            .user_agent(config.web.user_agent.clone())
            .build()
            .map_err(|e| DocsiftError::Config(format!("failed to build HTTP client: {e}")))?;

        let runner: Arc<dyn CommandRunner> = Arc::new(SystemRunner::new(config.tools.timeout()));
        let ocr: Arc<dyn OcrEngine> =
            Arc::new(TesseractOcr::new(runner.clone(), config.ocr.tesseract.clone()));

        Ok(Self {
            config,
            runner,
            ocr,
            custom_ocr: false,
            http,
        })
    }

    /// Replace the command runner.
    ///
    /// Unless a custom engine was set with [`Toolbox::with_ocr`], the
    /// Tesseract engine is rebuilt on top of the new runner.
    pub fn with_runner(mut self, runner: Arc<dyn CommandRunner>) -> Self {
        if !self.custom_ocr {
            self.ocr = Arc::new(TesseractOcr::new(
                runner.clone(),
                self.config.ocr.tesseract.clone(),
            ));
        }
        self.runner = runner;
        self
    }

    /// Replace the OCR engine.
    pub fn with_ocr(mut self, ocr: Arc<dyn OcrEngine>) -> Self {
        self.ocr = ocr;
        self.custom_ocr = true;
        self
    }

    pub fn config(&self) -> &DocsiftConfig {
        &self.config
    }

    pub fn ocr(&self) -> &dyn OcrEngine {
        self.ocr.as_ref()
    }

    pub fn http(&self) -> &reqwest::Client {
        &self.http
    }

    /// Run an external command.
    pub async fn run(&self, command: &ToolCommand) -> Result<CommandOutput, ToolError> {
        self.runner.run(command).await
    }

    /// Run an external command and return its stdout, failing on a
    /// non-zero exit status.
    pub async fn run_stdout(&self, command: &ToolCommand) -> Result<String, ToolError> {
        self.run(command).await?.into_stdout(command.program())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::mock::MockRunner;
    use std::path::Path;

    struct FixedOcr;

    #[async_trait::async_trait]
    impl OcrEngine for FixedOcr {
        async fn recognize(&self, _image: &Path, _language: &str) -> Result<String, ToolError> {
            Ok("fixed".to_string())
        }
    }

    #[tokio::test]
    async fn test_with_runner_rebuilds_tesseract() {
        let runner = Arc::new(MockRunner::new().ok("tesseract", "from mock"));
        let toolbox = Toolbox::new(DocsiftConfig::default()).unwrap().with_runner(runner);

        let text = toolbox.ocr().recognize(Path::new("a.png"), "eng").await.unwrap();
        assert_eq!(text, "from mock");
    }

    #[tokio::test]
    async fn test_custom_ocr_survives_runner_swap() {
        let toolbox = Toolbox::new(DocsiftConfig::default())
            .unwrap()
            .with_ocr(Arc::new(FixedOcr))
            .with_runner(Arc::new(MockRunner::new()));

        let text = toolbox.ocr().recognize(Path::new("a.png"), "eng").await.unwrap();
        assert_eq!(text, "fixed");
    }

    #[tokio::test]
    async fn test_run_stdout_fails_on_exit_code() {
        let runner = Arc::new(
            MockRunner::new().on("djvudump", |_| Ok(CommandOutput::failure(10, "corrupt"))),
        );
        let toolbox = Toolbox::new(DocsiftConfig::default()).unwrap().with_runner(runner);

        let err = toolbox.run_stdout(&ToolCommand::new("djvudump")).await.unwrap_err();
        assert!(matches!(err, ToolError::Failed { code: Some(10), .. }));
    }
}

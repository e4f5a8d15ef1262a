//! Web page processing: fetch (or read) HTML and query its tree.

mod html;

pub use html::{extract_html, MISSING_ALT};

use std::path::PathBuf;

use tracing::debug;
use url::Url;

use crate::error::LoadError;
use crate::models::result::ExtractionResult;
use crate::tools::Toolbox;

/// Where a web page comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WebSource {
    /// Fetched over HTTP.
    Url(Url),
    /// A saved `.html` file.
    File(PathBuf),
}

/// Load the page and extract text, images, tables, meta tags and links.
pub async fn extract(source: &WebSource, toolbox: &Toolbox) -> Result<ExtractionResult, LoadError> {
    let html = load(source, toolbox).await?;
    debug!("Loaded {} bytes of HTML", html.len());
    Ok(extract_html(&html))
}

async fn load(source: &WebSource, toolbox: &Toolbox) -> Result<String, LoadError> {
    match source {
        WebSource::Url(url) => fetch(toolbox.http(), url).await,
        WebSource::File(path) => {
            let bytes = tokio::fs::read(path).await?;
            Ok(String::from_utf8_lossy(&bytes).into_owned())
        }
    }
}

/// GET `url`; connection errors, timeouts and non-2xx statuses fail the load.
async fn fetch(client: &reqwest::Client, url: &Url) -> Result<String, LoadError> {
    debug!("Fetching {}", url);

    let response = client
        .get(url.clone())
        .send()
        .await
        .map_err(|e| LoadError::Fetch(e.to_string()))?;

    let status = response.status();
    if !status.is_success() {
        return Err(LoadError::Status(status.as_u16()));
    }

    response
        .text()
        .await
        .map_err(|e| LoadError::Fetch(e.to_string()))
}

//! Decides whether an input string is a URL or a file on disk.

use std::path::PathBuf;

use tracing::debug;
use url::Url;

use crate::error::InputError;

/// What an input string turned out to be.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    /// An absolute URL with a scheme and a host.
    Url(Url),
    /// An existing file and its lowercase extension (empty when absent).
    File { path: PathBuf, extension: String },
}

/// Classify `input` as a URL or an existing file.
///
/// The scheme or extension alone decides the type; file contents are never
/// inspected. Only the existence of a path is checked.
pub fn classify(input: &str) -> Result<Classification, InputError> {
    if let Some(url) = parse_url(input) {
        debug!("Input is a URL: {}", url);
        return Ok(Classification::Url(url));
    }

    let path = PathBuf::from(input);
    if !path.exists() {
        return Err(InputError::NotFound(path));
    }

    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_lowercase)
        .unwrap_or_default();

    debug!("Input is a file with extension {:?}", extension);
    Ok(Classification::File { path, extension })
}

/// Parse `input` as a URL, accepting it only with a scheme and a host.
fn parse_url(input: &str) -> Option<Url> {
    let url = Url::parse(input).ok()?;
    let has_host = url.host_str().is_some_and(|h| !h.is_empty());
    (!url.scheme().is_empty() && has_host).then_some(url)
}

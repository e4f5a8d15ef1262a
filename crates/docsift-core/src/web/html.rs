//! HTML tree queries: text, images, tables, meta tags and links.

use lazy_static::lazy_static;
use scraper::{ElementRef, Html, Selector};

use crate::models::result::{DocumentKind, ExtractionResult, ImageRef, Link, MetaValue, Table};

lazy_static! {
    static ref IMG: Selector = Selector::parse("img").unwrap();
    static ref TABLE: Selector = Selector::parse("table").unwrap();
    static ref TH: Selector = Selector::parse("th").unwrap();
    static ref TR: Selector = Selector::parse("tr").unwrap();
    static ref TD: Selector = Selector::parse("td").unwrap();
    static ref META: Selector = Selector::parse("meta").unwrap();
    static ref ANCHOR: Selector = Selector::parse("a[href]").unwrap();
}

/// Elements whose text is never rendered.
const HIDDEN_ELEMENTS: &[&str] = &["script", "style", "template"];

/// Placeholder used for images without an `alt` attribute.
pub const MISSING_ALT: &str = "No alt text";

/// Parse an HTML document and extract everything a web page offers.
pub fn extract_html(html: &str) -> ExtractionResult {
    let document = Html::parse_document(html);

    let mut result = ExtractionResult::new(DocumentKind::WebPage);
    result.text = visible_text(&document);
    result.images = images(&document);
    result.tables = tables(&document);
    result.metadata = meta_tags(&document);
    result.links = links(&document);
    result
}

/// Every rendered text node, trimmed, one per line.
fn visible_text(document: &Html) -> String {
    let mut lines = Vec::new();

    for node in document.root_element().descendants() {
        let Some(text) = node.value().as_text() else {
            continue;
        };

        let hidden = node.ancestors().any(|ancestor| {
            ancestor
                .value()
                .as_element()
                .is_some_and(|el| HIDDEN_ELEMENTS.contains(&el.name()))
        });
        if hidden {
            continue;
        }

        let trimmed = text.trim();
        if !trimmed.is_empty() {
            lines.push(trimmed);
        }
    }

    lines.join("\n")
}

fn images(document: &Html) -> Vec<ImageRef> {
    document
        .select(&IMG)
        .map(|img| ImageRef {
            src: img.value().attr("src").unwrap_or_default().to_string(),
            alt: img.value().attr("alt").unwrap_or(MISSING_ALT).to_string(),
        })
        .collect()
}

/// Every `<table>`: all `<th>` texts plus one row per `<tr>`.
///
/// A `<tr>` without `<td>` cells (e.g. a header row) is kept as an empty
/// row rather than dropped.
fn tables(document: &Html) -> Vec<Table> {
    document
        .select(&TABLE)
        .map(|table| Table {
            headers: table.select(&TH).map(element_text).collect(),
            rows: table
                .select(&TR)
                .map(|row| row.select(&TD).map(element_text).collect())
                .collect(),
        })
        .collect()
}

/// `<meta>` tags keyed by `name`, falling back to `property`.
fn meta_tags(document: &Html) -> std::collections::BTreeMap<String, MetaValue> {
    let mut tags = std::collections::BTreeMap::new();

    for meta in document.select(&META) {
        let el = meta.value();
        let key = el
            .attr("name")
            .filter(|name| !name.is_empty())
            .or_else(|| el.attr("property"));
        let content = el.attr("content");

        if let (Some(key), Some(content)) = (key, content) {
            if !key.is_empty() && !content.is_empty() {
                tags.insert(key.to_string(), MetaValue::from(content));
            }
        }
    }

    tags
}

fn links(document: &Html) -> Vec<Link> {
    document
        .select(&ANCHOR)
        .map(|a| Link {
            text: element_text(a),
            url: a.value().attr("href").unwrap_or_default().to_string(),
        })
        .collect()
}

fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

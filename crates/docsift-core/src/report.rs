//! Plain-text report of an extraction result.

use crate::models::result::{DocumentKind, ExtractionResult, Table};

/// Characters of a text field shown before it is cut off.
pub const TRUNCATE_AT: usize = 500;

/// Marker appended to cut-off text.
pub const ELLIPSIS: &str = "\n...";

/// First [`TRUNCATE_AT`] characters of `text`, followed by [`ELLIPSIS`]
/// when anything was cut.
pub fn truncate(text: &str) -> String {
    match text.char_indices().nth(TRUNCATE_AT) {
        Some((cut, _)) => format!("{}{}", &text[..cut], ELLIPSIS),
        None => text.to_string(),
    }
}

/// Render the report printed for one input.
pub fn render(result: &ExtractionResult) -> String {
    let mut lines = vec![format!(
        "Status: {}",
        if result.valid { "valid" } else { "invalid" }
    )];

    section(&mut lines, "Text");
    lines.push(truncate(&result.text));

    let show_ocr = match result.kind {
        DocumentKind::Pdf => true,
        DocumentKind::Djvu => !result.ocr_text.is_empty(),
        _ => false,
    };
    if show_ocr {
        section(&mut lines, "OCR text");
        lines.push(truncate(&result.ocr_text));
    }

    if result.kind != DocumentKind::Djvu {
        section(&mut lines, "Tables");
        for (i, table) in result.tables.iter().enumerate() {
            lines.push(format!("Table {}:", i + 1));
            render_table(&mut lines, table);
        }
    }

    section(&mut lines, "Metadata");
    if result.kind == DocumentKind::Djvu {
        lines.push(truncate(&result.raw_metadata));
    } else {
        for (key, value) in &result.metadata {
            lines.push(format!("{key}: {value}"));
        }
    }

    if result.kind == DocumentKind::WebPage {
        section(&mut lines, "Images");
        for image in &result.images {
            lines.push(format!("src: {}", image.src));
            lines.push(format!("alt: {}", image.alt));
        }

        section(&mut lines, "Links");
        for link in &result.links {
            lines.push(format!("text: {}", link.text));
            lines.push(format!("url: {}", link.url));
        }
    }

    lines.join("\n")
}

fn section(lines: &mut Vec<String>, title: &str) {
    lines.push(String::new());
    lines.push(format!("{title}:"));
}

fn render_table(lines: &mut Vec<String>, table: &Table) {
    if !table.headers.is_empty() {
        lines.push(table.headers.join(" | "));
    }
    for row in &table.rows {
        lines.push(row.join(" | "));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::result::{ImageRef, Link, MetaValue};
    use chrono::{TimeZone, Utc};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_truncate_law() {
        for len in [0, 1, 499, 500, 501, 1200] {
            let text = "x".repeat(len);
            let shown = truncate(&text);
            if len > TRUNCATE_AT {
                assert_eq!(shown, format!("{}{}", "x".repeat(TRUNCATE_AT), ELLIPSIS));
            } else {
                assert_eq!(shown, text);
            }
        }
    }

    #[test]
    fn test_truncate_counts_characters_not_bytes() {
        let text = "я".repeat(501);
        let shown = truncate(&text);
        assert_eq!(shown.strip_suffix(ELLIPSIS).unwrap().chars().count(), 500);

        let exact = "я".repeat(500);
        assert_eq!(truncate(&exact), exact);
    }

    #[test]
    fn test_render_docx() {
        let mut result = ExtractionResult::new(DocumentKind::Docx);
        result.text = "Первый параграф.\nВторой параграф.".to_string();
        result.tables = vec![Table::from_rows(vec![
            vec!["Ячейка 1".to_string(), "Ячейка 2".to_string()],
            vec!["Ячейка 3".to_string(), "Ячейка 4".to_string()],
        ])];
        result.metadata.insert("author".to_string(), MetaValue::from("Test Author"));
        result.metadata.insert(
            "created".to_string(),
            MetaValue::Timestamp(Utc.with_ymd_and_hms(2024, 5, 6, 7, 8, 9).unwrap()),
        );
        result.metadata.insert("modified".to_string(), MetaValue::Empty);

        assert_eq!(
            render(&result),
            "Status: valid\n\
             \n\
             Text:\n\
             Первый параграф.\n\
             Второй параграф.\n\
             \n\
             Tables:\n\
             Table 1:\n\
             Ячейка 1 | Ячейка 2\n\
             Ячейка 3 | Ячейка 4\n\
             \n\
             Metadata:\n\
             author: Test Author\n\
             created: 2024-05-06T07:08:09Z\n\
             modified: "
        );
    }

    #[test]
    fn test_render_web_page() {
        let mut result = ExtractionResult::new(DocumentKind::WebPage);
        result.text = "Hello".to_string();
        result.tables = vec![Table {
            headers: vec!["A".to_string(), "B".to_string()],
            rows: vec![vec![], vec!["1".to_string(), "2".to_string()]],
        }];
        result.images = vec![ImageRef {
            src: "/a.png".to_string(),
            alt: "A".to_string(),
        }];
        result.links = vec![Link {
            text: "Home".to_string(),
            url: "/".to_string(),
        }];

        let report = render(&result);
        assert!(report.contains("\nTables:\nTable 1:\nA | B\n\n1 | 2\n"));
        assert!(report.contains("\nImages:\nsrc: /a.png\nalt: A\n"));
        assert!(report.ends_with("\nLinks:\ntext: Home\nurl: /"));
        assert!(!report.contains("OCR text:"));
    }

    #[test]
    fn test_pdf_always_shows_ocr_section() {
        let report = render(&ExtractionResult::new(DocumentKind::Pdf));
        assert!(report.contains("\nOCR text:\n"));
    }

    #[test]
    fn test_djvu_ocr_only_when_present() {
        let mut result = ExtractionResult::new(DocumentKind::Djvu);
        result.raw_metadata = "d".repeat(600);
        let report = render(&result);
        assert!(!report.contains("OCR text:"));
        assert!(!report.contains("Tables:"));
        assert!(report.ends_with(&format!("Metadata:\n{}\n...", "d".repeat(500))));

        result.ocr_text = "scanned".to_string();
        assert!(render(&result).contains("\nOCR text:\nscanned\n"));
    }

    #[test]
    fn test_invalid_result_report() {
        let report = render(&ExtractionResult::invalid(DocumentKind::Docx));
        assert_eq!(report, "Status: invalid\n\nText:\n\n\nTables:\n\nMetadata:");
    }
}

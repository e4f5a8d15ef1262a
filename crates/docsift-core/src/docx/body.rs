//! Paragraph and table text of a document read by docx-rs.

use docx_rs::{
    Docx, DocumentChild, Paragraph, ParagraphChild, RunChild, Table as DocxTable, TableCell,
    TableCellContent, TableChild, TableRowChild,
};
use serde_json::Value;

use crate::models::result::Table;

/// Text content of a document body.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Body {
    /// Paragraphs directly in the body, excluding table cells.
    pub paragraphs: Vec<String>,
    /// Every paragraph in document order, table cells included.
    pub all_paragraphs: Vec<String>,
    /// Tables directly in the body.
    pub tables: Vec<Table>,
    /// Every table in document order, nested ones included.
    pub all_tables: Vec<Table>,
}

impl Body {
    /// Collect paragraphs and tables from a parsed document.
    pub fn from_docx(docx: &Docx) -> Self {
        let mut body = Body::default();
        for child in &docx.document.children {
            match child {
                DocumentChild::Paragraph(paragraph) => {
                    let text = paragraph_text(paragraph);
                    body.all_paragraphs.push(text.clone());
                    body.paragraphs.push(text);
                }
                DocumentChild::Table(table) => {
                    let table = body.read_table(table);
                    body.tables.push(table);
                }
                _ => {}
            }
        }
        body
    }

    /// Read a table and every table nested in it. The outer table is
    /// recorded in `all_tables` before its nested ones.
    fn read_table(&mut self, table: &DocxTable) -> Table {
        let slot = self.all_tables.len();
        self.all_tables.push(Table::default());

        let mut rows: Vec<Vec<String>> = Vec::new();
        for TableChild::TableRow(row) in &table.rows {
            let above = rows.last().cloned().unwrap_or_default();
            let mut cells = Vec::new();
            for TableRowChild::TableCell(cell) in &row.cells {
                let layout = CellLayout::of(cell);
                let text = self.cell_text(cell);
                let text = if layout.continues_merge {
                    above.get(cells.len()).cloned().unwrap_or_default()
                } else {
                    text
                };
                for _ in 0..layout.span {
                    cells.push(text.clone());
                }
            }
            rows.push(cells);
        }

        let table = Table::from_rows(rows);
        self.all_tables[slot] = table.clone();
        table
    }

    /// Paragraphs directly in the cell joined by newlines, trimmed.
    fn cell_text(&mut self, cell: &TableCell) -> String {
        let mut paragraphs = Vec::new();
        for content in &cell.children {
            match content {
                TableCellContent::Paragraph(paragraph) => {
                    let text = paragraph_text(paragraph);
                    self.all_paragraphs.push(text.clone());
                    paragraphs.push(text);
                }
                TableCellContent::Table(nested) => {
                    self.read_table(nested);
                }
                _ => {}
            }
        }
        paragraphs.join("\n").trim().to_string()
    }
}

/// Run text of a paragraph; tabs and breaks become `\t` and `\n`.
fn paragraph_text(paragraph: &Paragraph) -> String {
    let mut text = String::new();
    push_children(&mut text, &paragraph.children);
    text
}

fn push_children(text: &mut String, children: &[ParagraphChild]) {
    for child in children {
        match child {
            ParagraphChild::Run(run) => {
                for run_child in &run.children {
                    match run_child {
                        RunChild::Text(t) => text.push_str(&t.text),
                        RunChild::Tab(_) => text.push('\t'),
                        RunChild::Break(_) => text.push('\n'),
                        _ => {}
                    }
                }
            }
            ParagraphChild::Hyperlink(link) => push_children(text, &link.children),
            _ => {}
        }
    }
}

/// Grid placement of a cell.
///
/// docx-rs keeps cell properties private, so they are read from the
/// serialized form it exposes.
struct CellLayout {
    span: usize,
    continues_merge: bool,
}

impl CellLayout {
    fn of(cell: &TableCell) -> Self {
        let property = serde_json::to_value(&cell.property).unwrap_or(Value::Null);

        let span = property
            .get("gridSpan")
            .and_then(|v| v.as_u64().or_else(|| v.get("val").and_then(Value::as_u64)))
            .and_then(|v| usize::try_from(v).ok())
            .unwrap_or(1)
            .max(1);

        let merge = property
            .get("verticalMerge")
            .and_then(|v| v.as_str().or_else(|| v.get("val").and_then(Value::as_str)));

        Self {
            span,
            continues_merge: merge == Some("continue"),
        }
    }
}

//! Table detection through tabula-java's JSON output.

use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use crate::error::ToolError;
use crate::models::result::Table;
use crate::tools::{ToolCommand, Toolbox};

#[derive(Debug, Deserialize)]
struct TabulaTable {
    #[serde(default)]
    data: Vec<Vec<TabulaCell>>,
}

#[derive(Debug, Deserialize)]
struct TabulaCell {
    #[serde(default)]
    text: String,
}

/// Run tabula over every page of `path`.
pub async fn extract_tables(path: &Path, toolbox: &Toolbox) -> Result<Vec<Table>, ToolError> {
    let tools = &toolbox.config().tools;
    let command = ToolCommand::new(&tools.java)
        .arg("-Dfile.encoding=UTF8")
        .arg("-jar")
        .arg(&tools.tabula_jar)
        .arg("--pages")
        .arg("all")
        .arg("--format")
        .arg("JSON")
        .arg(path);

    let json = toolbox.run_stdout(&command).await?;
    let tables = parse_tabula_json(&json)?;
    debug!("tabula found {} tables", tables.len());
    Ok(tables)
}

/// Parse tabula's `[{"data": [[{"text": ..}]]}]` output, dropping tables
/// without any cell text.
pub fn parse_tabula_json(json: &str) -> Result<Vec<Table>, ToolError> {
    if json.trim().is_empty() {
        return Ok(Vec::new());
    }

    let raw: Vec<TabulaTable> =
        serde_json::from_str(json).map_err(|e| ToolError::Output(format!("tabula JSON: {e}")))?;

    Ok(raw
        .into_iter()
        .map(|table| {
            Table::from_rows(
                table
                    .data
                    .into_iter()
                    .map(|row| row.into_iter().map(|cell| cell.text.trim().to_string()).collect())
                    .collect(),
            )
        })
        .filter(|table| table.rows.iter().flatten().any(|cell| !cell.is_empty()))
        .collect())
}

//! Reading lab report sheets into a [`RawTable`].
//!
//! Report sheets carry a few lines of lab letterhead above the real header
//! row, and a units row directly below it. The header row is found by
//! scanning the leading rows for the marker column (`Customer`); anything
//! above it is letterhead, and the units row is dropped.
//!
//! Column names are trimmed of trailing whitespace. Cell values pass
//! through undisturbed — downstream stages depend on seeing the literal
//! distinction between empty cells, textual `"None"`/`"nan"`, and real
//! content.

use std::path::Path;

use csv::ReaderBuilder;
use tracing::debug;

use am_model::{CellValue, Column, RawTable};

use crate::error::{IngestError, Result};

#[derive(Debug, Clone)]
pub struct ReportReadOptions {
    /// Column name that identifies the header row of a report sheet.
    pub marker_column: String,
    /// Rows dropped directly below the header (the units row).
    pub units_rows: usize,
    /// How many leading rows to scan for the header.
    pub max_header_scan: usize,
}

impl Default for ReportReadOptions {
    fn default() -> Self {
        Self {
            marker_column: "Customer".to_string(),
            units_rows: 1,
            max_header_scan: 5,
        }
    }
}

fn normalize_header(raw: &str) -> String {
    raw.trim_matches('\u{feff}').trim_end().to_string()
}

pub fn read_report_table(path: &Path) -> Result<RawTable> {
    read_report_table_with_options(path, &ReportReadOptions::default())
}

pub fn read_report_table_with_options(
    path: &Path,
    options: &ReportReadOptions,
) -> Result<RawTable> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .map_err(|source| IngestError::Read {
            path: path.to_path_buf(),
            source,
        })?;

    let mut raw_rows: Vec<Vec<String>> = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|source| IngestError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let row: Vec<String> = record.iter().map(String::from).collect();
        if row.iter().all(|value| value.trim().is_empty()) {
            continue;
        }
        raw_rows.push(row);
    }

    let header_index =
        find_header_row(&raw_rows, options).ok_or_else(|| IngestError::NotReportFormat {
            path: path.to_path_buf(),
            marker: options.marker_column.clone(),
        })?;

    let headers: Vec<String> = raw_rows[header_index]
        .iter()
        .enumerate()
        .map(|(idx, value)| {
            let name = normalize_header(value);
            if name.is_empty() {
                // Untitled columns get the placeholder convention the
                // layout definitions expect.
                format!("Unnamed: {idx}")
            } else {
                name
            }
        })
        .collect();

    let data_start = header_index + 1 + options.units_rows;
    let mut columns: Vec<Column> = headers
        .into_iter()
        .map(|name| Column::new(name, Vec::new()))
        .collect();
    for record in raw_rows.iter().skip(data_start) {
        for (idx, column) in columns.iter_mut().enumerate() {
            let value = record.get(idx).map(String::as_str).unwrap_or("");
            let cell = if value.is_empty() {
                CellValue::Missing
            } else {
                CellValue::Text(value.to_string())
            };
            column.cells.push(cell);
        }
    }

    let table = RawTable::new(columns);
    debug!(
        path = %path.display(),
        column_count = table.columns.len(),
        row_count = table.row_count(),
        "report table read"
    );
    Ok(table)
}

/// Index of the first leading row containing the marker column name.
fn find_header_row(rows: &[Vec<String>], options: &ReportReadOptions) -> Option<usize> {
    rows.iter()
        .take(options.max_header_scan)
        .position(|row| {
            row.iter()
                .any(|cell| normalize_header(cell) == options.marker_column)
        })
}

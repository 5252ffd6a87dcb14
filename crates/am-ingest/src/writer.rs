//! Writing converted tables back out as CSV.

use std::path::{Path, PathBuf};

use tracing::debug;

use am_model::{CellValue, RawTable};

use crate::error::{IngestError, Result};

/// Derive the output path for a converted input: the layout suffix is
/// spliced in before the extension, e.g. `run1.csv` with
/// `_AM_WATER_format_UPDATE` becomes `run1_AM_WATER_format_UPDATE.csv`.
pub fn output_path_for(input: &Path, suffix: &str) -> PathBuf {
    let stem = input
        .file_stem()
        .and_then(|value| value.to_str())
        .unwrap_or("output");
    let extension = input
        .extension()
        .and_then(|value| value.to_str())
        .unwrap_or("csv");
    input.with_file_name(format!("{stem}{suffix}.{extension}"))
}

/// Write a table as CSV, header row first, columns in table order.
///
/// The file is rendered fully in memory and written in one call, so a
/// failed conversion never leaves a partial output behind.
pub fn write_table(path: &Path, table: &RawTable) -> Result<()> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    let write_error = |source: csv::Error| IngestError::Write {
        path: path.to_path_buf(),
        source: std::io::Error::other(source),
    };

    writer
        .write_record(table.column_names())
        .map_err(write_error)?;
    for row in 0..table.row_count() {
        let record: Vec<String> = table
            .columns
            .iter()
            .map(|column| match column.cells.get(row) {
                Some(CellValue::Text(value)) => value.clone(),
                Some(CellValue::Number(value)) => format!("{value}"),
                Some(CellValue::Missing) | None => String::new(),
            })
            .collect();
        writer.write_record(&record).map_err(write_error)?;
    }

    let buffer = writer.into_inner().map_err(|source| IngestError::Write {
        path: path.to_path_buf(),
        source: source.into_error(),
    })?;
    std::fs::write(path, buffer).map_err(|source| IngestError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(
        path = %path.display(),
        row_count = table.row_count(),
        "table written"
    );
    Ok(())
}

//! Method provenance annotation.
//!
//! Every analysis column gets a paired `<col>_meth` column recording
//! which analytical method produced the value. Runs after unit
//! conversion and renaming, so provenance only ever refers to canonical
//! columns.

use am_model::{CellValue, Column, RawTable};

/// Suffix joining an analysis column to its provenance column.
pub const METHOD_SUFFIX: &str = "_meth";

pub fn method_column_name(analysis: &str) -> String {
    format!("{analysis}{METHOD_SUFFIX}")
}

/// Append a `<col>_meth` column per analysis column: the method number
/// where the analysis cell holds a value, missing where it does not.
/// An analysis column absent from the table yields an all-missing
/// provenance column of the same length.
pub fn annotate(table: &mut RawTable, analysis_columns: &[String], method_number: &str) {
    let row_count = table.row_count();
    for analysis in analysis_columns {
        let cells = match table.column(analysis) {
            Some(column) => column
                .cells
                .iter()
                .map(|cell| {
                    if cell.is_missing() {
                        CellValue::Missing
                    } else {
                        CellValue::Text(method_number.to_string())
                    }
                })
                .collect(),
            None => vec![CellValue::Missing; row_count],
        };
        table.push_column(Column::new(method_column_name(analysis), cells));
    }
}

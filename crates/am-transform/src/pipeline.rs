//! Per-table conversion pipeline.
//!
//! One table moves through the stages strictly in order: detect the
//! layout, reshape into the canonical column set, normalize sample
//! identifiers, annotate method provenance, and assemble the final
//! column order. Each stage depends on the column set produced by the
//! one before it.

use std::time::Instant;

use tracing::{debug, warn};

use am_model::{CellValue, Column, ConvertError, LayoutSpec, RawTable, Result};

use crate::{detect, identifier, map, methods};

/// A successfully converted table plus what the caller needs to write
/// and report it.
#[derive(Debug)]
pub struct Conversion {
    /// Name of the layout the input matched.
    pub layout_name: String,
    /// Filename suffix for the output file.
    pub output_suffix: String,
    /// The converted table, columns in final output order.
    pub table: RawTable,
    /// Identifiers that were auto-prefixed without matching a known
    /// malformed variant; they need manual review.
    pub review_ids: Vec<String>,
}

/// Run one raw table through the full conversion.
///
/// Returns `UnrecognizedSchema` when no layout matches; any other error
/// means the table matched a layout but could not be converted without
/// losing data. Either way the input produces a complete output table
/// or none at all.
pub fn convert_table(mut table: RawTable, layouts: &[LayoutSpec]) -> Result<Conversion> {
    let start = Instant::now();
    let layout = detect::detect_layout(layouts, &table).ok_or(ConvertError::UnrecognizedSchema)?;

    map::apply_layout(&mut table, layout)?;

    let review_ids = match table.column_mut("sample_id") {
        Some(column) => identifier::normalize_column(column),
        None => Vec::new(),
    };
    for id in &review_ids {
        warn!(sample_id = %id, "identifier auto-prefixed, needs manual review");
    }

    methods::annotate(&mut table, &layout.analysis_columns, &layout.method_number);
    let table = ordered_output(table, layout);

    debug!(
        layout = %layout.name,
        row_count = table.row_count(),
        column_count = table.columns.len(),
        review_count = review_ids.len(),
        duration_ms = start.elapsed().as_millis(),
        "table converted"
    );
    Ok(Conversion {
        layout_name: layout.name.clone(),
        output_suffix: layout.output_suffix.clone(),
        table,
        review_ids,
    })
}

/// Assemble the output column order: `sample_id`, then each analysis
/// column immediately followed by its `_meth` column. Analysis columns
/// that were dropped as all-missing upstream are re-created empty so
/// every output carries the complete canonical schema.
fn ordered_output(mut table: RawTable, layout: &LayoutSpec) -> RawTable {
    let row_count = table.row_count();
    let mut take = |name: &str, table: &mut RawTable| {
        table
            .remove_column(name)
            .unwrap_or_else(|| Column::new(name, vec![CellValue::Missing; row_count]))
    };

    let mut ordered = RawTable::default();
    ordered.push_column(take("sample_id", &mut table));
    for analysis in &layout.analysis_columns {
        ordered.push_column(take(analysis, &mut table));
        ordered.push_column(take(&methods::method_column_name(analysis), &mut table));
    }
    ordered
}

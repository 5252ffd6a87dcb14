//! Per-cell unit conversion with censored-value passthrough.

use am_model::{CellValue, Column, ConvertError, Result, UnitConversion};

/// A measurement reported against a detection limit (`"<0.01"`,
/// `">250"`). Censored values are not numerically convertible and pass
/// through conversion untouched.
pub fn is_censored(value: &str) -> bool {
    value.contains('<') || value.contains('>')
}

/// Convert one cell. Missing and censored cells pass through unchanged;
/// anything else must parse as a number. No default is ever substituted
/// for an unparseable value — a wrong unit silently written would poison
/// every downstream interpretation of the measurement.
pub fn convert_cell(
    cell: &CellValue,
    conversion: &UnitConversion,
    row: usize,
) -> Result<CellValue> {
    match cell {
        CellValue::Missing => Ok(CellValue::Missing),
        CellValue::Number(value) => Ok(CellValue::Number(conversion.rule.apply(*value))),
        CellValue::Text(text) => {
            if is_censored(text) {
                return Ok(cell.clone());
            }
            let parsed: f64 =
                text.trim()
                    .parse()
                    .map_err(|_| ConvertError::UnparseableValue {
                        column: conversion.source.clone(),
                        row,
                        value: text.clone(),
                    })?;
            Ok(CellValue::Number(conversion.rule.apply(parsed)))
        }
    }
}

/// Convert a whole source column into its canonical replacement.
pub fn convert_column(source: &Column, conversion: &UnitConversion) -> Result<Column> {
    let cells = source
        .cells
        .iter()
        .enumerate()
        .map(|(row, cell)| convert_cell(cell, conversion, row))
        .collect::<Result<Vec<_>>>()?;
    Ok(Column::new(conversion.canonical.clone(), cells))
}

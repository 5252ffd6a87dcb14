//! Reshaping a detected table into the canonical column set.

use am_model::{CellValue, ConvertError, LayoutSpec, RawTable, Result};

use crate::units;

/// Text literals that mean "no value" when they reach us from a sheet.
const MISSING_LITERALS: [&str; 2] = ["None", "nan"];

/// Collapse textual null literals to real missing cells, table-wide.
pub fn normalize_missing_literals(table: &mut RawTable) {
    for column in &mut table.columns {
        for cell in &mut column.cells {
            if let CellValue::Text(text) = cell
                && MISSING_LITERALS.contains(&text.as_str())
            {
                *cell = CellValue::Missing;
            }
        }
    }
}

/// Reshape `table` in place per the layout:
///
/// 1. drop the layout's unconditionally-discarded columns;
/// 2. collapse `"None"`/`"nan"` literals and drop all-missing columns
///    (this is what disposes of the untitled placeholder columns);
/// 3. apply unit conversions, each source column replaced by its
///    canonical equivalent in place;
/// 4. rename every surviving column to its canonical name — a column
///    the layout cannot account for is schema drift and fails the
///    table rather than silently losing data;
/// 5. remove the layout's withheld canonical columns.
pub fn apply_layout(table: &mut RawTable, layout: &LayoutSpec) -> Result<()> {
    table.drop_columns(&layout.dropped_columns);

    normalize_missing_literals(table);
    table.drop_empty_columns();

    for conversion in &layout.unit_conversions {
        let Some(index) = table
            .columns
            .iter()
            .position(|column| column.name.trim_end() == conversion.source)
        else {
            // An all-missing source column was dropped above; the
            // canonical column is re-created empty during final ordering.
            continue;
        };
        let converted = units::convert_column(&table.columns[index], conversion)?;
        table.columns[index] = converted;
    }

    for column in &mut table.columns {
        match layout.canonical_for(column.name.trim_end()) {
            Some(canonical) => column.name = canonical.to_string(),
            None => {
                return Err(ConvertError::SchemaDrift {
                    column: column.name.clone(),
                });
            }
        }
    }

    table.drop_columns(&layout.withheld_columns);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use am_model::{Column, known_layouts};

    fn text(value: &str) -> CellValue {
        CellValue::Text(value.to_string())
    }

    fn layout(name: &str) -> LayoutSpec {
        known_layouts()
            .into_iter()
            .find(|layout| layout.name == name)
            .expect("known layout")
    }

    /// A table carrying every required column of the layout, all-missing
    /// except for the named overrides.
    fn full_table(layout: &LayoutSpec, rows: usize, overrides: &[(&str, Vec<CellValue>)]) -> RawTable {
        let columns = layout
            .required_columns
            .iter()
            .map(|name| {
                let cells = overrides
                    .iter()
                    .find(|(override_name, _)| override_name == name)
                    .map(|(_, cells)| cells.clone())
                    .unwrap_or_else(|| vec![CellValue::Missing; rows]);
                Column::new(name.clone(), cells)
            })
            .collect();
        RawTable::new(columns)
    }

    #[test]
    fn normalize_missing_literals_converts_none_and_nan() {
        let mut table = RawTable::new(vec![Column::new(
            "Colour",
            vec![text("None"), text("nan"), text("Brown"), CellValue::Missing],
        )]);
        normalize_missing_literals(&mut table);
        assert_eq!(
            table.column("Colour").unwrap().cells,
            vec![
                CellValue::Missing,
                CellValue::Missing,
                text("Brown"),
                CellValue::Missing
            ]
        );
    }

    #[test]
    fn water_layout_drops_converts_and_renames() {
        let layout = layout("water");
        let mut table = full_table(
            &layout,
            1,
            &[
                ("Name", vec![text("102.100.100/1")]),
                ("Conductivity", vec![text("50")]),
                ("pH", vec![text("7.9")]),
            ],
        );
        apply_layout(&mut table, &layout).unwrap();

        assert!(!table.has_column("Customer"));
        assert!(!table.has_column("Lab Number"));
        assert!(!table.has_column("Conductivity"));
        assert_eq!(
            table.column("conductivity_aqueous").unwrap().cells[0],
            CellValue::Number(5.0)
        );
        assert_eq!(table.column("sample_id").unwrap().cells[0], text("102.100.100/1"));
        assert_eq!(table.column("ph").unwrap().cells[0], text("7.9"));
    }

    #[test]
    fn soil_layout_withholds_depth_after_mapping() {
        let layout = layout("soil");
        let mut table = full_table(
            &layout,
            1,
            &[
                ("Name", vec![text("102.100.100/2")]),
                ("Depth", vec![text("0-10cm")]),
            ],
        );
        apply_layout(&mut table, &layout).unwrap();

        assert!(!table.has_column("depth"));
        assert!(!table.has_column("Depth"));
        assert!(table.has_column("sample_id"));
    }

    #[test]
    fn populated_placeholder_column_is_schema_drift() {
        let layout = layout("water");
        let mut table = full_table(
            &layout,
            1,
            &[
                ("Name", vec![text("102.100.100/3")]),
                ("Unnamed: 8", vec![text("stray data")]),
            ],
        );
        let error = apply_layout(&mut table, &layout).unwrap_err();
        match error {
            ConvertError::SchemaDrift { column } => assert_eq!(column, "Unnamed: 8"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn unknown_extra_column_is_schema_drift() {
        let layout = layout("water");
        let mut table = full_table(&layout, 1, &[("Name", vec![text("102.100.100/4")])]);
        table.push_column(Column::new("Lab Comments", vec![text("re-run")]));
        let error = apply_layout(&mut table, &layout).unwrap_err();
        assert!(matches!(error, ConvertError::SchemaDrift { .. }));
    }

    #[test]
    fn none_literal_column_is_dropped_not_drifted() {
        let layout = layout("water");
        // a column holding only textual "None" counts as empty and is
        // dropped before the rename step can reject it
        let mut table = full_table(&layout, 1, &[
            ("Name", vec![text("102.100.100/5")]),
            ("Unnamed: 1", vec![text("None")]),
        ]);
        apply_layout(&mut table, &layout).unwrap();
        assert!(!table.has_column("Unnamed: 1"));
    }

    #[test]
    fn unparseable_convertible_value_fails_the_table() {
        let layout = layout("water");
        let mut table = full_table(
            &layout,
            1,
            &[
                ("Name", vec![text("102.100.100/6")]),
                ("Ammonium Nitrogen", vec![text("tbd")]),
            ],
        );
        let error = apply_layout(&mut table, &layout).unwrap_err();
        assert!(matches!(error, ConvertError::UnparseableValue { .. }));
    }
}

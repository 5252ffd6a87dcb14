use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use am_cli::types::{FileOutcome, RunResult};

pub fn print_summary(result: &RunResult) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("File"),
        header_cell("Status"),
        header_cell("Layout"),
        header_cell("Rows"),
        header_cell("Review IDs"),
        header_cell("Output"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 3, CellAlignment::Right);
    align_column(&mut table, 4, CellAlignment::Right);

    let mut converted = 0usize;
    let mut skipped = 0usize;
    let mut failed = 0usize;
    for file in &result.files {
        let name = file
            .input
            .file_name()
            .and_then(|value| value.to_str())
            .unwrap_or("unknown");
        match &file.outcome {
            FileOutcome::Converted {
                layout,
                rows,
                output,
                review_count,
            } => {
                converted += 1;
                let output_cell = match output {
                    Some(path) => Cell::new(path.display().to_string()),
                    None => dim_cell("(dry run)"),
                };
                table.add_row(vec![
                    Cell::new(name),
                    Cell::new("converted")
                        .fg(Color::Green)
                        .add_attribute(Attribute::Bold),
                    Cell::new(layout),
                    Cell::new(rows),
                    count_cell(*review_count, Color::Yellow),
                    output_cell,
                ]);
            }
            FileOutcome::NotReportFormat => {
                skipped += 1;
                table.add_row(vec![
                    Cell::new(name),
                    dim_cell("not report format"),
                    dim_cell("-"),
                    dim_cell("-"),
                    dim_cell("-"),
                    dim_cell("-"),
                ]);
            }
            FileOutcome::Unrecognized => {
                skipped += 1;
                table.add_row(vec![
                    Cell::new(name),
                    Cell::new("unrecognized layout").fg(Color::Yellow),
                    dim_cell("-"),
                    dim_cell("-"),
                    dim_cell("-"),
                    dim_cell("-"),
                ]);
            }
            FileOutcome::Failed { reason } => {
                failed += 1;
                table.add_row(vec![
                    Cell::new(name),
                    Cell::new("failed")
                        .fg(Color::Red)
                        .add_attribute(Attribute::Bold),
                    dim_cell("-"),
                    dim_cell("-"),
                    dim_cell("-"),
                    Cell::new(reason).fg(Color::Red),
                ]);
            }
        }
    }
    println!("{table}");
    println!("Converted: {converted}  Skipped: {skipped}  Failed: {failed}");
    if result
        .files
        .iter()
        .any(|file| matches!(&file.outcome, FileOutcome::Converted { review_count, .. } if *review_count > 0))
    {
        println!("Some sample identifiers were auto-prefixed; check the log and review them manually.");
    }
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}

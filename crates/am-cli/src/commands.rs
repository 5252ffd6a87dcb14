use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use comfy_table::Table;
use tracing::info;

use am_cli::pipeline::{ConvertOptions, convert_files};
use am_cli::types::RunResult;
use am_ingest::list_report_files;
use am_model::known_layouts;

use crate::cli::ConvertArgs;
use crate::summary::apply_table_style;

pub fn run_layouts() -> Result<()> {
    let mut table = Table::new();
    table.set_header(vec![
        "Layout",
        "Method",
        "Required columns",
        "Analyses",
        "Output suffix",
    ]);
    apply_table_style(&mut table);
    for layout in known_layouts() {
        table.add_row(vec![
            layout.name.clone(),
            layout.method_number.clone(),
            layout.required_columns.len().to_string(),
            layout.analysis_columns.len().to_string(),
            layout.output_suffix.clone(),
        ]);
    }
    println!("{table}");
    Ok(())
}

pub fn run_convert(args: &ConvertArgs) -> Result<RunResult> {
    let inputs = expand_inputs(&args.inputs)?;
    if inputs.is_empty() {
        bail!("no CSV report files found in the given paths");
    }
    info!(file_count = inputs.len(), "starting conversion batch");

    if let Some(dir) = &args.output_dir {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("create output directory {}", dir.display()))?;
    }

    let options = ConvertOptions {
        output_dir: args.output_dir.clone(),
        dry_run: args.dry_run,
    };
    Ok(convert_files(&inputs, &options))
}

/// Expand directory arguments into their CSV files; plain file paths
/// pass through as given.
fn expand_inputs(paths: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut inputs = Vec::new();
    for path in paths {
        if path.is_dir() {
            let found = list_report_files(path)
                .with_context(|| format!("scan directory {}", path.display()))?;
            inputs.extend(found);
        } else {
            inputs.push(path.clone());
        }
    }
    Ok(inputs)
}

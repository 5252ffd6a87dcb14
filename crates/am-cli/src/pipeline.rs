//! Batch conversion loop.
//!
//! Files are processed independently and strictly in order; one bad file
//! never aborts the batch. Each file either produces one complete output
//! table or nothing at all.

use std::path::{Path, PathBuf};

use tracing::{error, info, warn};

use am_ingest::{IngestError, output_path_for, read_report_table, write_table};
use am_model::{ConvertError, LayoutSpec, known_layouts};
use am_transform::convert_table;

use crate::types::{FileOutcome, FileSummary, RunResult};

/// Options for a batch run.
#[derive(Debug, Default)]
pub struct ConvertOptions {
    /// Directory for converted outputs; next to each input when unset.
    pub output_dir: Option<PathBuf>,
    /// Convert and report without writing output files.
    pub dry_run: bool,
}

/// Convert each input file, collecting one summary per file.
pub fn convert_files(inputs: &[PathBuf], options: &ConvertOptions) -> RunResult {
    let layouts = known_layouts();
    let mut files = Vec::new();
    for input in inputs {
        let outcome = convert_one(input, &layouts, options);
        files.push(FileSummary {
            input: input.clone(),
            outcome,
        });
    }
    let has_errors = files
        .iter()
        .any(|file| matches!(file.outcome, FileOutcome::Failed { .. }));
    RunResult { files, has_errors }
}

fn convert_one(input: &Path, layouts: &[LayoutSpec], options: &ConvertOptions) -> FileOutcome {
    let table = match read_report_table(input) {
        Ok(table) => table,
        Err(IngestError::NotReportFormat { .. }) => {
            info!(file = %input.display(), "not in lab report format, skipping");
            return FileOutcome::NotReportFormat;
        }
        Err(other) => {
            error!(file = %input.display(), reason = %other, "read failed");
            return FileOutcome::Failed {
                reason: other.to_string(),
            };
        }
    };

    let conversion = match convert_table(table, layouts) {
        Ok(conversion) => conversion,
        Err(ConvertError::UnrecognizedSchema) => {
            warn!(
                file = %input.display(),
                "does not match any known soil or water analysis layout, skipping"
            );
            return FileOutcome::Unrecognized;
        }
        Err(other) => {
            error!(file = %input.display(), reason = %other, "conversion failed");
            return FileOutcome::Failed {
                reason: other.to_string(),
            };
        }
    };

    let rows = conversion.table.row_count();
    let review_count = conversion.review_ids.len();
    info!(
        file = %input.display(),
        layout = %conversion.layout_name,
        rows,
        review_count,
        "report converted"
    );

    if options.dry_run {
        return FileOutcome::Converted {
            layout: conversion.layout_name,
            rows,
            output: None,
            review_count,
        };
    }

    let output = resolve_output_path(input, &conversion.output_suffix, options);
    if let Err(write_error) = write_table(&output, &conversion.table) {
        error!(file = %input.display(), reason = %write_error, "write failed");
        return FileOutcome::Failed {
            reason: write_error.to_string(),
        };
    }
    info!(file = %input.display(), output = %output.display(), "output written");
    FileOutcome::Converted {
        layout: conversion.layout_name,
        rows,
        output: Some(output),
        review_count,
    }
}

fn resolve_output_path(input: &Path, suffix: &str, options: &ConvertOptions) -> PathBuf {
    let derived = output_path_for(input, suffix);
    match &options.output_dir {
        Some(dir) => {
            let name = derived.file_name().map(PathBuf::from).unwrap_or_default();
            dir.join(name)
        }
        None => derived,
    }
}

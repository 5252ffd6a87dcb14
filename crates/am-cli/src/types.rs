use std::path::PathBuf;

/// Outcome of one whole batch run.
#[derive(Debug)]
pub struct RunResult {
    pub files: Vec<FileSummary>,
    pub has_errors: bool,
}

/// Outcome for one input file.
#[derive(Debug)]
pub struct FileSummary {
    pub input: PathBuf,
    pub outcome: FileOutcome,
}

#[derive(Debug)]
pub enum FileOutcome {
    /// The file matched a layout and converted cleanly.
    Converted {
        layout: String,
        rows: usize,
        /// Where the output landed; `None` on a dry run.
        output: Option<PathBuf>,
        /// How many sample identifiers were auto-prefixed and need
        /// manual review.
        review_count: usize,
    },
    /// The file has no lab report header row at all.
    NotReportFormat,
    /// The file is a report sheet but matches no known layout.
    Unrecognized,
    /// The file matched a layout but conversion failed.
    Failed { reason: String },
}

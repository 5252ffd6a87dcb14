use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("directory not found: {path}")]
    DirectoryNotFound { path: PathBuf },

    #[error("cannot read directory {path}: {source}")]
    DirectoryRead {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The file has no header row carrying the report marker column; it is
    /// not one of the lab's report sheets at all (distinct from a report
    /// sheet whose column set matches no known layout).
    #[error("{path} is not in lab report format (no `{marker}` header row)")]
    NotReportFormat { path: PathBuf, marker: String },

    #[error("read {path}: {source}")]
    Read { path: PathBuf, source: csv::Error },

    #[error("write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, IngestError>;

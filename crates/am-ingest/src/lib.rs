pub mod discovery;
pub mod error;
pub mod report;
pub mod writer;

pub use discovery::list_report_files;
pub use error::{IngestError, Result};
pub use report::{ReportReadOptions, read_report_table, read_report_table_with_options};
pub use writer::{output_path_for, write_table};

//! CLI argument definitions for the AM converter.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "am-convert",
    version,
    about = "CSBP to Australian Microbiome (AM) metadata converter",
    long_about = "Convert CSBP soil and water analysis sheets into the AM database format.\n\n\
                  Converts CSBP units to AM units (ammonium, nitrate/nitrite, conductivity),\n\
                  normalizes sample identifiers, and records AM method numbers per analysis.\n\
                  Sheets must keep their original CSBP formatting; non-AM samples should be\n\
                  removed before converting. Depth values on soil sheets are not carried over\n\
                  and must be supplied on the AM submission sheet."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Convert CSBP report files (or directories of them) to AM format.
    Convert(ConvertArgs),

    /// List the known lab report layouts.
    Layouts,
}

#[derive(Parser)]
pub struct ConvertArgs {
    /// Report files or directories to scan for CSV report files.
    #[arg(value_name = "PATH", required = true)]
    pub inputs: Vec<PathBuf>,

    /// Directory for converted outputs (default: next to each input).
    #[arg(long = "output-dir", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Detect and convert without writing output files.
    #[arg(long = "dry-run")]
    pub dry_run: bool,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

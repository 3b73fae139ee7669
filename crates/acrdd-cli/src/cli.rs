//! CLI argument definitions for the data dictionary builder.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

use acrdd_model::DEFAULT_ENUMERATION_THRESHOLD;

#[derive(Parser)]
#[command(
    name = "acrdd",
    version,
    about = "Build data dictionaries for genomic study tables",
    long_about = "Build data dictionaries for genomic study tables.\n\n\
                  Profiles repository table exports against their declared schema,\n\
                  searches the consent index, reconciles snapshot listings, and\n\
                  converts archive data dictionaries to CSV."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
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
    /// Build one data dictionary CSV per table export.
    Profile(ProfileArgs),

    /// Search the consent index by study title and write study summaries.
    Search(SearchArgs),

    /// Mark repository snapshots that are registered in the consent index.
    Reconcile(ReconcileArgs),

    /// Convert archive data_dict.xml files to CSV.
    Dbgap(DbgapArgs),
}

#[derive(Parser)]
pub struct ProfileArgs {
    /// Snapshot or dataset schema JSON.
    #[arg(value_name = "SCHEMA")]
    pub schema: PathBuf,

    /// Directory holding one `<table>.csv` export per table.
    #[arg(value_name = "EXPORT_DIR")]
    pub export_dir: PathBuf,

    /// Output directory for dictionaries (default: <EXPORT_DIR>/data_dicts).
    #[arg(long = "output-dir", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Enumerate a string column when distinct values are at most this
    /// percentage of its non-missing values.
    #[arg(
        long = "enumeration-threshold",
        value_name = "PERCENT",
        default_value_t = u32::from(DEFAULT_ENUMERATION_THRESHOLD),
        value_parser = clap::value_parser!(u32).range(0..=100)
    )]
    pub enumeration_threshold: u32,

    /// Only profile these tables (repeatable).
    #[arg(long = "table", value_name = "NAME")]
    pub tables: Vec<String>,
}

#[derive(Parser)]
pub struct SearchArgs {
    /// Consent index export (JSON array of study records).
    #[arg(value_name = "INDEX")]
    pub index: PathBuf,

    /// Text to look for in study names (case-insensitive).
    #[arg(value_name = "QUERY")]
    pub query: String,

    /// Write one summary .txt per matching study into this directory.
    #[arg(long = "output-dir", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,
}

#[derive(Parser)]
pub struct ReconcileArgs {
    /// Consent index export (JSON array of study records).
    #[arg(value_name = "INDEX")]
    pub index: PathBuf,

    /// Repository snapshot listing (`{"items": [...]}`).
    #[arg(value_name = "LISTING")]
    pub listing: PathBuf,
}

#[derive(Parser)]
pub struct DbgapArgs {
    /// Output directory for converted CSV files.
    #[arg(long = "output-dir", value_name = "DIR")]
    pub output_dir: PathBuf,

    /// Archive data_dict.xml files.
    #[arg(value_name = "XML", required = true)]
    pub files: Vec<PathBuf>,
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

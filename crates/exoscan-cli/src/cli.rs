//! CLI argument definitions for the exoscan toolkit.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "exoscan",
    version,
    about = "Exoscan - Transit candidate ingestion and classification",
    long_about = "Normalize heterogeneous exoplanet catalog files and score\n\
                  transit candidates.\n\n\
                  Accepts messy CSV exports (KOI, TOI and similar archives),\n\
                  maps columns onto a canonical candidate schema and emits one\n\
                  prediction record per row."
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
    /// Score every candidate row of a catalog file.
    Predict(PredictArgs),

    /// Build a labeled training dataset from a catalog file.
    Dataset(DatasetArgs),

    /// List the canonical candidate fields and their defaults.
    Fields,
}

#[derive(Parser)]
pub struct PredictArgs {
    /// Path to the catalog file (CSV, possibly malformed).
    #[arg(value_name = "FILE")]
    pub input: PathBuf,

    /// Scorer weights file (JSON). Without it every row reports an
    /// error instead of a probability.
    #[arg(long = "model", value_name = "PATH")]
    pub model: Option<PathBuf>,

    /// Write prediction records to this file instead of stdout.
    #[arg(long = "output", value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Maximum number of rows scored per batch.
    #[arg(long = "max-rows", value_name = "N", default_value_t = 1000)]
    pub max_rows: usize,
}

#[derive(Parser)]
pub struct DatasetArgs {
    /// Path to the labeled catalog file.
    #[arg(value_name = "FILE")]
    pub input: PathBuf,

    /// Output Parquet path.
    #[arg(long = "out", value_name = "PATH", default_value = "dataset.parquet")]
    pub out: PathBuf,

    /// Fold inline time/flux series columns instead of extracting
    /// catalog features.
    #[arg(long = "curves")]
    pub curves: bool,
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

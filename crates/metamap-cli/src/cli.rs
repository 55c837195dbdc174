//! CLI argument definitions for metamap.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "metamap",
    version,
    about = "Map imaging-study metadata into a schema-shaped JSON document",
    long_about = "Map flat attribute records extracted from an imaging study into a\n\
                  JSON document whose shape is dictated by a referenced schema,\n\
                  guided by a declarative mapping specification."
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
    /// Map a study's records through a mapping specification.
    Map(MapArgs),

    /// Print the traversal skeleton of a schema file.
    Skeleton(SkeletonArgs),
}

#[derive(Parser)]
pub struct MapArgs {
    /// Path to the mapping specification JSON document.
    #[arg(value_name = "SPEC")]
    pub spec: PathBuf,

    /// Path to the study records JSON document (one object per series).
    #[arg(value_name = "RECORDS")]
    pub records: PathBuf,

    /// Directory schema references resolve against (default: the
    /// specification's directory).
    #[arg(long = "schema-dir", value_name = "DIR")]
    pub schema_dir: Option<PathBuf>,

    /// Output path for the mapped document.
    #[arg(long = "out", value_name = "PATH", default_value = "mapped_metadata.json")]
    pub out: PathBuf,

    /// Extension scope to fan out per series (repeatable).
    #[arg(long = "extension", value_name = "SCOPE")]
    pub extensions: Vec<String>,

    /// Attribute every record in the batch must agree on.
    #[arg(long = "identifier", value_name = "ATTR")]
    pub identifier: Option<String>,

    /// Substitute explicit nulls for missing source attributes instead of
    /// failing the run.
    #[arg(long = "null-missing")]
    pub null_missing: bool,

    /// Map and validate without writing the output file.
    #[arg(long = "dry-run")]
    pub dry_run: bool,
}

#[derive(Parser)]
pub struct SkeletonArgs {
    /// Path to the schema JSON file.
    #[arg(value_name = "SCHEMA")]
    pub schema: PathBuf,
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

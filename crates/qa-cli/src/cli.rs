//! CLI argument definitions for QA report pre-fill extraction.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "qa-prefill",
    version,
    about = "Extract radiology QA test data from spreadsheets",
    long_about = "Extract radiology QA test data from spreadsheets.\n\n\
                  Reads a CSV or workbook (file or URL) holding several\n\
                  `TEST: <title>` sections and prints the recognized values\n\
                  grouped by test, ready to pre-fill report forms."
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
    /// Extract test records from a spreadsheet file or URL.
    Extract(ExtractArgs),

    /// List the supported tests and their section titles.
    Tests(DictionaryArgs),

    /// List the accepted header spellings for one test.
    Headers(HeadersArgs),
}

#[derive(Parser)]
pub struct ExtractArgs {
    /// Spreadsheet path or http(s) URL (.csv, .tsv, .xlsx, .xls, .ods).
    #[arg(value_name = "SOURCE")]
    pub source: String,

    /// Worksheet to read from a workbook (default: the first sheet).
    #[arg(long = "sheet", value_name = "NAME")]
    pub sheet: Option<String>,

    /// Output format.
    #[arg(long = "format", value_enum, default_value = "json")]
    pub format: OutputFormatArg,

    /// Write the output to a file instead of stdout.
    #[arg(long = "output", short = 'o', value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Print extraction statistics to stderr.
    #[arg(long = "stats")]
    pub stats: bool,

    #[command(flatten)]
    pub dictionary: DictionaryArgs,
}

#[derive(Parser)]
pub struct DictionaryArgs {
    /// Header dictionary overlay (TOML) layered over the built-in one.
    ///
    /// Defaults to the file named by QA_HEADERS_FILE when set.
    #[arg(long = "dictionary", value_name = "PATH")]
    pub dictionary: Option<PathBuf>,
}

#[derive(Parser)]
pub struct HeadersArgs {
    /// Test identifier, e.g. totalFiltration.
    #[arg(value_name = "TEST")]
    pub test: String,

    #[command(flatten)]
    pub dictionary: DictionaryArgs,
}

/// Output format choices for `extract`.
#[derive(Clone, Copy, ValueEnum)]
pub enum OutputFormatArg {
    /// Records grouped by test, as JSON.
    Json,
    /// One table of records per test.
    Table,
    /// One table per test with a row per row index (last value wins).
    Rows,
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

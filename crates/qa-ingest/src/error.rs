//! Error types for source decoding.

use std::path::PathBuf;
use thiserror::Error;

/// File-level failures raised before any row is parsed.
#[derive(Debug, Error)]
pub enum IngestError {
    // === File System Errors ===
    /// Source file not found.
    #[error("source file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Failed to read file.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Source exceeds the size ceiling.
    #[error("{origin} is {size} bytes, exceeding the limit of {max_size} bytes")]
    FileTooLarge {
        origin: String,
        size: u64,
        max_size: u64,
    },

    // === Format Errors ===
    /// Extension or content type is not a spreadsheet format.
    #[error("unsupported source format for {origin}: '{format}'")]
    UnsupportedFormat { origin: String, format: String },

    /// Failed to parse delimited text.
    #[error("failed to parse CSV {origin}: {message}")]
    CsvParse { origin: String, message: String },

    /// Failed to open or read a workbook.
    #[error("failed to read workbook {origin}: {message}")]
    Workbook { origin: String, message: String },

    /// Requested worksheet does not exist.
    #[error("sheet '{sheet}' not found in {origin}")]
    SheetNotFound { origin: String, sheet: String },

    /// Workbook has no worksheets.
    #[error("workbook {origin} contains no sheets")]
    EmptyWorkbook { origin: String },

    // === Network Errors ===
    /// Transport failure while fetching a URL.
    #[error("network error: {0}")]
    Network(#[source] reqwest::Error),

    /// Server answered with a non-success status.
    #[error("fetching {url} failed with HTTP status {status}")]
    HttpStatus { url: String, status: u16 },
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;

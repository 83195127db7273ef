//! Spreadsheet source decoding for QA report pre-fill.
//!
//! This crate turns an uploaded or linked spreadsheet into the ordered raw
//! rows the extractor consumes. Every failure here is file-level and is
//! reported before any parsing starts.
//!
//! # Features
//!
//! - **CSV/TSV**: UTF-8, UTF-16 (with BOM) and Windows-1252 text, ragged rows
//! - **Workbooks**: xlsx, xlsm, xlsb, xls and ods via calamine
//! - **URLs**: blocking HTTP fetch with format detection
//!
//! # Example
//!
//! ```ignore
//! use qa_ingest::{ReadOptions, Source, load_source};
//!
//! let source = Source::parse("reports/room2.xlsx");
//! let sheet = load_source(&source, &ReadOptions::default())?;
//! println!("{} rows from {}", sheet.rows.len(), sheet.origin);
//! ```

mod csv;
mod error;
mod fetch;
mod format;
mod source;
mod workbook;

// === Error Types ===
pub use error::{IngestError, Result};

// === Formats ===
pub use format::SourceFormat;

// === Decoding ===
pub use csv::{decode_text, read_delimited};
pub use workbook::{SheetRows, read_workbook};

// === Sources ===
pub use fetch::fetch_bytes;
pub use source::{
    LoadedSheet, MAX_SOURCE_FILE_SIZE, ReadOptions, Source, check_file_size, decode_bytes,
    load_source, read_file,
};

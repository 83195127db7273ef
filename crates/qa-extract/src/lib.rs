//! Heuristic extraction of test records from radiology QA spreadsheets.
//!
//! A spreadsheet holds several test sections, each opened by a
//! `TEST: <title>` row. Inside a section, rows are settings lines, header
//! rows or data rows under the last header row. The extractor walks the rows
//! once and emits flat `(test, field, row index, value)` records that forms
//! use as pre-fill data.
//!
//! Extraction never fails: unknown titles, unmapped headers and unreadable
//! rows are skipped. Skips are visible through [`ExtractionStats`] and
//! `tracing` events.
//!
//! ```ignore
//! use qa_extract::extract;
//! use qa_standards::load_default_dictionary;
//!
//! let dictionary = load_default_dictionary()?;
//! let rows = vec![
//!     vec!["TEST: ACCURACY OF OPERATING POTENTIAL".to_string()],
//!     vec!["Applied kVp".to_string(), "mA 1".to_string()],
//!     vec!["80".to_string(), "79.5".to_string()],
//! ];
//! let grouped = extract(&rows, &dictionary);
//! ```

pub mod classify;
pub mod emit;
pub mod extractor;
pub mod group;
pub mod section;
pub mod stats;

pub use classify::{FieldValue, RowClass, classify_row};
pub use emit::{RecordEmitter, RowCounters};
pub use extractor::{
    Extraction, Extractor, ScanState, extract, extract_records, extract_with_stats,
};
pub use group::group_records;
pub use section::{is_blank, parse_boundary, row_boundary};
pub use stats::ExtractionStats;

//! Data model for radiology QA report pre-fill data.
//!
//! Test identifiers, raw spreadsheet rows and the records extracted from
//! them. The types here carry no parsing logic.

pub mod error;
pub mod fold;
pub mod grouped;
pub mod record;
pub mod test_id;

pub use error::{ModelError, Result};
pub use fold::{FieldRow, fold_rows};
pub use grouped::GroupedRecords;
pub use record::{ExtractedRecord, RawRow};
pub use test_id::TestId;

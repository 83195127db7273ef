use serde::{Deserialize, Serialize};

use crate::test_id::TestId;

/// One line of the source spreadsheet: cell strings in column order.
pub type RawRow = Vec<String>;

/// A single extracted value, keyed by test, canonical field and row counter.
///
/// `row_index` is the 1-based counter of the test section the value was
/// read from, not the physical spreadsheet row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractedRecord {
    pub field_name: String,
    pub value: String,
    pub row_index: u32,
    pub test_name: TestId,
}

impl ExtractedRecord {
    pub fn new(
        test_name: TestId,
        field_name: impl Into<String>,
        row_index: u32,
        value: impl Into<String>,
    ) -> Self {
        Self {
            field_name: field_name.into(),
            value: value.into(),
            row_index,
            test_name,
        }
    }
}

//! Counters describing one extraction run.

use serde::Serialize;

/// What the extractor saw and did. Purely diagnostic; never changes the
/// extracted records.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractionStats {
    /// Rows read, including boundaries and blank rows.
    pub rows: usize,
    /// Boundaries that matched a test.
    pub sections: usize,
    /// Boundaries that matched no marker.
    pub unmatched_sections: usize,
    pub blank_rows: usize,
    pub header_rows: usize,
    pub inline_pair_rows: usize,
    pub key_value_rows: usize,
    pub data_rows: usize,
    /// Rows inside a section that no rule accepted.
    pub dropped_rows: usize,
    /// Rows outside any matched section.
    pub ignored_rows: usize,
    pub records: usize,
}

impl ExtractionStats {
    /// Inline-pair and key-value rows together.
    pub fn settings_rows(&self) -> usize {
        self.inline_pair_rows + self.key_value_rows
    }

    /// Rows that produced nothing: dropped inside a section or ignored
    /// outside one.
    pub fn skipped_rows(&self) -> usize {
        self.dropped_rows + self.ignored_rows
    }
}

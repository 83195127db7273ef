//! Grouping the flat record stream by test.

use qa_model::{ExtractedRecord, GroupedRecords};

/// Groups records by test name in a single pass.
///
/// Keys appear in the order their first record appears; records keep their
/// input order. Nothing is merged or deduplicated.
pub fn group_records<I>(records: I) -> GroupedRecords
where
    I: IntoIterator<Item = ExtractedRecord>,
{
    records.into_iter().collect()
}

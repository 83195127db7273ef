//! Extracted records grouped by test, in first-seen order.

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::record::ExtractedRecord;
use crate::test_id::TestId;

/// Mapping from test identifier to the records extracted for it.
///
/// Key order is insertion order: the first record of a test fixes the
/// position of its key. Records inside a key keep emission order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupedRecords {
    groups: Vec<(TestId, Vec<ExtractedRecord>)>,
}

impl GroupedRecords {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a record under its own `test_name`, creating the group on
    /// first occurrence.
    pub fn push(&mut self, record: ExtractedRecord) {
        match self
            .groups
            .iter_mut()
            .find(|(test, _)| *test == record.test_name)
        {
            Some((_, records)) => records.push(record),
            None => self.groups.push((record.test_name, vec![record])),
        }
    }

    /// Records for one test, if any were extracted.
    pub fn get(&self, test: TestId) -> Option<&[ExtractedRecord]> {
        self.groups
            .iter()
            .find(|(id, _)| *id == test)
            .map(|(_, records)| records.as_slice())
    }

    /// Test identifiers in key order.
    pub fn tests(&self) -> impl Iterator<Item = TestId> + '_ {
        self.groups.iter().map(|(test, _)| *test)
    }

    pub fn iter(&self) -> impl Iterator<Item = (TestId, &[ExtractedRecord])> {
        self.groups
            .iter()
            .map(|(test, records)| (*test, records.as_slice()))
    }

    /// Number of test groups.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Total number of records across every group.
    pub fn record_count(&self) -> usize {
        self.groups.iter().map(|(_, records)| records.len()).sum()
    }

    pub fn into_inner(self) -> Vec<(TestId, Vec<ExtractedRecord>)> {
        self.groups
    }
}

impl FromIterator<ExtractedRecord> for GroupedRecords {
    fn from_iter<I: IntoIterator<Item = ExtractedRecord>>(iter: I) -> Self {
        let mut grouped = Self::new();
        for record in iter {
            grouped.push(record);
        }
        grouped
    }
}

impl Serialize for GroupedRecords {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.groups.len()))?;
        for (test, records) in &self.groups {
            map.serialize_entry(test.as_str(), records)?;
        }
        map.end()
    }
}

//! Record emission and per-test row counters.

use std::collections::BTreeMap;

use qa_model::{ExtractedRecord, TestId};

use crate::classify::FieldValue;

/// 1-based row counters, one per test, for the whole parse.
///
/// A test that appears in two sections keeps counting from where it left
/// off, so its row indexes never go backwards.
#[derive(Debug, Clone, Default)]
pub struct RowCounters {
    counters: BTreeMap<TestId, u32>,
}

impl RowCounters {
    /// Advances the counter for `test` and returns the new value.
    pub fn advance(&mut self, test: TestId) -> u32 {
        let counter = self.counters.entry(test).or_insert(0);
        *counter += 1;
        *counter
    }

    /// Current value; zero before the first counted row.
    pub fn current(&self, test: TestId) -> u32 {
        self.counters.get(&test).copied().unwrap_or(0)
    }
}

/// Collects records in emission order.
#[derive(Debug, Default)]
pub struct RecordEmitter {
    counters: RowCounters,
    records: Vec<ExtractedRecord>,
}

impl RecordEmitter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Counts one settings or data row for `test` and emits a record per
    /// non-empty value, all stamped with the advanced counter.
    ///
    /// Returns the number of records emitted.
    pub fn emit_row(&mut self, test: TestId, values: Vec<FieldValue>) -> usize {
        let row_index = self.counters.advance(test);
        let before = self.records.len();
        for (field, value) in values {
            if value.trim().is_empty() {
                continue;
            }
            self.records
                .push(ExtractedRecord::new(test, field, row_index, value));
        }
        self.records.len() - before
    }

    pub fn counters(&self) -> &RowCounters {
        &self.counters
    }

    pub fn records(&self) -> &[ExtractedRecord] {
        &self.records
    }

    pub fn into_records(self) -> Vec<ExtractedRecord> {
        self.records
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn value(field: &str, value: &str) -> FieldValue {
        (field.to_string(), value.to_string())
    }

    #[test]
    fn counters_are_private_per_test() {
        let mut counters = RowCounters::default();
        assert_eq!(counters.advance(TestId::TotalFiltration), 1);
        assert_eq!(counters.advance(TestId::TotalFiltration), 2);
        assert_eq!(counters.advance(TestId::CentralBeamAlignment), 1);
        assert_eq!(counters.current(TestId::TotalFiltration), 2);
        assert_eq!(counters.current(TestId::EffectiveFocalSpot), 0);
    }

    #[test]
    fn one_counter_step_per_row() {
        let mut emitter = RecordEmitter::new();
        let emitted = emitter.emit_row(
            TestId::RadiationLeakageLevel,
            vec![value("Workload", "500"), value("kV", "80")],
        );
        assert_eq!(emitted, 2);
        assert!(emitter.records().iter().all(|r| r.row_index == 1));
        assert_eq!(emitter.counters().current(TestId::RadiationLeakageLevel), 1);
    }

    #[test]
    fn empty_values_are_not_emitted() {
        let mut emitter = RecordEmitter::new();
        let emitted = emitter.emit_row(
            TestId::TotalFiltration,
            vec![value("HVL", " "), value("Applied_kVp", "80")],
        );
        assert_eq!(emitted, 1);
        assert_eq!(emitter.records()[0].field_name, "Applied_kVp");

        // A row with nothing to emit still counts.
        assert_eq!(emitter.emit_row(TestId::TotalFiltration, Vec::new()), 0);
        assert_eq!(emitter.counters().current(TestId::TotalFiltration), 2);
    }
}

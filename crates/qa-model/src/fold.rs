//! Folding flat records into per-row field maps.
//!
//! Forms consume extracted records one row at a time. When a field appears
//! more than once for the same row counter (for example a key-value line and
//! a table cell), the record emitted last wins.

use std::collections::BTreeMap;

use crate::record::ExtractedRecord;

/// Field values of a single row, keyed by canonical field name.
pub type FieldRow = BTreeMap<String, String>;

/// Folds records into `row_index -> field -> value`, last write wins.
pub fn fold_rows<'a, I>(records: I) -> BTreeMap<u32, FieldRow>
where
    I: IntoIterator<Item = &'a ExtractedRecord>,
{
    let mut rows: BTreeMap<u32, FieldRow> = BTreeMap::new();
    for record in records {
        rows.entry(record.row_index)
            .or_default()
            .insert(record.field_name.clone(), record.value.clone());
    }
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TestId;

    #[test]
    fn later_record_overwrites_same_field() {
        let records = vec![
            ExtractedRecord::new(TestId::TotalFiltration, "kVp", 1, "80"),
            ExtractedRecord::new(TestId::TotalFiltration, "HVL", 1, "2.4"),
            ExtractedRecord::new(TestId::TotalFiltration, "kVp", 1, "81"),
            ExtractedRecord::new(TestId::TotalFiltration, "kVp", 2, "100"),
        ];

        let rows = fold_rows(&records);

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[&1]["kVp"], "81");
        assert_eq!(rows[&1]["HVL"], "2.4");
        assert_eq!(rows[&2]["kVp"], "100");
    }
}

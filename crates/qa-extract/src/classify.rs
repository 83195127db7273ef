//! Row classification inside an active test section.
//!
//! Rules are tried in a fixed order and the first one that applies wins:
//!
//! 1. Inline-pair settings row (`Workload | 500 | kV | 80`), only while no
//!    header row is active and only for tests that admit inline pairs.
//! 2. Key-value row: a recognized header, one value, nothing else.
//! 3. Header row: enough cells are recognized headers.
//! 4. Data row: values under the active header row.
//!
//! Rows matching none of these are dropped. Rule 3 is a heuristic and is
//! ambiguous for single-column tables; the thresholds are kept as they are.

use qa_standards::TestHeaders;

/// A canonical field and the raw cell value read for it.
pub type FieldValue = (String, String);

/// Outcome of classifying one row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowClass {
    /// Label/value pairs read side by side. Never empty.
    InlinePairs(Vec<FieldValue>),
    /// A single label and its value.
    KeyValue(FieldValue),
    /// The row establishes the header row for following data rows.
    Header,
    /// Values under the active header row. May be empty when no cell sits
    /// under a recognized header; the row still counts.
    Data(Vec<FieldValue>),
    Dropped,
}

impl RowClass {
    pub fn name(&self) -> &'static str {
        match self {
            Self::InlinePairs(_) => "inline-pairs",
            Self::KeyValue(_) => "key-value",
            Self::Header => "header",
            Self::Data(_) => "data",
            Self::Dropped => "dropped",
        }
    }

    /// True for the classes that advance the test's row counter.
    pub fn advances_counter(&self) -> bool {
        matches!(
            self,
            Self::InlinePairs(_) | Self::KeyValue(_) | Self::Data(_)
        )
    }
}

/// Classifies `row` for the test described by `headers`.
///
/// `header_row` is the active header row of the section, `None` right after
/// a boundary or a blank row.
pub fn classify_row(
    row: &[String],
    headers: &TestHeaders,
    header_row: Option<&[String]>,
) -> RowClass {
    if header_row.is_none()
        && headers.accepts_inline_pairs()
        && let Some(pairs) = inline_pairs(row, headers)
    {
        return RowClass::InlinePairs(pairs);
    }
    if let Some(pair) = key_value(row, headers) {
        return RowClass::KeyValue(pair);
    }
    if is_header_row(row, headers) {
        return RowClass::Header;
    }
    match header_row {
        Some(header_row) => RowClass::Data(data_values(row, header_row, headers)),
        None => RowClass::Dropped,
    }
}

/// Reads the row two cells at a time as (label, value).
///
/// A value cell that is itself a recognized header means the row is really
/// a header row, so the whole row is rejected.
fn inline_pairs(row: &[String], headers: &TestHeaders) -> Option<Vec<FieldValue>> {
    let mut pairs = Vec::new();
    for chunk in row.chunks(2) {
        let label = chunk[0].as_str();
        let value = chunk.get(1).map_or("", |cell| cell.trim());
        if value.is_empty() {
            continue;
        }
        if headers.is_header(value) {
            return None;
        }
        if let Some(field) = headers.lookup(label) {
            pairs.push((field.to_string(), value.to_string()));
        }
    }
    (!pairs.is_empty()).then_some(pairs)
}

fn key_value(row: &[String], headers: &TestHeaders) -> Option<FieldValue> {
    let (label, rest) = row.split_first()?;
    let (value, tail) = rest.split_first()?;
    let value = value.trim();
    if value.is_empty() || tail.iter().any(|cell| !cell.trim().is_empty()) {
        return None;
    }
    let field = headers.lookup(label)?;
    Some((field.to_string(), value.to_string()))
}

/// At least two recognized cells, or one recognized cell alongside more
/// than one other value, or a lone recognized cell.
fn is_header_row(row: &[String], headers: &TestHeaders) -> bool {
    let matched = row.iter().filter(|cell| headers.is_header(cell)).count();
    let non_empty = row.iter().filter(|cell| !cell.trim().is_empty()).count();
    matched >= 2 || (matched == 1 && (non_empty > 2 || non_empty == 1))
}

fn data_values(row: &[String], header_row: &[String], headers: &TestHeaders) -> Vec<FieldValue> {
    row.iter()
        .zip(header_row)
        .filter_map(|(cell, header)| {
            let value = cell.trim();
            if value.is_empty() {
                return None;
            }
            let field = headers.lookup(header)?;
            Some((field.to_string(), value.to_string()))
        })
        .collect()
}

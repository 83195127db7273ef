//! The single-pass extraction state machine.
//!
//! Rows are fed one at a time. The state tracks which test section is open
//! and whether a header row has been seen in it:
//!
//! ```text
//! NoSection --TEST: known--> AwaitingHeader --header row--> ParsingData
//!     |                          ^    ^                         |
//!     +--TEST: unknown--> Unmatched   +-------blank row---------+
//! ```
//!
//! Any boundary row leaves the current state for a fresh section. All state
//! lives in the [`Extractor`] and is dropped with it.

use qa_model::{ExtractedRecord, GroupedRecords, RawRow, TestId};
use qa_standards::HeaderDictionary;
use tracing::{debug, trace};

use crate::classify::{RowClass, classify_row};
use crate::emit::RecordEmitter;
use crate::section::{is_blank, row_boundary};
use crate::stats::ExtractionStats;

/// Where the scan currently is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanState {
    /// Before the first boundary.
    NoSection,
    /// After a boundary whose title matched no marker; rows are ignored.
    Unmatched,
    /// Inside a section with no active header row.
    AwaitingHeader { test: TestId },
    /// Inside a section with an active header row.
    ParsingData { test: TestId, header_row: RawRow },
}

impl ScanState {
    /// The open test, if any.
    pub fn test(&self) -> Option<TestId> {
        match self {
            Self::NoSection | Self::Unmatched => None,
            Self::AwaitingHeader { test } | Self::ParsingData { test, .. } => Some(*test),
        }
    }

    pub fn header_row(&self) -> Option<&[String]> {
        match self {
            Self::ParsingData { header_row, .. } => Some(header_row),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::NoSection => "no-section",
            Self::Unmatched => "unmatched",
            Self::AwaitingHeader { .. } => "awaiting-header",
            Self::ParsingData { .. } => "parsing-data",
        }
    }
}

/// Result of a full extraction: records in emission order plus statistics.
#[derive(Debug, Clone, Default)]
pub struct Extraction {
    pub records: Vec<ExtractedRecord>,
    pub stats: ExtractionStats,
}

impl Extraction {
    /// Groups the records by test.
    pub fn grouped(&self) -> GroupedRecords {
        self.records.iter().cloned().collect()
    }

    pub fn into_grouped(self) -> GroupedRecords {
        self.records.into_iter().collect()
    }
}

/// Incremental extractor over one row sequence.
#[derive(Debug)]
pub struct Extractor<'a> {
    dictionary: &'a HeaderDictionary,
    state: ScanState,
    emitter: RecordEmitter,
    stats: ExtractionStats,
}

impl<'a> Extractor<'a> {
    pub fn new(dictionary: &'a HeaderDictionary) -> Self {
        Self {
            dictionary,
            state: ScanState::NoSection,
            emitter: RecordEmitter::new(),
            stats: ExtractionStats::default(),
        }
    }

    pub fn state(&self) -> &ScanState {
        &self.state
    }

    pub fn records(&self) -> &[ExtractedRecord] {
        self.emitter.records()
    }

    /// Processes the next row.
    pub fn feed(&mut self, row: &[String]) {
        self.stats.rows += 1;
        let row_number = self.stats.rows;

        if let Some(title) = row_boundary(row) {
            self.open_section(&title, row_number);
            return;
        }

        if is_blank(row) {
            self.stats.blank_rows += 1;
            if let ScanState::ParsingData { test, .. } = self.state {
                trace!(row = row_number, test = %test, "blank row clears header row");
                self.state = ScanState::AwaitingHeader { test };
            }
            return;
        }

        let Some(test) = self.state.test() else {
            self.stats.ignored_rows += 1;
            trace!(row = row_number, state = self.state.name(), "row outside a section");
            return;
        };
        // Sections only open for tests with headers.
        let dictionary = self.dictionary;
        let Some(headers) = dictionary.headers(test) else {
            self.stats.dropped_rows += 1;
            return;
        };

        let class = classify_row(row, headers, self.state.header_row());
        trace!(row = row_number, test = %test, class = class.name(), "row classified");
        match class {
            RowClass::InlinePairs(values) => {
                self.stats.inline_pair_rows += 1;
                self.stats.records += self.emitter.emit_row(test, values);
            }
            RowClass::KeyValue(value) => {
                self.stats.key_value_rows += 1;
                self.stats.records += self.emitter.emit_row(test, vec![value]);
            }
            RowClass::Header => {
                self.stats.header_rows += 1;
                debug!(row = row_number, test = %test, "header row");
                self.state = ScanState::ParsingData {
                    test,
                    header_row: row.to_vec(),
                };
            }
            RowClass::Data(values) => {
                self.stats.data_rows += 1;
                self.stats.records += self.emitter.emit_row(test, values);
            }
            RowClass::Dropped => {
                self.stats.dropped_rows += 1;
            }
        }
    }

    fn open_section(&mut self, title: &str, row_number: usize) {
        let test = self
            .dictionary
            .match_title(title)
            .filter(|test| self.dictionary.headers(*test).is_some_and(|h| !h.is_empty()));
        match test {
            Some(test) => {
                self.stats.sections += 1;
                debug!(row = row_number, title, test = %test, "section opened");
                self.state = ScanState::AwaitingHeader { test };
            }
            None => {
                self.stats.unmatched_sections += 1;
                debug!(row = row_number, title, "section title matched no marker");
                self.state = ScanState::Unmatched;
            }
        }
    }

    /// Ends the scan.
    pub fn finish(self) -> Extraction {
        debug!(
            rows = self.stats.rows,
            sections = self.stats.sections,
            records = self.stats.records,
            "extraction finished"
        );
        Extraction {
            records: self.emitter.into_records(),
            stats: self.stats,
        }
    }
}

/// Extracts records and statistics from `rows`.
pub fn extract_with_stats<R: AsRef<[String]>>(
    rows: &[R],
    dictionary: &HeaderDictionary,
) -> Extraction {
    let mut extractor = Extractor::new(dictionary);
    for row in rows {
        extractor.feed(row.as_ref());
    }
    extractor.finish()
}

/// Extracts the flat record stream from `rows`, in spreadsheet order.
pub fn extract_records<R: AsRef<[String]>>(
    rows: &[R],
    dictionary: &HeaderDictionary,
) -> Vec<ExtractedRecord> {
    extract_with_stats(rows, dictionary).records
}

/// Extracts records from `rows` and groups them by test.
pub fn extract<R: AsRef<[String]>>(rows: &[R], dictionary: &HeaderDictionary) -> GroupedRecords {
    extract_with_stats(rows, dictionary).into_grouped()
}

#[cfg(test)]
mod tests {
    use qa_standards::TestHeaders;

    use super::*;

    fn rows(cells: &[&[&str]]) -> Vec<RawRow> {
        cells
            .iter()
            .map(|row| row.iter().map(|cell| (*cell).to_string()).collect())
            .collect()
    }

    fn dictionary() -> HeaderDictionary {
        HeaderDictionary::new("test")
            .with_marker("TOTAL FILTRATION", TestId::TotalFiltration)
            .with_marker("CENTRAL BEAM", TestId::CentralBeamAlignment)
            .with_headers(
                TestHeaders::new(TestId::TotalFiltration)
                    .with_field("Applied_kVp", &["Applied kVp"])
                    .and_then(|h| h.with_field("HVL", &["Measured HVL"]))
                    .unwrap(),
            )
    }

    #[test]
    fn walks_through_states() {
        let dictionary = dictionary();
        let mut extractor = Extractor::new(&dictionary);
        assert_eq!(extractor.state(), &ScanState::NoSection);

        let input = rows(&[
            &["TEST: TOTAL FILTRATION"],
            &["Applied kVp", "Measured HVL", "Tube"],
            &["80", "2.7"],
            &[""],
            &["TEST: SOMETHING ELSE"],
        ]);
        extractor.feed(&input[0]);
        assert_eq!(
            extractor.state(),
            &ScanState::AwaitingHeader {
                test: TestId::TotalFiltration
            }
        );
        extractor.feed(&input[1]);
        assert_eq!(extractor.state().name(), "parsing-data");
        extractor.feed(&input[2]);
        assert_eq!(extractor.records().len(), 2);
        extractor.feed(&input[3]);
        assert_eq!(extractor.state().name(), "awaiting-header");
        extractor.feed(&input[4]);
        assert_eq!(extractor.state(), &ScanState::Unmatched);
    }

    #[test]
    fn marker_for_test_without_headers_is_unmatched() {
        let dictionary = dictionary();
        let extraction = extract_with_stats(
            &rows(&[&["TEST: CENTRAL BEAM ALIGNMENT"], &["Applied kVp", "Measured HVL"]]),
            &dictionary,
        );
        assert!(extraction.records.is_empty());
        assert_eq!(extraction.stats.unmatched_sections, 1);
        assert_eq!(extraction.stats.ignored_rows, 1);
    }

    #[test]
    fn stats_count_each_row_once() {
        let dictionary = dictionary();
        let extraction = extract_with_stats(
            &rows(&[
                &["Report"],
                &["TEST: TOTAL FILTRATION"],
                &["Applied kVp", "Measured HVL", "Tube"],
                &["80", "2.7"],
                &["90", ""],
                &[],
                &["noise", "", "x"],
            ]),
            &dictionary,
        );
        let stats = extraction.stats;
        assert_eq!(stats.rows, 7);
        assert_eq!(stats.ignored_rows, 1);
        assert_eq!(stats.sections, 1);
        assert_eq!(stats.header_rows, 1);
        assert_eq!(stats.data_rows, 2);
        assert_eq!(stats.blank_rows, 1);
        assert_eq!(stats.dropped_rows, 1);
        assert_eq!(stats.records, 3);
        assert_eq!(extraction.records.len(), 3);
    }
}

//! Delimited text decoding.

use encoding_rs::{Encoding, WINDOWS_1252};
use qa_model::RawRow;
use tracing::debug;

use crate::error::{IngestError, Result};

/// Decodes raw bytes to text.
///
/// A byte-order mark selects UTF-8 or UTF-16; otherwise UTF-8 is tried and
/// Windows-1252 (common for Excel-exported CSVs) is the fallback.
pub fn decode_text(bytes: &[u8]) -> String {
    if let Some((encoding, bom_len)) = Encoding::for_bom(bytes) {
        let (text, _) = encoding.decode_without_bom_handling(&bytes[bom_len..]);
        return text.into_owned();
    }
    match std::str::from_utf8(bytes) {
        Ok(text) => text.to_string(),
        Err(_) => {
            debug!("source is not UTF-8, decoding as Windows-1252");
            let (text, _, _) = WINDOWS_1252.decode(bytes);
            text.into_owned()
        }
    }
}

/// Parses delimited text into trimmed rows. Rows may have different widths.
///
/// The csv reader skips empty lines; they are put back as empty rows so that
/// blank-line section breaks survive.
pub fn read_delimited(bytes: &[u8], delimiter: u8, origin: &str) -> Result<Vec<RawRow>> {
    let text = decode_text(bytes);
    let mut reader = ::csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .delimiter(delimiter)
        .from_reader(text.as_bytes());

    let mut rows: Vec<RawRow> = Vec::new();
    let mut record = ::csv::StringRecord::new();
    let mut previous_end = 0usize;
    loop {
        let more = reader
            .read_record(&mut record)
            .map_err(|e| IngestError::CsvParse {
                origin: origin.to_string(),
                message: e.to_string(),
            })?;
        if !more {
            break;
        }
        if let Some(position) = record.position() {
            let start = usize::try_from(position.byte()).unwrap_or(previous_end);
            let skipped = skipped_empty_lines(&text, previous_end, start);
            rows.extend(std::iter::repeat_with(Vec::new).take(skipped));
        }
        previous_end = usize::try_from(reader.position().byte()).unwrap_or(text.len());
        rows.push(record.iter().map(|cell| cell.trim().to_string()).collect());
    }
    Ok(rows)
}

/// Counts the empty lines between the end of one record and the start of
/// the next.
///
/// The reader may stop before or after the previous record's terminator,
/// so that terminator is dropped from the gap first.
fn skipped_empty_lines(text: &str, previous_end: usize, start: usize) -> usize {
    let Some(gap) = text.get(previous_end..start) else {
        return 0;
    };
    let consumed = &text[..previous_end];
    let gap = if consumed.is_empty() || consumed.ends_with('\n') {
        gap
    } else if consumed.ends_with('\r') {
        gap.strip_prefix('\n').unwrap_or(gap)
    } else {
        gap.strip_prefix("\r\n")
            .or_else(|| gap.strip_prefix('\n'))
            .or_else(|| gap.strip_prefix('\r'))
            .unwrap_or(gap)
    };
    gap.matches('\n').count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_delimited_trims_cells() {
        let rows = read_delimited(b"TEST: TOTAL FILTRATION\n kVp , HVL \n80,2.5\n", b',', "t.csv")
            .unwrap();
        assert_eq!(
            rows,
            vec![
                vec!["TEST: TOTAL FILTRATION".to_string()],
                vec!["kVp".to_string(), "HVL".to_string()],
                vec!["80".to_string(), "2.5".to_string()],
            ]
        );
    }

    #[test]
    fn test_read_delimited_quoted_and_blank() {
        let rows = read_delimited(b"\"Door, main\",0.2\n,,\n", b',', "t.csv").unwrap();
        assert_eq!(rows[0], vec!["Door, main", "0.2"]);
        assert_eq!(rows[1], vec!["", "", ""]);
    }

    #[test]
    fn test_read_delimited_keeps_empty_lines() {
        let rows = read_delimited(b"kVp,HVL\n\n80,2.5\n", b',', "t.csv").unwrap();
        assert_eq!(rows.len(), 3);
        assert!(rows[1].is_empty());
        assert_eq!(rows[2], vec!["80", "2.5"]);
    }

    #[test]
    fn test_read_delimited_keeps_empty_lines_crlf() {
        let rows = read_delimited(b"kVp,HVL\r\n\r\n\r\n80,2.5\r\n", b',', "t.csv").unwrap();
        assert_eq!(rows.len(), 4);
        assert!(rows[1].is_empty() && rows[2].is_empty());
        assert_eq!(rows[3], vec!["80", "2.5"]);
    }

    #[test]
    fn test_read_delimited_keeps_leading_empty_lines() {
        let rows = read_delimited(b"\n\nkVp\n", b',', "t.csv").unwrap();
        assert_eq!(rows, vec![Vec::<String>::new(), Vec::new(), vec!["kVp".to_string()]]);
    }

    #[test]
    fn test_read_delimited_quoted_newline_is_not_a_blank_row() {
        let rows = read_delimited(b"\"Door\nmain\",0.2\n\n80\n", b',', "t.csv").unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0], vec!["Door\nmain", "0.2"]);
        assert!(rows[1].is_empty());
    }

    #[test]
    fn test_skipped_empty_lines_ignores_previous_terminator() {
        let text = "a\r\n\r\nb";
        // Reader stopped after the record content, after '\r', or after '\n'.
        assert_eq!(skipped_empty_lines(text, 1, 5), 1);
        assert_eq!(skipped_empty_lines(text, 2, 5), 1);
        assert_eq!(skipped_empty_lines(text, 3, 5), 1);
        assert_eq!(skipped_empty_lines("a\nb", 2, 2), 0);
    }

    #[test]
    fn test_read_delimited_tab() {
        let rows = read_delimited(b"Workload\t500\tkV\t80\n", b'\t', "t.tsv").unwrap();
        assert_eq!(rows[0], vec!["Workload", "500", "kV", "80"]);
    }

    #[test]
    fn test_decode_text_strips_utf8_bom() {
        assert_eq!(decode_text(b"\xEF\xBB\xBFkVp,HVL"), "kVp,HVL");
    }

    #[test]
    fn test_decode_text_utf16_le() {
        let bytes = [0xFF, 0xFE, b'k', 0, b'V', 0];
        assert_eq!(decode_text(&bytes), "kV");
    }

    #[test]
    fn test_decode_text_windows_1252_fallback() {
        // 0xB5 is MICRO SIGN in Windows-1252.
        assert_eq!(decode_text(b"\xB5Gy"), "\u{b5}Gy");
    }
}

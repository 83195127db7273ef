//! Section boundaries and blank-row detection.

use std::sync::LazyLock;

use regex::Regex;

/// `TEST` followed by optional whitespace and a colon, any case.
static BOUNDARY_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^\s*TEST\s*:").expect("Invalid boundary regex"));

/// Returns the uppercased section title if `first_cell` opens a test section.
///
/// `"Test: Linearity of mA Loading"` yields `Some("LINEARITY OF MA LOADING")`.
/// The title may be empty (`"TEST:"`); such a section matches no marker.
pub fn parse_boundary(first_cell: &str) -> Option<String> {
    let found = BOUNDARY_REGEX.find(first_cell)?;
    Some(first_cell[found.end()..].trim().to_uppercase())
}

/// Parses the boundary in the first cell of `row`, if any.
pub fn row_boundary(row: &[String]) -> Option<String> {
    row.first().and_then(|cell| parse_boundary(cell))
}

/// True when every cell is empty or whitespace. A row with no cells is blank.
pub fn is_blank(row: &[String]) -> bool {
    row.iter().all(|cell| cell.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_boundary_variants() {
        assert_eq!(
            parse_boundary("TEST: ACCURACY OF OPERATING POTENTIAL").as_deref(),
            Some("ACCURACY OF OPERATING POTENTIAL")
        );
        assert_eq!(
            parse_boundary("test :  Total filtration ").as_deref(),
            Some("TOTAL FILTRATION")
        );
        assert_eq!(parse_boundary("Test:").as_deref(), Some(""));
    }

    #[test]
    fn rejects_non_boundaries() {
        assert_eq!(parse_boundary("TESTING: kVp"), None);
        assert_eq!(parse_boundary("TEST - kVp"), None);
        assert_eq!(parse_boundary("Applied kVp"), None);
        assert_eq!(parse_boundary(""), None);
    }

    #[test]
    fn blank_rows() {
        assert!(is_blank(&[]));
        assert!(is_blank(&["".to_string(), "  ".to_string()]));
        assert!(!is_blank(&["".to_string(), "0".to_string()]));
    }
}

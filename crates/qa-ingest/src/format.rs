//! Source format detection by extension or content type.

use std::fmt;
use std::path::Path;

/// Spreadsheet encodings the decoder understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    /// Comma separated text (`.csv`, `.txt`).
    Csv,
    /// Tab separated text (`.tsv`).
    Tsv,
    /// Office Open XML workbook (`.xlsx`, `.xlsm`).
    Xlsx,
    /// Binary workbook (`.xlsb`).
    Xlsb,
    /// Legacy BIFF workbook (`.xls`).
    Xls,
    /// OpenDocument spreadsheet (`.ods`).
    Ods,
}

impl SourceFormat {
    /// Detects the format from a file extension (case-insensitive).
    pub fn from_extension(extension: &str) -> Option<Self> {
        match extension.trim().trim_start_matches('.').to_lowercase().as_str() {
            "csv" | "txt" => Some(Self::Csv),
            "tsv" | "tab" => Some(Self::Tsv),
            "xlsx" | "xlsm" => Some(Self::Xlsx),
            "xlsb" => Some(Self::Xlsb),
            "xls" => Some(Self::Xls),
            "ods" => Some(Self::Ods),
            _ => None,
        }
    }

    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::from_extension)
    }

    /// Detects the format from the last path segment of a URL, ignoring any
    /// query string or fragment.
    pub fn from_url(url: &str) -> Option<Self> {
        let without_query = url.split(['?', '#']).next().unwrap_or(url);
        let segment = without_query.rsplit('/').next().unwrap_or(without_query);
        Self::from_path(Path::new(segment))
    }

    /// Detects the format from an HTTP `Content-Type` value.
    pub fn from_content_type(content_type: &str) -> Option<Self> {
        let mime = content_type
            .split(';')
            .next()
            .unwrap_or(content_type)
            .trim()
            .to_lowercase();
        match mime.as_str() {
            "text/csv" | "application/csv" => Some(Self::Csv),
            "text/tab-separated-values" => Some(Self::Tsv),
            "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet" => {
                Some(Self::Xlsx)
            }
            "application/vnd.ms-excel.sheet.binary.macroenabled.12" => Some(Self::Xlsb),
            "application/vnd.ms-excel" => Some(Self::Xls),
            "application/vnd.oasis.opendocument.spreadsheet" => Some(Self::Ods),
            _ => None,
        }
    }

    /// True for binary workbook formats decoded through calamine.
    pub fn is_workbook(self) -> bool {
        !matches!(self, Self::Csv | Self::Tsv)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Tsv => "tsv",
            Self::Xlsx => "xlsx",
            Self::Xlsb => "xlsb",
            Self::Xls => "xls",
            Self::Ods => "ods",
        }
    }
}

impl fmt::Display for SourceFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_by_extension() {
        assert_eq!(
            SourceFormat::from_path(Path::new("QA/Room 2.CSV")),
            Some(SourceFormat::Csv)
        );
        assert_eq!(
            SourceFormat::from_path(Path::new("report.xls")),
            Some(SourceFormat::Xls)
        );
        assert_eq!(SourceFormat::from_path(Path::new("report.pdf")), None);
        assert_eq!(SourceFormat::from_path(Path::new("report")), None);
    }

    #[test]
    fn detects_by_url_path() {
        assert_eq!(
            SourceFormat::from_url("https://files.example.org/qa/tube-7.xlsx?token=abc#sheet"),
            Some(SourceFormat::Xlsx)
        );
        assert_eq!(SourceFormat::from_url("https://files.example.org/download"), None);
    }

    #[test]
    fn detects_by_content_type() {
        assert_eq!(
            SourceFormat::from_content_type("text/csv; charset=utf-8"),
            Some(SourceFormat::Csv)
        );
        assert_eq!(
            SourceFormat::from_content_type("application/vnd.ms-excel"),
            Some(SourceFormat::Xls)
        );
        assert_eq!(SourceFormat::from_content_type("text/html"), None);
    }

    #[test]
    fn workbook_formats() {
        assert!(SourceFormat::Xlsx.is_workbook());
        assert!(SourceFormat::Ods.is_workbook());
        assert!(!SourceFormat::Tsv.is_workbook());
    }
}

//! Loading a spreadsheet source (file or URL) into raw rows.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use qa_model::RawRow;
use tracing::info;

use crate::csv::read_delimited;
use crate::error::{IngestError, Result};
use crate::fetch::fetch_bytes;
use crate::format::SourceFormat;
use crate::workbook::read_workbook;

/// Maximum source size accepted for decoding (50 MiB).
pub const MAX_SOURCE_FILE_SIZE: u64 = 50 * 1024 * 1024;

/// Where the spreadsheet comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    File(PathBuf),
    Url(String),
}

impl Source {
    /// Treats `http://` and `https://` strings as URLs, anything else as a path.
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        let lower = trimmed.to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            Self::Url(trimmed.to_string())
        } else {
            Self::File(PathBuf::from(trimmed))
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File(path) => write!(f, "{}", path.display()),
            Self::Url(url) => f.write_str(url),
        }
    }
}

/// Options applied while decoding a source.
#[derive(Debug, Clone)]
pub struct ReadOptions {
    /// Worksheet to read from a workbook; the first sheet when `None`.
    pub sheet: Option<String>,
    /// Size ceiling in bytes.
    pub max_size: u64,
}

impl Default for ReadOptions {
    fn default() -> Self {
        Self {
            sheet: None,
            max_size: MAX_SOURCE_FILE_SIZE,
        }
    }
}

impl ReadOptions {
    #[must_use]
    pub fn with_sheet(mut self, sheet: Option<String>) -> Self {
        self.sheet = sheet;
        self
    }

    #[must_use]
    pub fn with_max_size(mut self, max_size: u64) -> Self {
        self.max_size = max_size;
        self
    }
}

/// Decoded rows plus where they came from.
#[derive(Debug, Clone)]
pub struct LoadedSheet {
    pub origin: String,
    pub format: SourceFormat,
    /// Worksheet name for workbook sources.
    pub sheet: Option<String>,
    pub rows: Vec<RawRow>,
}

/// Loads and decodes a source.
pub fn load_source(source: &Source, options: &ReadOptions) -> Result<LoadedSheet> {
    let loaded = match source {
        Source::File(path) => read_file(path, options)?,
        Source::Url(url) => {
            let (bytes, format) = fetch_bytes(url, options.max_size)?;
            decode_bytes(bytes, format, options, url)?
        }
    };
    info!(
        origin = %loaded.origin,
        format = %loaded.format,
        rows = loaded.rows.len(),
        "source decoded"
    );
    Ok(loaded)
}

/// Reads a local file, detecting the format from its extension.
pub fn read_file(path: &Path, options: &ReadOptions) -> Result<LoadedSheet> {
    let origin = path.display().to_string();
    let format = SourceFormat::from_path(path).ok_or_else(|| IngestError::UnsupportedFormat {
        origin: origin.clone(),
        format: path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or("")
            .to_string(),
    })?;

    check_file_size(path, options.max_size)?;
    let bytes = fs::read(path).map_err(|e| file_error(path, e))?;
    decode_bytes(bytes, format, options, &origin)
}

/// Decodes in-memory bytes of a known format.
pub fn decode_bytes(
    bytes: Vec<u8>,
    format: SourceFormat,
    options: &ReadOptions,
    origin: &str,
) -> Result<LoadedSheet> {
    let (sheet, rows) = match format {
        SourceFormat::Csv => (None, read_delimited(&bytes, b',', origin)?),
        SourceFormat::Tsv => (None, read_delimited(&bytes, b'\t', origin)?),
        SourceFormat::Xlsx | SourceFormat::Xlsb | SourceFormat::Xls | SourceFormat::Ods => {
            let decoded = read_workbook(bytes, options.sheet.as_deref(), origin)?;
            (Some(decoded.sheet), decoded.rows)
        }
    };
    Ok(LoadedSheet {
        origin: origin.to_string(),
        format,
        sheet,
        rows,
    })
}

/// Checks file size against a limit before loading.
pub fn check_file_size(path: &Path, max_size: u64) -> Result<()> {
    let metadata = fs::metadata(path).map_err(|e| file_error(path, e))?;
    if metadata.len() > max_size {
        return Err(IngestError::FileTooLarge {
            origin: path.display().to_string(),
            size: metadata.len(),
            max_size,
        });
    }
    Ok(())
}

fn file_error(path: &Path, e: std::io::Error) -> IngestError {
    if e.kind() == std::io::ErrorKind::NotFound {
        IngestError::FileNotFound {
            path: path.to_path_buf(),
        }
    } else {
        IngestError::FileRead {
            path: path.to_path_buf(),
            source: e,
        }
    }
}

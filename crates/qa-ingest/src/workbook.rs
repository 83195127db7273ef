//! Workbook decoding (xlsx, xlsb, xls, ods) via calamine.

use std::io::Cursor;

use calamine::{Data, Reader, open_workbook_auto_from_rs};
use qa_model::RawRow;
use tracing::{debug, warn};

use crate::error::{IngestError, Result};

/// Rows of one worksheet, rendered as text.
#[derive(Debug, Clone)]
pub struct SheetRows {
    pub sheet: String,
    pub rows: Vec<RawRow>,
}

/// Reads one worksheet from workbook bytes.
///
/// The first sheet is used unless `sheet` names another one. Leading blank
/// rows and columns before the used range are kept as empty cells so column
/// positions match the sheet.
pub fn read_workbook(bytes: Vec<u8>, sheet: Option<&str>, origin: &str) -> Result<SheetRows> {
    let mut workbook =
        open_workbook_auto_from_rs(Cursor::new(bytes)).map_err(|e| IngestError::Workbook {
            origin: origin.to_string(),
            message: e.to_string(),
        })?;

    let sheet_names = workbook.sheet_names();
    let sheet_name = match sheet {
        Some(wanted) => sheet_names
            .iter()
            .find(|name| name.eq_ignore_ascii_case(wanted.trim()))
            .cloned()
            .ok_or_else(|| IngestError::SheetNotFound {
                origin: origin.to_string(),
                sheet: wanted.to_string(),
            })?,
        None => sheet_names
            .first()
            .cloned()
            .ok_or_else(|| IngestError::EmptyWorkbook {
                origin: origin.to_string(),
            })?,
    };
    if sheet.is_none() && sheet_names.len() > 1 {
        warn!(
            origin,
            sheet = %sheet_name,
            sheet_count = sheet_names.len(),
            "workbook has several sheets, reading the first"
        );
    }

    let range = workbook
        .worksheet_range(&sheet_name)
        .map_err(|e| IngestError::Workbook {
            origin: origin.to_string(),
            message: format!("failed to read sheet '{sheet_name}': {e}"),
        })?;

    let (start_row, start_col) = range.start().unwrap_or((0, 0));
    let mut rows: Vec<RawRow> = vec![Vec::new(); start_row as usize];
    for row in range.rows() {
        let mut cells = vec![String::new(); start_col as usize];
        cells.extend(row.iter().map(cell_text));
        rows.push(cells);
    }

    debug!(origin, sheet = %sheet_name, rows = rows.len(), "workbook sheet decoded");
    Ok(SheetRows {
        sheet: sheet_name,
        rows,
    })
}

/// Renders a cell the way it reads on screen: integral numbers without a
/// fractional part, booleans as `TRUE`/`FALSE`.
fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) | Data::DateTimeIso(s) | Data::DurationIso(s) => s.trim().to_string(),
        Data::Float(n) => format_number(*n),
        Data::Int(n) => n.to_string(),
        Data::Bool(b) => if *b { "TRUE" } else { "FALSE" }.to_string(),
        Data::Error(e) => format!("#{e:?}"),
        // Serial date number; calamine does not expose the 1904 flag.
        Data::DateTime(dt) => format_number(dt.as_f64()),
    }
}

fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{n}")
    }
}

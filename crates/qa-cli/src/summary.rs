use std::collections::BTreeMap;

use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use qa_extract::ExtractionStats;
use qa_model::{ExtractedRecord, GroupedRecords, TestId, fold_rows};
use qa_standards::{HeaderDictionary, TestHeaders};

use qa_cli::pipeline::ExtractOutcome;

/// Whether tables carry ANSI styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Styling {
    /// Style when stdout is a terminal.
    Auto,
    Always,
    Never,
}

/// One table of flat records per test.
pub fn render_record_tables(grouped: &GroupedRecords, styling: Styling) -> String {
    render_per_test(grouped, |test, records| {
        let mut table = Table::new();
        table.set_header(vec![
            header_cell("Row"),
            header_cell("Field"),
            header_cell("Value"),
        ]);
        apply_table_style(&mut table, styling);
        align_column(&mut table, 0, CellAlignment::Right);
        for record in records {
            table.add_row(vec![
                Cell::new(record.row_index),
                field_cell(&record.field_name),
                Cell::new(&record.value),
            ]);
        }
        section_text(test, records.len(), &table)
    })
}

/// One table per test with a line per row index. Fields repeated within a
/// row keep the last value.
pub fn render_row_tables(grouped: &GroupedRecords, styling: Styling) -> String {
    render_per_test(grouped, |test, records| {
        let fields = fields_in_order(records);
        let rows = fold_rows(records);

        let mut table = Table::new();
        let mut header = vec![header_cell("Row")];
        header.extend(fields.iter().map(|field| header_cell(field)));
        table.set_header(header);
        apply_table_style(&mut table, styling);
        align_column(&mut table, 0, CellAlignment::Right);
        for (row_index, values) in &rows {
            let mut cells = vec![Cell::new(row_index)];
            cells.extend(fields.iter().map(|field| match values.get(*field) {
                Some(value) => Cell::new(value),
                None => dim_cell("-"),
            }));
            table.add_row(cells);
        }
        section_text(test, rows.len(), &table)
    })
}

/// Extraction statistics for `--stats`.
pub fn render_stats(outcome: &ExtractOutcome, styling: Styling) -> String {
    let stats: &ExtractionStats = &outcome.extraction.stats;
    let mut table = Table::new();
    table.set_header(vec![header_cell("Metric"), header_cell("Count")]);
    apply_summary_table_style(&mut table, styling);
    align_column(&mut table, 1, CellAlignment::Right);
    let rows: [(&str, usize); 12] = [
        ("Rows read", stats.rows),
        ("Sections", stats.sections),
        ("Unmatched sections", stats.unmatched_sections),
        ("Blank rows", stats.blank_rows),
        ("Header rows", stats.header_rows),
        ("Inline-pair rows", stats.inline_pair_rows),
        ("Key-value rows", stats.key_value_rows),
        ("Data rows", stats.data_rows),
        ("Dropped rows", stats.dropped_rows),
        ("Ignored rows", stats.ignored_rows),
        ("Records", stats.records),
        ("Tests with records", outcome.grouped().len()),
    ];
    for (label, count) in rows {
        let count_cell = if count == 0 {
            dim_cell(count)
        } else {
            Cell::new(count)
        };
        table.add_row(vec![Cell::new(label), count_cell]);
    }
    let mut source = format!("Source: {} ({})", outcome.origin, outcome.format);
    if let Some(sheet) = &outcome.sheet {
        source.push_str(&format!(", sheet '{sheet}'"));
    }
    format!("{source}\n{table}")
}

/// Every test with its section titles.
pub fn render_tests(dictionary: &HeaderDictionary, styling: Styling) -> String {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Test"),
        header_cell("Section titles"),
        header_cell("Inline pairs"),
        header_cell("Fields"),
        header_cell("Spellings"),
    ]);
    apply_summary_table_style(&mut table, styling);
    align_column(&mut table, 2, CellAlignment::Center);
    align_column(&mut table, 3, CellAlignment::Right);
    align_column(&mut table, 4, CellAlignment::Right);
    for test in TestId::ALL {
        let titles: Vec<&str> = dictionary
            .markers_for(test)
            .map(|marker| marker.title.as_str())
            .collect();
        let (inline, fields, spellings) = match dictionary.headers(test) {
            Some(headers) => (
                headers.accepts_inline_pairs(),
                headers.fields().len(),
                headers.len(),
            ),
            None => (false, 0, 0),
        };
        table.add_row(vec![
            Cell::new(test.as_str())
                .fg(Color::Blue)
                .add_attribute(Attribute::Bold),
            Cell::new(titles.join("\n")),
            if inline {
                Cell::new("yes").fg(Color::Green)
            } else {
                dim_cell("no")
            },
            Cell::new(fields),
            Cell::new(spellings),
        ]);
    }
    format!("Dictionary: {}\n{table}", dictionary.origin())
}

/// Accepted spellings of one test, sorted by spelling.
pub fn render_headers(headers: &TestHeaders, styling: Styling) -> String {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Spelling"), header_cell("Field")]);
    apply_table_style(&mut table, styling);
    for (spelling, field) in headers.spellings() {
        table.add_row(vec![Cell::new(spelling), field_cell(field)]);
    }
    let inline = if headers.accepts_inline_pairs() {
        "accepts inline pairs"
    } else {
        "no inline pairs"
    };
    format!("{} ({inline})\n{table}", headers.test())
}

fn render_per_test<F>(grouped: &GroupedRecords, mut render: F) -> String
where
    F: FnMut(TestId, &[ExtractedRecord]) -> String,
{
    if grouped.is_empty() {
        return "No records extracted.".to_string();
    }
    grouped
        .iter()
        .map(|(test, records)| render(test, records))
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn section_text(test: TestId, count: usize, table: &Table) -> String {
    format!("{} - {} ({count})\n{table}", test, test.title())
}

/// Distinct fields in first-seen order.
fn fields_in_order(records: &[ExtractedRecord]) -> Vec<&str> {
    let mut seen: BTreeMap<&str, usize> = BTreeMap::new();
    for record in records {
        let next = seen.len();
        seen.entry(record.field_name.as_str()).or_insert(next);
    }
    let mut fields: Vec<(&str, usize)> = seen.into_iter().collect();
    fields.sort_by_key(|(_, position)| *position);
    fields.into_iter().map(|(field, _)| field).collect()
}

fn apply_table_style(table: &mut Table, styling: Styling) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
    apply_styling(table, styling);
}

fn apply_summary_table_style(table: &mut Table, styling: Styling) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
    apply_styling(table, styling);
}

fn apply_styling(table: &mut Table, styling: Styling) {
    match styling {
        Styling::Auto => {}
        Styling::Always => {
            table.enforce_styling();
        }
        Styling::Never => {
            table.force_no_tty();
        }
    }
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn field_cell(field: &str) -> Cell {
    Cell::new(field).fg(Color::Blue)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}

//! Source-to-records pipeline used by the `extract` command.
//!
//! Stages run in order and each one logs what it produced:
//! dictionary -> source decoding -> extraction -> rendering.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use qa_extract::{Extraction, extract_with_stats};
use qa_ingest::{ReadOptions, Source, SourceFormat, load_source};
use qa_model::GroupedRecords;
use qa_standards::{HeaderDictionary, load_dictionary_with_overlay, overlay_path_from_env};
use tracing::{info, info_span};

/// Decoded source details plus the extraction result.
#[derive(Debug)]
pub struct ExtractOutcome {
    pub origin: String,
    pub format: SourceFormat,
    pub sheet: Option<String>,
    pub extraction: Extraction,
}

impl ExtractOutcome {
    pub fn grouped(&self) -> GroupedRecords {
        self.extraction.grouped()
    }
}

/// Loads the header dictionary: the built-in one plus the overlay from
/// `--dictionary`, or from `QA_HEADERS_FILE` when no flag is given.
pub fn resolve_dictionary(overlay: Option<&Path>) -> Result<HeaderDictionary> {
    let overlay: Option<PathBuf> = overlay.map(Path::to_path_buf).or_else(overlay_path_from_env);
    let dictionary = load_dictionary_with_overlay(overlay.as_deref())
        .context("load header dictionary")?;
    info!(
        origin = dictionary.origin(),
        markers = dictionary.markers().len(),
        "header dictionary ready"
    );
    Ok(dictionary)
}

/// Decodes `source` and extracts its records.
pub fn run_extraction(
    source: &str,
    sheet: Option<String>,
    dictionary: &HeaderDictionary,
) -> Result<ExtractOutcome> {
    let source = Source::parse(source);
    let span = info_span!("extract", source = %source);
    let _guard = span.enter();

    let start = Instant::now();
    let options = ReadOptions::default().with_sheet(sheet);
    let loaded =
        load_source(&source, &options).with_context(|| format!("read source {source}"))?;

    let extraction = extract_with_stats(&loaded.rows, dictionary);
    info!(
        rows = extraction.stats.rows,
        sections = extraction.stats.sections,
        records = extraction.stats.records,
        duration_ms = start.elapsed().as_millis(),
        "extraction complete"
    );

    Ok(ExtractOutcome {
        origin: loaded.origin,
        format: loaded.format,
        sheet: loaded.sheet,
        extraction,
    })
}

/// Grouped records as pretty JSON, keys in first-seen order.
pub fn render_json(grouped: &GroupedRecords) -> Result<String> {
    serde_json::to_string_pretty(grouped).context("serialize records")
}

/// Writes `text` to `path`, or to stdout when no path is given.
pub fn write_output(text: &str, path: Option<&Path>) -> Result<()> {
    match path {
        Some(path) => {
            let mut contents = text.to_string();
            if !contents.ends_with('\n') {
                contents.push('\n');
            }
            fs::write(path, contents)
                .with_context(|| format!("write output {}", path.display()))?;
            info!(path = %path.display(), "output written");
        }
        None => println!("{text}"),
    }
    Ok(())
}

use std::str::FromStr;

use anyhow::{Context, Result, anyhow};
use tracing::warn;

use qa_cli::pipeline::{render_json, resolve_dictionary, run_extraction, write_output};
use qa_model::TestId;

use crate::cli::{DictionaryArgs, ExtractArgs, HeadersArgs, OutputFormatArg};
use crate::summary::{
    Styling, render_headers, render_record_tables, render_row_tables, render_stats, render_tests,
};

pub fn run_extract(args: &ExtractArgs, styling: Styling) -> Result<()> {
    let dictionary = resolve_dictionary(args.dictionary.dictionary.as_deref())?;
    let outcome = run_extraction(&args.source, args.sheet.clone(), &dictionary)?;

    if outcome.extraction.records.is_empty() {
        warn!(origin = %outcome.origin, "no records extracted");
    }

    let table_styling = if args.output.is_some() {
        Styling::Never
    } else {
        styling
    };
    let grouped = outcome.grouped();
    let text = match args.format {
        OutputFormatArg::Json => render_json(&grouped)?,
        OutputFormatArg::Table => render_record_tables(&grouped, table_styling),
        OutputFormatArg::Rows => render_row_tables(&grouped, table_styling),
    };
    write_output(&text, args.output.as_deref())?;

    if args.stats {
        eprintln!("{}", render_stats(&outcome, styling));
    }
    Ok(())
}

pub fn run_tests(args: &DictionaryArgs, styling: Styling) -> Result<()> {
    let dictionary = resolve_dictionary(args.dictionary.as_deref())?;
    println!("{}", render_tests(&dictionary, styling));
    Ok(())
}

pub fn run_headers(args: &HeadersArgs, styling: Styling) -> Result<()> {
    let test = TestId::from_str(&args.test).context("parse test identifier")?;
    let dictionary = resolve_dictionary(args.dictionary.dictionary.as_deref())?;
    let headers = dictionary
        .headers(test)
        .ok_or_else(|| anyhow!("no headers defined for {test}"))?;
    println!("{}", render_headers(headers, styling));
    Ok(())
}

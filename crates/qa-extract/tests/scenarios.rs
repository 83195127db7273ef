use qa_extract::{extract, extract_records, extract_with_stats};
use qa_model::{ExtractedRecord, RawRow, TestId};
use qa_standards::{HeaderDictionary, load_default_dictionary};

fn dictionary() -> HeaderDictionary {
    load_default_dictionary().expect("load builtin dictionary")
}

fn rows(cells: &[&[&str]]) -> Vec<RawRow> {
    cells
        .iter()
        .map(|row| row.iter().map(|cell| (*cell).to_string()).collect())
        .collect()
}

fn record(test: TestId, field: &str, row_index: u32, value: &str) -> ExtractedRecord {
    ExtractedRecord::new(test, field, row_index, value)
}

fn render(records: &[ExtractedRecord]) -> String {
    records
        .iter()
        .map(|r| format!("{} {}[{}] = {}", r.test_name, r.field_name, r.row_index, r.value))
        .collect::<Vec<_>>()
        .join("\n")
}

#[test]
fn header_and_data_row_with_numbered_columns() {
    let grouped = extract(
        &rows(&[
            &["TEST: ACCURACY OF OPERATING POTENTIAL"],
            &["Applied kVp", "mA 1", "mA 2"],
            &["80", "79.5", "80.1"],
        ]),
        &dictionary(),
    );

    assert_eq!(grouped.len(), 1);
    let test = TestId::AccuracyOfOperatingPotential;
    assert_eq!(
        grouped.get(test).unwrap(),
        &[
            record(test, "Applied_kVp", 1, "80"),
            record(test, "Measured_0", 1, "79.5"),
            record(test, "Measured_1", 1, "80.1"),
        ]
    );
}

#[test]
fn inline_pair_settings_row() {
    let grouped = extract(
        &rows(&[
            &["TEST: RADIATION LEAKAGE LEVEL FROM X-RAY TUBE HOUSE"],
            &["Workload", "500", "kV", "80"],
        ]),
        &dictionary(),
    );

    let test = TestId::RadiationLeakageLevel;
    assert_eq!(
        grouped.get(test).unwrap(),
        &[record(test, "Workload", 1, "500"), record(test, "kV", 1, "80")]
    );
}

#[test]
fn key_value_row_advances_counter_once() {
    let extraction = extract_with_stats(
        &rows(&[
            &["TEST: ACCURACY OF OPERATING POTENTIAL"],
            &["Tolerance", "5%", "", ""],
            &["Applied kVp", "mA 1", "mA 2"],
            &["60", "61.2"],
        ]),
        &dictionary(),
    );

    let test = TestId::AccuracyOfOperatingPotential;
    assert_eq!(extraction.stats.key_value_rows, 1);
    assert_eq!(
        extraction.records,
        vec![
            record(test, "Tolerance", 1, "5%"),
            record(test, "Applied_kVp", 2, "60"),
            record(test, "Measured_0", 2, "61.2"),
        ]
    );
}

#[test]
fn blank_row_clears_header_row() {
    let extraction = extract_with_stats(
        &rows(&[
            &["TEST: ACCURACY OF OPERATING POTENTIAL"],
            &["Applied kVp", "mA 1", "mA 2"],
            &["80", "79.5"],
            &["", ""],
            // No header row is active here, so this row is dropped.
            &["90", "89.9"],
            &["Average kVp", "Tolerance", "Remarks"],
            &["85", "5"],
        ]),
        &dictionary(),
    );

    let test = TestId::AccuracyOfOperatingPotential;
    assert_eq!(
        extraction.records,
        vec![
            record(test, "Applied_kVp", 1, "80"),
            record(test, "Measured_0", 1, "79.5"),
            record(test, "Average_kVp", 2, "85"),
            record(test, "Tolerance", 2, "5"),
        ]
    );
    assert_eq!(extraction.stats.dropped_rows, 1);
    assert_eq!(extraction.stats.header_rows, 2);
}

#[test]
fn unknown_section_emits_nothing_until_next_boundary() {
    let extraction = extract_with_stats(
        &rows(&[
            &["TEST: UNKNOWN FOO"],
            &["Applied kVp", "mA 1"],
            &["80", "79.5"],
            &["TEST: TOTAL FILTRATION"],
            &["kVp", "HVL", "Remarks"],
            &["80", "2.7"],
        ]),
        &dictionary(),
    );

    let grouped = extraction.grouped();
    assert_eq!(grouped.tests().collect::<Vec<_>>(), vec![TestId::TotalFiltration]);
    assert_eq!(extraction.stats.unmatched_sections, 1);
    assert_eq!(extraction.stats.ignored_rows, 2);
    assert_eq!(extraction.records.len(), 2);
}

#[test]
fn same_header_text_maps_per_test() {
    let records = extract_records(
        &rows(&[
            &["TEST: ACCURACY OF IRRADIATION TIME"],
            &["kVp", "Set Time", "Measured Time"],
            &["80", "100", "98"],
            &["TEST: TOTAL FILTRATION"],
            &["kVp", "HVL", "Remarks"],
            &["80", "2.7"],
        ]),
        &dictionary(),
    );

    let kvp: Vec<_> = records
        .iter()
        .filter(|r| r.value == "80")
        .map(|r| (r.test_name, r.field_name.as_str()))
        .collect();
    assert_eq!(
        kvp,
        vec![
            (TestId::AccuracyOfIrradiationTime, "kV"),
            (TestId::TotalFiltration, "kVp"),
        ]
    );
}

#[test]
fn repeated_section_continues_row_counter() {
    let records = extract_records(
        &rows(&[
            &["TEST: TOTAL FILTRATION"],
            &["kVp", "HVL", "Remarks"],
            &["80", "2.7"],
            &["TEST: CENTRAL BEAM ALIGNMENT"],
            &["FFD", "Tilt", "Remarks"],
            &["100", "0.5"],
            &["Test: Total Filtration (second tube)"],
            &["kVp", "HVL", "Remarks"],
            &["100", "3.1"],
        ]),
        &dictionary(),
    );

    let indexes: Vec<_> = records
        .iter()
        .map(|r| (r.test_name, r.row_index))
        .collect();
    assert_eq!(
        indexes,
        vec![
            (TestId::TotalFiltration, 1),
            (TestId::TotalFiltration, 1),
            (TestId::CentralBeamAlignment, 1),
            (TestId::CentralBeamAlignment, 1),
            (TestId::TotalFiltration, 2),
            (TestId::TotalFiltration, 2),
        ]
    );
}

#[test]
fn longer_marker_wins_over_its_prefix() {
    let grouped = extract(
        &rows(&[
            &["TEST: LINEARITY OF mAs LOADING"],
            &["kVp", "mAs", "Output 1"],
            &["70", "10", "1.02"],
            &["TEST: LINEARITY OF mA LOADING"],
            &["kVp", "mA Station", "Output 1"],
            &["70", "100", "2.04"],
        ]),
        &dictionary(),
    );

    let tests: Vec<_> = grouped.tests().collect();
    assert_eq!(
        tests,
        vec![TestId::LinearityOfMasLoading, TestId::LinearityOfMaLoading]
    );
    assert_eq!(
        grouped.get(TestId::LinearityOfMasLoading).unwrap()[1].field_name,
        "mAs_Applied"
    );
}

#[test]
fn free_text_column_after_label_is_a_header_row() {
    let extraction = extract_with_stats(
        &rows(&[
            &["TEST: TOTAL FILTRATION"],
            &["kVp", "Tube No", "HVL"],
            &["80", "A1", "2.5"],
            &["100", "A1", "3.1"],
        ]),
        &dictionary(),
    );

    let test = TestId::TotalFiltration;
    assert_eq!(
        extraction.records,
        vec![
            record(test, "kVp", 1, "80"),
            record(test, "HVL", 1, "2.5"),
            record(test, "kVp", 2, "100"),
            record(test, "HVL", 2, "3.1"),
        ]
    );
    assert_eq!(extraction.stats.header_rows, 1);
    assert_eq!(extraction.stats.inline_pair_rows, 0);
    assert_eq!(extraction.stats.dropped_rows, 0);
}

#[test]
fn two_column_header_row_reads_as_key_value() {
    // The key-value rule is tried before the header rule.
    let records = extract_records(
        &rows(&[
            &["TEST: ACCURACY OF OPERATING POTENTIAL"],
            &["Applied kVp", "mA 1"],
            &["80", "79.5"],
        ]),
        &dictionary(),
    );

    let test = TestId::AccuracyOfOperatingPotential;
    assert_eq!(records, vec![record(test, "Applied_kVp", 1, "mA 1")]);
}

#[test]
fn survey_report_renders_in_row_order() {
    let records = extract_records(
        &rows(&[
            &["Room 2 X-ray QA", "", ""],
            &["TEST: RADIATION PROTECTION SURVEY"],
            &["Applied kV", "80", "Applied mA", "100"],
            &["Workload", "500"],
            &["Location", "mR/hr", "Category"],
            &["Control console", "0.02", "Controlled"],
            &["Door", "", "Uncontrolled"],
            &[],
            &["Remarks", "Safe"],
        ]),
        &dictionary(),
    );

    insta::assert_snapshot!(render(&records), @r"
    radiationProtectionSurvey Applied_kV[1] = 80
    radiationProtectionSurvey Applied_mA[1] = 100
    radiationProtectionSurvey Workload[2] = 500
    radiationProtectionSurvey Location[3] = Control console
    radiationProtectionSurvey Measured_mR_hr[3] = 0.02
    radiationProtectionSurvey Category[3] = Controlled
    radiationProtectionSurvey Location[4] = Door
    radiationProtectionSurvey Category[4] = Uncontrolled
    radiationProtectionSurvey Remarks[5] = Safe
    ");
}

//! End-to-end pipeline tests: load -> validate -> preprocess -> analyze ->
//! save, driven through real files.

use std::io::Write;

use tabsift::persist::setup_directories;
use tabsift::prelude::*;
use tempfile::{tempdir, NamedTempFile};

fn write_csv(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::with_suffix(".csv").unwrap();
    write!(file, "{content}").unwrap();
    file.flush().unwrap();
    file
}

/// A 5-row table with one fully duplicated row and one row missing Age.
const SCENARIO_CSV: &str = "\
Name,Age,Score
Alice,30,85.5
Bob,25,90.0
Alice,30,85.5
Carol,,75.0
Dave,40,60.0
";

#[test]
fn test_five_row_scenario_drops_to_three() {
    let file = write_csv(SCENARIO_CSV);
    let table = CsvSource::new(file.path()).load().unwrap();
    let table = validate(table, None).unwrap();

    let clean = preprocess(&table, &PreprocessOptions::default().with_drop_na(true));
    assert_eq!(clean.row_count(), 3);

    let result = analyze(&clean, &AnalysisOptions::default());
    assert_eq!(result.shape.rows, 3);
    assert_eq!(result.shape.columns, 3);
    assert_eq!(
        result.numeric_columns.as_deref(),
        Some(&["Age".to_string(), "Score".to_string()][..])
    );

    let matrix = result.correlations.unwrap();
    assert_eq!(matrix.size(), 2);
    assert_eq!(matrix.values[0][0], 1.0);
    assert_eq!(matrix.values[1][1], 1.0);
    assert_eq!(matrix.values[0][1], matrix.values[1][0]);
}

#[test]
fn test_full_pipeline_writes_all_outputs() {
    let file = write_csv(SCENARIO_CSV);
    let out = tempdir().unwrap();
    let base = out.path().join("results");

    let table = CsvSource::new(file.path()).load().unwrap();
    let table = validate(table, None).unwrap();
    let clean = preprocess(&table, &PreprocessOptions::default());
    let result = analyze(&clean, &AnalysisOptions::default());

    let saved = save_results(SaveInput::Analysis(&result), &base, true).unwrap();

    assert!(saved.get(OutputKind::Csv).unwrap().exists());
    assert!(saved.get(OutputKind::Json).unwrap().exists());
    assert!(saved.get(OutputKind::Report).unwrap().exists());

    let report = std::fs::read_to_string(saved.get(OutputKind::Report).unwrap()).unwrap();
    assert!(report.contains("Dataset Shape: 3 rows x 3 columns"));
    assert!(report.contains("Data Completeness: 100.0%"));
    assert!(report.contains("Duplicate Rate: 0.0%"));
}

#[test]
fn test_required_columns_enforced_through_pipeline() {
    let file = write_csv(SCENARIO_CSV);
    let table = CsvSource::new(file.path()).load().unwrap();

    let required = vec!["Name".to_string(), "Salary".to_string(), "Dept".to_string()];
    let err = validate(table, Some(&required)).unwrap_err();
    let message = err.to_string();
    assert!(message.contains("Salary"));
    assert!(message.contains("Dept"));
    assert!(!message.contains("Name,"));
}

#[test]
fn test_fill_na_keeps_all_unique_rows() {
    let file = write_csv(SCENARIO_CSV);
    let table = CsvSource::new(file.path()).load().unwrap();

    let options = PreprocessOptions::default()
        .with_drop_na(false)
        .with_fill_na(true)
        .with_fill_method(FillMethod::Mean);
    let clean = preprocess(&table, &options);

    // The duplicate row goes, the missing Age gets filled.
    assert_eq!(clean.row_count(), 4);
    assert_eq!(clean.column("Age").unwrap().null_count(), 0);

    let result = analyze(&clean, &AnalysisOptions::default());
    let metrics = result.custom_metrics.unwrap();
    assert_eq!(metrics.data_completeness, 100.0);
    assert_eq!(metrics.duplicate_rate, 0.0);
}

#[test]
fn test_setup_directories_then_save_into_them() {
    let out = tempdir().unwrap();
    let data_dir = out.path().join("data");
    let output_dir = out.path().join("output");
    setup_directories(&[&data_dir, &output_dir]).unwrap();
    assert!(data_dir.is_dir());
    assert!(output_dir.is_dir());

    let file = write_csv(SCENARIO_CSV);
    let table = CsvSource::new(file.path()).load().unwrap();
    let clean = preprocess(&table, &PreprocessOptions::default());
    let result = analyze(&clean, &AnalysisOptions::default());

    let saved =
        save_results(SaveInput::Analysis(&result), output_dir.join("results"), true).unwrap();
    assert_eq!(saved.len(), 3);
}

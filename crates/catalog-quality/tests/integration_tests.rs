//! Integration tests for the catalog quality engine.
//!
//! These tests load the fixture datasets through the public sources and run
//! the full catalog rule table against them.

use catalog_quality::{
    CasingPolicy, CsvFileSource, DataProfiler, DatasetSource, Dimension, EvaluationConfig,
    JsonFileSource, QualityError, ReportGenerator, Table, evaluate, source_for_path,
};
use catalog_quality::source::JsonLayout;
use chrono::NaiveDate;
use polars::io::csv::read::CsvReadOptions;
use polars::prelude::*;
use pretty_assertions::assert_eq;
use std::path::PathBuf;

// ============================================================================
// Helper Functions
// ============================================================================

fn fixtures_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

fn load_csv(filename: &str) -> DataFrame {
    let path = fixtures_path().join(filename);
    CsvReadOptions::default()
        .with_has_header(true)
        .try_into_reader_with_file_path(Some(path))
        .expect("Failed to create CSV reader")
        .finish()
        .expect("Failed to read CSV file")
}

fn config() -> EvaluationConfig {
    EvaluationConfig::builder()
        .as_of(NaiveDate::from_ymd_opt(2024, 6, 1).unwrap())
        .build()
        .unwrap()
}

fn rule_count(evaluation: &catalog_quality::QualityEvaluation, id: &str) -> usize {
    evaluation
        .outcomes
        .iter()
        .find(|o| o.rule.id == id)
        .unwrap_or_else(|| panic!("rule {} not evaluated", id))
        .anomaly_count
}

// ============================================================================
// Clean Dataset
// ============================================================================

#[test]
fn test_clean_catalog_scores_100() {
    let table = CsvFileSource::new(fixtures_path().join("clean_catalog.csv"))
        .load()
        .unwrap();

    let evaluation = evaluate(&table, &config()).unwrap();
    let summary = &evaluation.summary;

    assert_eq!(summary.per_dimension.total(), 0);
    assert_eq!(summary.total_cells, 4 * 17);
    // artist_name is the only column without a column rule
    assert_eq!(summary.unanalyzed_cells, 4);
    assert_eq!(summary.good_cells, 64);
    assert_eq!(summary.overall_score, 100.0);
}

#[test]
fn test_clean_catalog_from_dataframe() {
    let table = Table::new(load_csv("clean_catalog.csv")).unwrap();
    let evaluation = evaluate(&table, &config()).unwrap();

    assert_eq!(evaluation.summary.per_dimension.completeness, 0);
    assert_eq!(evaluation.summary.per_dimension.uniqueness, 0);
}

// ============================================================================
// Dirty Dataset
// ============================================================================

#[test]
fn test_dirty_catalog_dimension_counts() {
    let table = source_for_path(fixtures_path().join("dirty_catalog.csv"))
        .load()
        .unwrap();

    let evaluation = evaluate(&table, &config()).unwrap();
    let scores = evaluation.summary.per_dimension;

    assert_eq!(scores.get(Dimension::Completeness), 1);
    assert_eq!(scores.get(Dimension::Uniqueness), 2);
    assert_eq!(scores.get(Dimension::Validity), 7);
    assert_eq!(scores.get(Dimension::Accuracy), 7);
    assert_eq!(scores.get(Dimension::Consistency), 0);
    assert_eq!(scores.get(Dimension::Timeliness), 0);
}

#[test]
fn test_dirty_catalog_rule_counts() {
    let table = source_for_path(fixtures_path().join("dirty_catalog.csv"))
        .load()
        .unwrap();
    let evaluation = evaluate(&table, &config()).unwrap();

    assert_eq!(rule_count(&evaluation, "validity.track_name.text_format"), 1);
    assert_eq!(rule_count(&evaluation, "validity.track_name.encoding_anomaly"), 1);
    assert_eq!(rule_count(&evaluation, "validity.explicit.boolean_domain"), 1);
    assert_eq!(rule_count(&evaluation, "validity.album_total_tracks.numeric_string"), 1);
    assert_eq!(
        rule_count(&evaluation, "validity.audio_features.instrumentalness.numeric_storage"),
        1
    );
    assert_eq!(
        rule_count(&evaluation, "validity.audio_features.instrumentalness.convertible"),
        1
    );
    assert_eq!(rule_count(&evaluation, "accuracy.album_release_date.range"), 2);
    assert_eq!(rule_count(&evaluation, "accuracy.audio_features.loudness.range"), 1);
    assert_eq!(rule_count(&evaluation, "accuracy.audio_features.key.range"), 0);
}

#[test]
fn test_dirty_catalog_partition_is_exact() {
    let table = source_for_path(fixtures_path().join("dirty_catalog.csv"))
        .load()
        .unwrap();
    let summary = evaluate(&table, &config()).unwrap().summary;

    assert_eq!(summary.total_cells, 102);
    assert_eq!(summary.total_anomalies, 17);
    assert_eq!(summary.unanalyzed_cells, 6);
    assert_eq!(summary.good_cells, 79);
    assert_eq!(
        summary.good_cells + summary.unanalyzed_cells + summary.total_anomalies,
        summary.total_cells
    );
    assert!((summary.overall_score - (1.0 - 17.0 / 102.0) * 100.0).abs() < 1e-9);
}

#[test]
fn test_dirty_catalog_examples_and_duplicate_rows() {
    let table = source_for_path(fixtures_path().join("dirty_catalog.csv"))
        .load()
        .unwrap();
    let evaluation = evaluate(&table, &config()).unwrap();

    let casing = evaluation
        .outcomes
        .iter()
        .find(|o| o.rule.id == "validity.track_name.text_format")
        .unwrap();
    assert_eq!(casing.examples(4), vec!["Fix You"]);

    let duplicates = evaluation
        .outcomes
        .iter()
        .find(|o| o.rule.id == "uniqueness.rows.duplicate_rows")
        .unwrap();
    assert_eq!(duplicates.matched_rows(), vec![0, 4]);
}

#[test]
fn test_as_of_moves_release_date_ceiling() {
    let table = source_for_path(fixtures_path().join("dirty_catalog.csv"))
        .load()
        .unwrap();
    let later = EvaluationConfig::builder()
        .as_of(NaiveDate::from_ymd_opt(2031, 1, 1).unwrap())
        .build()
        .unwrap();

    let evaluation = evaluate(&table, &later).unwrap();
    assert_eq!(rule_count(&evaluation, "accuracy.album_release_date.range"), 1);
}

#[test]
fn test_title_casing_policy() {
    let table = source_for_path(fixtures_path().join("dirty_catalog.csv"))
        .load()
        .unwrap();
    let title = EvaluationConfig::builder()
        .as_of(NaiveDate::from_ymd_opt(2024, 6, 1).unwrap())
        .casing_policy(CasingPolicy::Title)
        .build()
        .unwrap();

    let evaluation = evaluate(&table, &title).unwrap();
    // only "Fix You" is title cased
    assert_eq!(rule_count(&evaluation, "validity.track_name.text_format"), 5);
}

#[test]
fn test_evaluation_is_deterministic() {
    let table = source_for_path(fixtures_path().join("dirty_catalog.csv"))
        .load()
        .unwrap();

    let first = evaluate(&table, &config()).unwrap();
    let second = evaluate(&table, &config()).unwrap();
    assert_eq!(first.summary, second.summary);
}

#[test]
fn test_explicit_casing_is_flagged_from_csv() {
    let table = CsvFileSource::new(fixtures_path().join("explicit_casing.csv"))
        .load()
        .unwrap();
    let evaluation = evaluate(&table, &config()).unwrap();

    assert_eq!(rule_count(&evaluation, "validity.explicit.boolean_domain"), 2);
    let explicit = evaluation
        .outcomes
        .iter()
        .find(|o| o.rule.id == "validity.explicit.boolean_domain")
        .unwrap();
    assert_eq!(explicit.matched_rows(), vec![1, 2]);
    assert_eq!(explicit.examples(4), vec!["false", "TRUE"]);
}

// ============================================================================
// Nested JSON
// ============================================================================

#[test]
fn test_nested_json_is_flattened_and_clean() {
    let table = JsonFileSource::new(fixtures_path().join("nested_catalog.json"), JsonLayout::Array)
        .load()
        .unwrap();

    assert!(table.has_column("audio_features.energy"));
    assert!(!table.has_column("audio_features"));
    assert_eq!(table.column_count(), 17);

    let evaluation = evaluate(&table, &config()).unwrap();
    assert_eq!(evaluation.summary.total_anomalies, 0);
    assert_eq!(evaluation.summary.overall_score, 100.0);
}

// ============================================================================
// Overview and Report
// ============================================================================

#[test]
fn test_dirty_catalog_overview() {
    let table = source_for_path(fixtures_path().join("dirty_catalog.csv"))
        .load()
        .unwrap();
    let overview = DataProfiler::overview(&table).unwrap();

    assert_eq!(overview.variables, 17);
    assert_eq!(overview.observations, 6);
    assert_eq!(overview.missing_cells, 1);
    // the second copy of the first row
    assert_eq!(overview.duplicate_rows, 1);
}

#[test]
fn test_report_lists_every_rule() {
    let table = source_for_path(fixtures_path().join("dirty_catalog.csv"))
        .load()
        .unwrap();
    let config = config();
    let evaluation = evaluate(&table, &config).unwrap();
    let overview = DataProfiler::overview(&table).unwrap();

    let report = ReportGenerator::build_report(
        "dirty_catalog.csv",
        &evaluation,
        &overview,
        &config,
        "2024-06-01 00:00:00",
    );

    assert_eq!(report.rules.len(), evaluation.outcomes.len());
    assert_eq!(report.summary, evaluation.summary);

    let duplicates = report
        .rules
        .iter()
        .find(|r| r.check == "duplicate_rows")
        .unwrap();
    assert_eq!(duplicates.duplicate_rows, Some(vec![0, 4]));
}

// ============================================================================
// Error Cases
// ============================================================================

#[test]
fn test_missing_columns_fail_fast() {
    let df = df![
        "track_id" => ["a", "b"],
        "track_name" => ["x", "y"],
    ]
    .unwrap();
    let table = Table::new(df).unwrap();

    let err = evaluate(&table, &config()).unwrap_err();
    assert!(matches!(err, QualityError::UnknownColumn(_)));
}

#[test]
fn test_empty_dataset() {
    let df = load_csv("clean_catalog.csv").head(Some(0));
    let table = Table::new(df).unwrap();

    let err = evaluate(&table, &config()).unwrap_err();
    assert!(matches!(err, QualityError::EmptyDataset));
}

#[test]
fn test_missing_source_file() {
    let err = source_for_path(fixtures_path().join("does_not_exist.csv"))
        .load()
        .unwrap_err();

    assert!(err.is_source_failure());
    assert_eq!(err.error_code(), "SOURCE_UNAVAILABLE");
}

//! Quality evaluation.
//!
//! [`evaluate`] runs the catalog rule table against a [`Table`] and folds
//! the per-dimension anomaly counts into an [`AnalysisSummary`]. The pass is
//! pure: the same table and the same as-of date always give the same result.
//!
//! [`AnalysisSummary`]: crate::types::AnalysisSummary

mod aggregator;
mod evaluator;

pub use aggregator::{Aggregator, overall_score};
pub use evaluator::{DimensionEvaluation, QualityEvaluator};

use crate::config::EvaluationConfig;
use crate::error::{QualityError, Result};
use crate::rules::{RuleDescriptor, catalog_rules};
use crate::table::Table;
use crate::types::QualityEvaluation;
use chrono::NaiveDate;
use tracing::info;

/// Evaluate the catalog rule table against `table`.
///
/// Fails with [`QualityError::EmptyDataset`] when the table has no cells and
/// with [`QualityError::UnknownColumn`] when a rule references a column the
/// table lacks. No partial summary is produced on failure.
pub fn evaluate(table: &Table, config: &EvaluationConfig) -> Result<QualityEvaluation> {
    config
        .validate()
        .map_err(|e| QualityError::InvalidConfig(e.to_string()))?;

    let rules = catalog_rules(config);
    evaluate_with_rules(table, &rules, config.as_of)
}

/// Evaluate an arbitrary rule table against `table`.
pub fn evaluate_with_rules(
    table: &Table,
    rules: &[RuleDescriptor],
    as_of: NaiveDate,
) -> Result<QualityEvaluation> {
    if table.cell_count() == 0 {
        return Err(QualityError::EmptyDataset);
    }

    let evaluator = QualityEvaluator::new(table, rules, as_of);
    evaluator.check_columns()?;

    let (scores, outcomes) = evaluator.evaluate_all()?;
    let summary = Aggregator::summarize(table, scores, rules)?;

    info!(
        "Evaluated {} rules over {} cells: {} anomalies, score {:.2}",
        rules.len(),
        summary.total_cells,
        summary.total_anomalies,
        summary.overall_score
    );

    Ok(QualityEvaluation { summary, outcomes })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::{CheckKind, RuleTarget};
    use crate::types::Dimension;
    use polars::prelude::*;
    use pretty_assertions::assert_eq;

    fn as_of() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
    }

    fn small_table() -> Table {
        Table::new(
            df![
                "track_id" => [Some("a"), Some("b"), None, Some("b")],
                "track_name" => ["abc", "ABC", "AbC", "ABC"],
                "notes" => ["x", "y", "z", "y"],
            ]
            .unwrap(),
        )
        .unwrap()
    }

    fn small_rules() -> Vec<RuleDescriptor> {
        vec![
            RuleDescriptor::new(Dimension::Completeness, RuleTarget::AllColumns, CheckKind::Null),
            RuleDescriptor::new(
                Dimension::Uniqueness,
                RuleTarget::WholeTable,
                CheckKind::DuplicateRows,
            ),
            RuleDescriptor::column(
                Dimension::Validity,
                "track_name",
                CheckKind::TextFormat {
                    policy: crate::predicates::CasingPolicy::Lower,
                },
            ),
        ]
    }

    #[test]
    fn test_evaluate_with_rules() {
        let table = small_table();
        let evaluation = evaluate_with_rules(&table, &small_rules(), as_of()).unwrap();
        let summary = &evaluation.summary;

        assert_eq!(summary.per_dimension.completeness, 1);
        assert_eq!(summary.per_dimension.uniqueness, 2);
        assert_eq!(summary.per_dimension.validity, 3);
        assert_eq!(summary.total_anomalies, 6);
        assert_eq!(summary.total_cells, 12);
        // two unanalyzed columns (8 cells) squeezed into the 6 the anomalies leave
        assert_eq!(summary.unanalyzed_cells, 6);
        assert_eq!(summary.good_cells, 0);
        assert_eq!(evaluation.outcomes.len(), 3);
    }

    #[test]
    fn test_evaluation_is_deterministic() {
        let table = small_table();
        let rules = small_rules();

        let first = evaluate_with_rules(&table, &rules, as_of()).unwrap();
        let second = evaluate_with_rules(&table, &rules, as_of()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_empty_table_is_rejected_before_columns() {
        let table = Table::new(DataFrame::empty()).unwrap();
        let config = EvaluationConfig::as_of(as_of());

        let err = evaluate(&table, &config).unwrap_err();
        assert_eq!(err.error_code(), "EMPTY_DATASET");
    }

    #[test]
    fn test_missing_catalog_column() {
        let table = small_table();
        let config = EvaluationConfig::as_of(as_of());

        let err = evaluate(&table, &config).unwrap_err();
        assert_eq!(err.error_code(), "UNKNOWN_COLUMN");
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let table = small_table();
        let mut config = EvaluationConfig::as_of(as_of());
        config.example_limit = 0;

        let err = evaluate(&table, &config).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_CONFIG");
    }
}

use crate::config::EvaluationConfig;
use crate::rules::CheckKind;
use crate::types::{
    AnalysisSummary, DatasetOverview, Dimension, QualityEvaluation, RuleOutcome, RuleVerdict,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ============================================================================
// Report Types
// ============================================================================

/// Structured payload handed to report renderers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QualityReport {
    /// Timestamp when the report was generated
    pub generated_at: String,
    /// Path or name of the evaluated dataset
    pub input: String,
    /// Date the release-date rule was measured against
    pub as_of: NaiveDate,
    pub overview: DatasetOverview,
    pub summary: AnalysisSummary,
    /// One entry per evaluated rule, in dimension order
    pub rules: Vec<RuleReport>,
}

impl QualityReport {
    /// Rules that found at least one anomaly.
    pub fn failing_rules(&self) -> impl Iterator<Item = &RuleReport> {
        self.rules.iter().filter(|rule| rule.anomaly_count > 0)
    }
}

/// Diagnostic for a single rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleReport {
    pub id: String,
    pub dimension: Dimension,
    /// The inspected column, absent for table-wide rules
    #[serde(skip_serializing_if = "Option::is_none")]
    pub column: Option<String>,
    pub check: String,
    pub anomaly_count: usize,
    /// Distinct offending raw values, or the affected columns for the
    /// all-column null rule
    pub examples: Vec<String>,
    /// Row indices of duplicated rows
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duplicate_rows: Option<Vec<usize>>,
    /// One-line narrative of the finding
    pub message: String,
}

// ============================================================================
// Report Generator
// ============================================================================

/// Builds [`QualityReport`]s from evaluation results.
pub struct ReportGenerator;

impl ReportGenerator {
    /// Build a report from one evaluation pass.
    ///
    /// `generated_at` is supplied by the caller so that building a report
    /// never reads the clock.
    pub fn build_report(
        input: &str,
        evaluation: &QualityEvaluation,
        overview: &DatasetOverview,
        config: &EvaluationConfig,
        generated_at: impl Into<String>,
    ) -> QualityReport {
        let rules = evaluation
            .outcomes
            .iter()
            .map(|outcome| Self::rule_report(outcome, config.example_limit))
            .collect();

        QualityReport {
            generated_at: generated_at.into(),
            input: input.to_string(),
            as_of: config.as_of,
            overview: overview.clone(),
            summary: evaluation.summary.clone(),
            rules,
        }
    }

    fn rule_report(outcome: &RuleOutcome, example_limit: usize) -> RuleReport {
        let rule = &outcome.rule;
        let duplicate_rows = match rule.check {
            CheckKind::DuplicateRows => Some(outcome.matched_rows()),
            _ => None,
        };

        RuleReport {
            id: rule.id.clone(),
            dimension: rule.dimension,
            column: rule.target_column().map(str::to_string),
            check: rule.check.name().to_string(),
            anomaly_count: outcome.anomaly_count,
            examples: outcome.examples(example_limit),
            duplicate_rows,
            message: Self::describe(outcome, example_limit),
        }
    }

    fn describe(outcome: &RuleOutcome, example_limit: usize) -> String {
        let rule = &outcome.rule;
        let subject = rule
            .target_column()
            .map(|c| format!("'{}'", c))
            .unwrap_or_else(|| "the dataset".to_string());

        if outcome.anomaly_count == 0 {
            return format!("{}: no {} anomalies", subject, rule.check);
        }

        match &outcome.verdict {
            RuleVerdict::ColumnFlag { .. } => match rule.check {
                CheckKind::NumericStorage => format!("{} is not stored as a numeric type", subject),
                _ => format!("{} contains values that cannot be converted to numbers", subject),
            },
            RuleVerdict::PerColumn { columns } => format!(
                "{} missing values across {} columns",
                outcome.anomaly_count,
                columns.len()
            ),
            _ => {
                let examples = outcome.examples(example_limit);
                if examples.is_empty() {
                    format!("{} {} anomalies in {}", outcome.anomaly_count, rule.check, subject)
                } else {
                    format!(
                        "{} {} anomalies in {}, e.g. {}",
                        outcome.anomaly_count,
                        rule.check,
                        subject,
                        examples.join(", ")
                    )
                }
            }
        }
    }
}

use crate::rules::RuleDescriptor;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// Upper bound on how many distinct offending values a check keeps.
///
/// Reports only ever show a handful; the cap keeps memory flat on columns
/// where every value is an anomaly.
pub const MAX_TRACKED_VALUES: usize = 32;

// ============================================================================
// Dimensions
// ============================================================================

/// The six data-quality dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dimension {
    Completeness,
    Uniqueness,
    Validity,
    Accuracy,
    Consistency,
    Timeliness,
}

impl Dimension {
    /// All dimensions in reporting order.
    pub const ALL: [Dimension; 6] = [
        Dimension::Completeness,
        Dimension::Uniqueness,
        Dimension::Validity,
        Dimension::Accuracy,
        Dimension::Consistency,
        Dimension::Timeliness,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Dimension::Completeness => "completeness",
            Dimension::Uniqueness => "uniqueness",
            Dimension::Validity => "validity",
            Dimension::Accuracy => "accuracy",
            Dimension::Consistency => "consistency",
            Dimension::Timeliness => "timeliness",
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One anomaly count per dimension.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DimensionScores {
    pub completeness: usize,
    pub uniqueness: usize,
    pub validity: usize,
    pub accuracy: usize,
    pub consistency: usize,
    pub timeliness: usize,
}

impl DimensionScores {
    pub fn get(&self, dimension: Dimension) -> usize {
        match dimension {
            Dimension::Completeness => self.completeness,
            Dimension::Uniqueness => self.uniqueness,
            Dimension::Validity => self.validity,
            Dimension::Accuracy => self.accuracy,
            Dimension::Consistency => self.consistency,
            Dimension::Timeliness => self.timeliness,
        }
    }

    pub fn set(&mut self, dimension: Dimension, count: usize) {
        let slot = match dimension {
            Dimension::Completeness => &mut self.completeness,
            Dimension::Uniqueness => &mut self.uniqueness,
            Dimension::Validity => &mut self.validity,
            Dimension::Accuracy => &mut self.accuracy,
            Dimension::Consistency => &mut self.consistency,
            Dimension::Timeliness => &mut self.timeliness,
        };
        *slot = count;
    }

    /// Sum over all six dimensions.
    pub fn total(&self) -> usize {
        Dimension::ALL.iter().map(|d| self.get(*d)).sum()
    }

    /// `(dimension, count)` pairs in reporting order.
    pub fn iter(&self) -> impl Iterator<Item = (Dimension, usize)> + '_ {
        Dimension::ALL.iter().map(move |d| (*d, self.get(*d)))
    }
}

// ============================================================================
// Predicate Results
// ============================================================================

/// The result of a cell-level predicate that matched at least one row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckResult {
    /// Number of matched rows; always equal to the popcount of `mask`.
    pub matched_count: usize,
    /// Distinct offending raw values in first-seen order, capped at
    /// [`MAX_TRACKED_VALUES`].
    pub matched_values: Vec<String>,
    /// One flag per table row, true where the predicate matched.
    #[serde(skip)]
    pub mask: Vec<bool>,
}

impl CheckResult {
    /// Row indices where the predicate matched.
    pub fn matched_rows(&self) -> Vec<usize> {
        self.mask
            .iter()
            .enumerate()
            .filter_map(|(row, matched)| matched.then_some(row))
            .collect()
    }

    /// Up to `limit` distinct offending values for narrative display.
    pub fn examples(&self, limit: usize) -> &[String] {
        &self.matched_values[..self.matched_values.len().min(limit)]
    }
}

/// What a cell-level predicate found.
///
/// `Clean` is the explicit "no anomaly" sentinel; a failed evaluation is an
/// `Err` at the call site, never a `Clean`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CheckOutcome {
    Clean,
    Anomalies(CheckResult),
}

impl CheckOutcome {
    pub fn matched_count(&self) -> usize {
        match self {
            CheckOutcome::Clean => 0,
            CheckOutcome::Anomalies(result) => result.matched_count,
        }
    }

    pub fn is_clean(&self) -> bool {
        matches!(self, CheckOutcome::Clean)
    }

    pub fn anomalies(&self) -> Option<&CheckResult> {
        match self {
            CheckOutcome::Clean => None,
            CheckOutcome::Anomalies(result) => Some(result),
        }
    }
}

/// Accumulates a row mask and the distinct offending values behind it.
#[derive(Debug)]
pub(crate) struct MatchCollector {
    mask: Vec<bool>,
    matched_count: usize,
    values: Vec<String>,
    seen: HashSet<String>,
}

impl MatchCollector {
    pub(crate) fn with_rows(rows: usize) -> Self {
        Self {
            mask: Vec::with_capacity(rows),
            matched_count: 0,
            values: Vec::new(),
            seen: HashSet::new(),
        }
    }

    /// Record the next row as not matched.
    pub(crate) fn pass(&mut self) {
        self.mask.push(false);
    }

    /// Record the next row as matched, keeping its raw value as an example.
    pub(crate) fn flag(&mut self, raw: &str) {
        self.mask.push(true);
        self.matched_count += 1;
        if self.values.len() < MAX_TRACKED_VALUES && self.seen.insert(raw.to_string()) {
            self.values.push(raw.to_string());
        }
    }

    pub(crate) fn finish(self) -> CheckOutcome {
        if self.matched_count == 0 {
            return CheckOutcome::Clean;
        }
        CheckOutcome::Anomalies(CheckResult {
            matched_count: self.matched_count,
            matched_values: self.values,
            mask: self.mask,
        })
    }
}

// ============================================================================
// Rule Outcomes
// ============================================================================

/// Null count of a single column, as reported by the completeness rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnCount {
    pub column: String,
    pub count: usize,
}

/// What evaluating one rule produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RuleVerdict {
    /// A cell-level check over one column or the whole table.
    Cells { outcome: CheckOutcome },
    /// A check applied to every column; only columns with matches are listed.
    PerColumn { columns: Vec<ColumnCount> },
    /// A column-level check; an anomaly when `passed` is false.
    ColumnFlag { passed: bool },
    /// A dimension with no checks in this domain.
    Fixed,
}

/// Per-rule diagnostic handed to the reporting layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleOutcome {
    pub rule: RuleDescriptor,
    pub anomaly_count: usize,
    pub verdict: RuleVerdict,
}

impl RuleOutcome {
    /// Offending values worth showing, empty for column-level verdicts.
    pub fn examples(&self, limit: usize) -> Vec<String> {
        match &self.verdict {
            RuleVerdict::Cells {
                outcome: CheckOutcome::Anomalies(result),
            } => result.examples(limit).to_vec(),
            RuleVerdict::PerColumn { columns } => columns
                .iter()
                .take(limit)
                .map(|c| c.column.clone())
                .collect(),
            _ => Vec::new(),
        }
    }

    /// Matched row indices for cell-level verdicts.
    pub fn matched_rows(&self) -> Vec<usize> {
        match &self.verdict {
            RuleVerdict::Cells {
                outcome: CheckOutcome::Anomalies(result),
            } => result.matched_rows(),
            _ => Vec::new(),
        }
    }
}

// ============================================================================
// Summary
// ============================================================================

/// Aggregate result of one evaluation pass.
///
/// `good_cells + unanalyzed_cells + total_anomalies == total_cells` always
/// holds. `dimension_total` is the uncapped sum of the six dimensions; it
/// exceeds `total_anomalies` only when that sum was clamped to the cell count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisSummary {
    pub per_dimension: DimensionScores,
    pub dimension_total: usize,
    pub total_anomalies: usize,
    pub total_cells: usize,
    pub good_cells: usize,
    pub unanalyzed_cells: usize,
    /// 0 to 100, higher is better.
    pub overall_score: f64,
}

/// Everything one evaluation pass produces.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QualityEvaluation {
    pub summary: AnalysisSummary,
    pub outcomes: Vec<RuleOutcome>,
}

// ============================================================================
// Dataset Overview
// ============================================================================

/// Shape, missingness and variable types of a dataset, reported alongside
/// the quality summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetOverview {
    /// Number of columns.
    pub variables: usize,
    /// Number of rows.
    pub observations: usize,
    pub total_cells: usize,
    pub missing_cells: usize,
    pub missing_percentage: f64,
    /// Rows identical to an earlier row; the first occurrence is not counted.
    pub duplicate_rows: usize,
    pub duplicate_percentage: f64,
    pub variable_types: VariableTypeCounts,
}

/// How many columns fall into each reported variable type.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariableTypeCounts {
    pub numeric: usize,
    pub text: usize,
    pub date_time: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dimension_scores_total() {
        let mut scores = DimensionScores::default();
        scores.set(Dimension::Completeness, 3);
        scores.set(Dimension::Accuracy, 4);
        assert_eq!(scores.total(), 7);
        assert_eq!(scores.get(Dimension::Consistency), 0);
        assert_eq!(scores.iter().count(), 6);
    }

    #[test]
    fn test_collector_count_matches_mask() {
        let mut collector = MatchCollector::with_rows(4);
        collector.flag("ABC");
        collector.pass();
        collector.flag("ABC");
        collector.flag("AbC");

        let outcome = collector.finish();
        let result = outcome.anomalies().unwrap();
        assert_eq!(result.matched_count, 3);
        assert_eq!(result.mask.iter().filter(|m| **m).count(), 3);
        assert_eq!(result.matched_values, vec!["ABC", "AbC"]);
        assert_eq!(result.matched_rows(), vec![0, 2, 3]);
        assert_eq!(result.examples(1), &["ABC".to_string()]);
    }

    #[test]
    fn test_collector_without_matches_is_clean() {
        let mut collector = MatchCollector::with_rows(2);
        collector.pass();
        collector.pass();
        let outcome = collector.finish();
        assert!(outcome.is_clean());
        assert_eq!(outcome.matched_count(), 0);
    }

    #[test]
    fn test_collector_caps_tracked_values() {
        let mut collector = MatchCollector::with_rows(100);
        for i in 0..100 {
            collector.flag(&i.to_string());
        }
        let outcome = collector.finish();
        let result = outcome.anomalies().unwrap();
        assert_eq!(result.matched_count, 100);
        assert_eq!(result.matched_values.len(), MAX_TRACKED_VALUES);
    }
}

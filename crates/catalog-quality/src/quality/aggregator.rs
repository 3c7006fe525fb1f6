use crate::error::{QualityError, Result};
use crate::rules::RuleDescriptor;
use crate::table::Table;
use crate::types::{AnalysisSummary, DimensionScores};
use std::collections::HashSet;
use tracing::warn;

/// Combines dimension counts into the cell partition and the overall score.
pub struct Aggregator;

impl Aggregator {
    /// Build the summary for one evaluation pass.
    ///
    /// A column counts as analyzed when at least one rule targets it by
    /// name; table-wide rules (nulls over all columns, duplicate rows) do not
    /// make a column analyzed.
    pub fn summarize(
        table: &Table,
        scores: DimensionScores,
        rules: &[RuleDescriptor],
    ) -> Result<AnalysisSummary> {
        let analyzed: HashSet<&str> = rules
            .iter()
            .filter_map(|rule| rule.target_column())
            .filter(|column| table.has_column(column))
            .collect();
        let unanalyzed_columns = table.column_count() - analyzed.len();

        Self::partition(
            table.row_count(),
            table.column_count(),
            unanalyzed_columns,
            scores,
        )
    }

    /// Partition `rows × columns` cells into good, unanalyzed and anomalous.
    ///
    /// The anomaly total is capped at the cell count, and the unanalyzed
    /// share shrinks to whatever the anomalies leave, so the three parts
    /// always sum to the cell count exactly. The uncapped sum is kept as
    /// `dimension_total`.
    pub fn partition(
        rows: usize,
        columns: usize,
        unanalyzed_columns: usize,
        scores: DimensionScores,
    ) -> Result<AnalysisSummary> {
        let total_cells = rows * columns;
        if total_cells == 0 {
            return Err(QualityError::EmptyDataset);
        }

        let dimension_total = scores.total();
        if dimension_total > total_cells {
            warn!(
                "Dimension counts sum to {} but the table has {} cells; capping anomalies",
                dimension_total, total_cells
            );
        }
        let total_anomalies = dimension_total.min(total_cells);
        let unanalyzed_cells = (unanalyzed_columns * rows).min(total_cells - total_anomalies);
        let good_cells = total_cells - unanalyzed_cells - total_anomalies;

        Ok(AnalysisSummary {
            per_dimension: scores,
            dimension_total,
            total_anomalies,
            total_cells,
            good_cells,
            unanalyzed_cells,
            overall_score: overall_score(total_anomalies, total_cells),
        })
    }
}

/// `(1 - anomalies / cells) × 100`.
pub fn overall_score(total_anomalies: usize, total_cells: usize) -> f64 {
    (1.0 - total_anomalies as f64 / total_cells as f64) * 100.0
}

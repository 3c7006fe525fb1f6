use crate::error::{QualityError, Result, ResultExt};
use crate::predicates::{
    all_convertible, boolean_domain, duplicate_rows, encoding_anomaly, is_numeric_column,
    null_cells, null_check, numeric_string, range_check, text_format,
};
use crate::rules::{CheckKind, RuleDescriptor, RuleTarget};
use crate::table::Table;
use crate::types::{CheckOutcome, Dimension, DimensionScores, RuleOutcome, RuleVerdict};
use chrono::NaiveDate;
use tracing::debug;

/// The outcome of every rule belonging to one dimension.
#[derive(Debug, Clone)]
pub struct DimensionEvaluation {
    pub dimension: Dimension,
    pub anomaly_count: usize,
    pub outcomes: Vec<RuleOutcome>,
}

/// Evaluates a rule table against one table snapshot.
///
/// The evaluator borrows everything it reads and keeps no state between
/// calls; evaluating twice with the same as-of date gives identical results.
pub struct QualityEvaluator<'a> {
    table: &'a Table,
    rules: &'a [RuleDescriptor],
    as_of: NaiveDate,
}

impl<'a> QualityEvaluator<'a> {
    pub fn new(table: &'a Table, rules: &'a [RuleDescriptor], as_of: NaiveDate) -> Self {
        Self {
            table,
            rules,
            as_of,
        }
    }

    /// Fail fast if any rule names a column the table does not have.
    pub fn check_columns(&self) -> Result<()> {
        for rule in self.rules {
            if let Some(column) = rule.target_column()
                && !self.table.has_column(column)
            {
                return Err(QualityError::UnknownColumn(column.to_string()));
            }
        }
        Ok(())
    }

    /// Total null cells across all columns.
    pub fn completeness(&self) -> Result<usize> {
        Ok(self.evaluate_dimension(Dimension::Completeness)?.anomaly_count)
    }

    /// Rows that are part of a group of identical rows.
    pub fn uniqueness(&self) -> Result<usize> {
        Ok(self.evaluate_dimension(Dimension::Uniqueness)?.anomaly_count)
    }

    /// Format, domain and type anomalies.
    pub fn validity(&self) -> Result<usize> {
        Ok(self.evaluate_dimension(Dimension::Validity)?.anomaly_count)
    }

    /// Values outside their plausible ranges.
    pub fn accuracy(&self) -> Result<usize> {
        Ok(self.evaluate_dimension(Dimension::Accuracy)?.anomaly_count)
    }

    /// No consistency checks exist for catalogs; always zero.
    pub fn consistency(&self) -> Result<usize> {
        Ok(self.evaluate_dimension(Dimension::Consistency)?.anomaly_count)
    }

    /// No timeliness checks exist for catalogs; always zero.
    pub fn timeliness(&self) -> Result<usize> {
        Ok(self.evaluate_dimension(Dimension::Timeliness)?.anomaly_count)
    }

    /// Evaluate every rule of one dimension and sum their anomaly counts.
    pub fn evaluate_dimension(&self, dimension: Dimension) -> Result<DimensionEvaluation> {
        let outcomes = self
            .rules
            .iter()
            .filter(|rule| rule.dimension == dimension)
            .map(|rule| self.evaluate_rule(rule))
            .collect::<Result<Vec<_>>>()?;
        let anomaly_count = outcomes.iter().map(|o| o.anomaly_count).sum();

        debug!("{} anomalies: {}", dimension, anomaly_count);

        Ok(DimensionEvaluation {
            dimension,
            anomaly_count,
            outcomes,
        })
    }

    /// Evaluate all six dimensions.
    pub fn evaluate_all(&self) -> Result<(DimensionScores, Vec<RuleOutcome>)> {
        let mut scores = DimensionScores::default();
        let mut outcomes = Vec::with_capacity(self.rules.len());

        for dimension in Dimension::ALL {
            let evaluation = self.evaluate_dimension(dimension)?;
            scores.set(dimension, evaluation.anomaly_count);
            outcomes.extend(evaluation.outcomes);
        }

        Ok((scores, outcomes))
    }

    /// Evaluate a single rule.
    pub fn evaluate_rule(&self, rule: &RuleDescriptor) -> Result<RuleOutcome> {
        let verdict = self
            .verdict(rule)
            .context(format!("Evaluating rule '{}'", rule.id))?;

        let anomaly_count = match &verdict {
            RuleVerdict::Cells { outcome } => outcome.matched_count(),
            RuleVerdict::PerColumn { columns } => columns.iter().map(|c| c.count).sum(),
            RuleVerdict::ColumnFlag { passed } => {
                if *passed {
                    0
                } else {
                    1
                }
            }
            RuleVerdict::Fixed => 0,
        };

        debug!("Rule {} -> {} anomalies", rule.id, anomaly_count);

        Ok(RuleOutcome {
            rule: rule.clone(),
            anomaly_count,
            verdict,
        })
    }

    fn verdict(&self, rule: &RuleDescriptor) -> Result<RuleVerdict> {
        let table = self.table;

        let column = match (&rule.check, &rule.target) {
            (CheckKind::FixedZero, _) => return Ok(RuleVerdict::Fixed),
            (CheckKind::Null, RuleTarget::AllColumns) => {
                return Ok(RuleVerdict::PerColumn {
                    columns: null_cells(table)?,
                });
            }
            (CheckKind::DuplicateRows, RuleTarget::WholeTable) => {
                return Ok(cells(duplicate_rows(table)?));
            }
            (CheckKind::DuplicateRows, _) => return Err(invalid_target(rule)),
            (_, RuleTarget::Column(column)) => column.as_str(),
            _ => return Err(invalid_target(rule)),
        };

        let verdict = match &rule.check {
            CheckKind::Null => cells(null_check(table, column)?),
            CheckKind::TextFormat { policy } => cells(text_format(table, column, *policy)?),
            CheckKind::EncodingAnomaly => cells(encoding_anomaly(table, column)?),
            CheckKind::BooleanDomain {
                true_token,
                false_token,
            } => cells(boolean_domain(table, column, true_token, false_token)?),
            CheckKind::NumericString => cells(numeric_string(table, column)?),
            CheckKind::NumericStorage => RuleVerdict::ColumnFlag {
                passed: is_numeric_column(table, column)?,
            },
            CheckKind::Convertible => RuleVerdict::ColumnFlag {
                passed: all_convertible(table, column)?,
            },
            CheckKind::Range { bounds } => {
                cells(range_check(table, column, bounds.resolve(self.as_of))?)
            }
            CheckKind::DuplicateRows | CheckKind::FixedZero => return Err(invalid_target(rule)),
        };

        Ok(verdict)
    }
}

fn cells(outcome: CheckOutcome) -> RuleVerdict {
    RuleVerdict::Cells { outcome }
}

fn invalid_target(rule: &RuleDescriptor) -> QualityError {
    QualityError::InvalidConfig(format!(
        "rule '{}': check '{}' cannot target {:?}",
        rule.id, rule.check, rule.target
    ))
}

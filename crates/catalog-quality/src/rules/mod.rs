//! Declarative rule descriptors.
//!
//! A rule says which check runs against which target on behalf of which
//! dimension. The evaluator interprets these descriptors; nothing here touches
//! a table. The rule set for music catalogs lives in [`catalog_rules`].

mod catalog;

pub use catalog::{RELEASE_DATE_FLOOR, catalog_rules};

use crate::predicates::{CasingPolicy, RangeBounds};
use crate::types::Dimension;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// What a rule is applied to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleTarget {
    /// The check runs once per column and the counts are summed.
    AllColumns,
    /// The check compares whole rows.
    WholeTable,
    /// The check runs against one named column.
    Column(String),
    /// No data is inspected.
    Nothing,
}

/// Upper bound of a date range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DateCeiling {
    /// The evaluation's as-of date, supplied at evaluation time.
    AsOf,
    Fixed(NaiveDate),
}

/// Range parameters as written in a rule, before the as-of date is known.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RangeSpec {
    Numeric { min: f64, max: f64 },
    Date { min: NaiveDate, max: DateCeiling },
}

impl RangeSpec {
    /// Concrete bounds for an evaluation pinned to `as_of`.
    pub fn resolve(&self, as_of: NaiveDate) -> RangeBounds {
        match *self {
            RangeSpec::Numeric { min, max } => RangeBounds::Numeric { min, max },
            RangeSpec::Date { min, max } => RangeBounds::Date {
                min,
                max: match max {
                    DateCeiling::AsOf => as_of,
                    DateCeiling::Fixed(date) => date,
                },
            },
        }
    }
}

/// The check a rule runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "check", rename_all = "snake_case")]
pub enum CheckKind {
    Null,
    DuplicateRows,
    TextFormat {
        policy: CasingPolicy,
    },
    EncodingAnomaly,
    BooleanDomain {
        true_token: String,
        false_token: String,
    },
    NumericString,
    /// Column-level: one anomaly when the column is not stored as a number.
    NumericStorage,
    /// Column-level: one anomaly when any value fails to convert to a float.
    Convertible,
    Range {
        bounds: RangeSpec,
    },
    /// Placeholder for dimensions without checks; always zero.
    FixedZero,
}

impl CheckKind {
    /// Short identifier used in rule ids and reports.
    pub fn name(&self) -> &'static str {
        match self {
            CheckKind::Null => "null",
            CheckKind::DuplicateRows => "duplicate_rows",
            CheckKind::TextFormat { .. } => "text_format",
            CheckKind::EncodingAnomaly => "encoding_anomaly",
            CheckKind::BooleanDomain { .. } => "boolean_domain",
            CheckKind::NumericString => "numeric_string",
            CheckKind::NumericStorage => "numeric_storage",
            CheckKind::Convertible => "convertible",
            CheckKind::Range { .. } => "range",
            CheckKind::FixedZero => "fixed_zero",
        }
    }
}

impl fmt::Display for CheckKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One row of the rule table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleDescriptor {
    /// Stable identifier, `<dimension>.<target>.<check>`.
    pub id: String,
    pub dimension: Dimension,
    pub target: RuleTarget,
    pub check: CheckKind,
}

impl RuleDescriptor {
    pub fn new(dimension: Dimension, target: RuleTarget, check: CheckKind) -> Self {
        let target_label = match &target {
            RuleTarget::AllColumns => "*",
            RuleTarget::WholeTable => "rows",
            RuleTarget::Column(name) => name.as_str(),
            RuleTarget::Nothing => "-",
        };
        let id = format!("{}.{}.{}", dimension, target_label, check.name());
        Self {
            id,
            dimension,
            target,
            check,
        }
    }

    /// Shorthand for a rule on a single named column.
    pub fn column(dimension: Dimension, column: &str, check: CheckKind) -> Self {
        Self::new(dimension, RuleTarget::Column(column.to_string()), check)
    }

    /// The named column this rule inspects, if it targets exactly one.
    pub fn target_column(&self) -> Option<&str> {
        match &self.target {
            RuleTarget::Column(name) => Some(name),
            _ => None,
        }
    }
}

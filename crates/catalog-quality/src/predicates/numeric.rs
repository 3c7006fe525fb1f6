use crate::error::Result;
use crate::table::Table;
use crate::types::{CheckOutcome, MatchCollector};
use crate::utils::{float_cells, is_numeric_dtype, parse_float, parse_release_date, text_cells};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Inclusive bounds for [`range_check`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RangeBounds {
    Numeric { min: f64, max: f64 },
    Date { min: NaiveDate, max: NaiveDate },
}

impl RangeBounds {
    pub fn numeric(min: f64, max: f64) -> Self {
        RangeBounds::Numeric { min, max }
    }
}

/// Whether the column's declared storage type is an integer or float type.
pub fn is_numeric_column(table: &Table, column: &str) -> Result<bool> {
    Ok(is_numeric_dtype(table.series(column)?.dtype()))
}

/// Flag non-null values that cannot be parsed as a floating point number.
///
/// Works on the text form of each cell, so it applies regardless of the
/// declared storage type; numeric columns never match.
pub fn convertibility(table: &Table, column: &str) -> Result<CheckOutcome> {
    let series = table.series(column)?;
    let mut collector = MatchCollector::with_rows(series.len());
    if is_numeric_dtype(series.dtype()) {
        (0..series.len()).for_each(|_| collector.pass());
        return Ok(collector.finish());
    }

    for value in text_cells(series)? {
        match value {
            Some(v) if parse_float(&v).is_none() => collector.flag(&v),
            _ => collector.pass(),
        }
    }
    Ok(collector.finish())
}

/// Whether every non-null value of the column converts to a float.
pub fn all_convertible(table: &Table, column: &str) -> Result<bool> {
    Ok(convertibility(table, column)?.is_clean())
}

/// Flag values strictly outside the inclusive bounds.
///
/// Numeric bounds read numeric columns directly and parse text columns;
/// date bounds parse release dates of day, month or year precision. Nulls,
/// NaN and values that do not parse are not range anomalies.
pub fn range_check(table: &Table, column: &str, bounds: RangeBounds) -> Result<CheckOutcome> {
    let series = table.series(column)?;
    let mut collector = MatchCollector::with_rows(series.len());

    match bounds {
        RangeBounds::Numeric { min, max } if is_numeric_dtype(series.dtype()) => {
            for value in float_cells(series)? {
                match value {
                    Some(v) if v < min || v > max => collector.flag(&v.to_string()),
                    _ => collector.pass(),
                }
            }
        }
        RangeBounds::Numeric { min, max } => {
            for value in text_cells(series)? {
                let parsed = value.as_deref().and_then(parse_float);
                match (value, parsed) {
                    (Some(raw), Some(v)) if v < min || v > max => collector.flag(&raw),
                    _ => collector.pass(),
                }
            }
        }
        RangeBounds::Date { min, max } => {
            for value in text_cells(series)? {
                let parsed = value.as_deref().and_then(parse_release_date);
                match (value, parsed) {
                    (Some(raw), Some(d)) if d < min || d > max => collector.flag(&raw),
                    _ => collector.pass(),
                }
            }
        }
    }

    Ok(collector.finish())
}

//! Shared utilities for the quality engine.
//!
//! This module contains dtype classification and string parsing helpers used
//! by both the predicate library and the dataset overview.

use chrono::NaiveDate;
use polars::prelude::*;

// =============================================================================
// Data Type Utilities
// =============================================================================

/// Category of a data type as reported in the dataset overview.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DtypeCategory {
    /// Integer or floating point numbers
    Numeric,
    /// Date or datetime types
    Datetime,
    /// Boolean type
    Boolean,
    /// String/text type
    String,
    /// Other/unknown types
    Other,
}

/// Check if a DataType is numeric (integer or float).
#[inline]
pub fn is_numeric_dtype(dtype: &DataType) -> bool {
    matches!(
        dtype,
        DataType::Int8
            | DataType::Int16
            | DataType::Int32
            | DataType::Int64
            | DataType::UInt8
            | DataType::UInt16
            | DataType::UInt32
            | DataType::UInt64
            | DataType::Float32
            | DataType::Float64
    )
}

/// Check if a DataType is a floating point type.
#[inline]
pub fn is_float_dtype(dtype: &DataType) -> bool {
    matches!(dtype, DataType::Float32 | DataType::Float64)
}

/// Check if a DataType is a datetime type.
#[inline]
pub fn is_datetime_dtype(dtype: &DataType) -> bool {
    matches!(
        dtype,
        DataType::Datetime(_, _) | DataType::Date | DataType::Time
    )
}

/// Get the category of a DataType.
pub fn get_dtype_category(dtype: &DataType) -> DtypeCategory {
    if is_numeric_dtype(dtype) {
        DtypeCategory::Numeric
    } else if is_datetime_dtype(dtype) {
        DtypeCategory::Datetime
    } else if matches!(dtype, DataType::Boolean) {
        DtypeCategory::Boolean
    } else if matches!(dtype, DataType::String | DataType::Categorical(_, _)) {
        DtypeCategory::String
    } else {
        DtypeCategory::Other
    }
}

// =============================================================================
// Cell Access Utilities
// =============================================================================

/// Render every cell of a Series as text, keeping nulls as `None`.
///
/// Numeric, boolean and temporal columns go through a polars cast; anything
/// the cast cannot handle falls back to the `AnyValue` display form.
pub fn text_cells(series: &Series) -> PolarsResult<Vec<Option<String>>> {
    if let Ok(cast) = series.cast(&DataType::String) {
        return Ok(cast
            .str()?
            .into_iter()
            .map(|v| v.map(str::to_string))
            .collect());
    }

    (0..series.len())
        .map(|i| {
            series.get(i).map(|value| {
                if value.is_null() {
                    None
                } else {
                    Some(format!("{}", value))
                }
            })
        })
        .collect()
}

/// Read a numeric Series as `f64` cells, keeping nulls as `None`.
pub fn float_cells(series: &Series) -> PolarsResult<Vec<Option<f64>>> {
    let cast = series.cast(&DataType::Float64)?;
    Ok(cast.f64()?.into_iter().collect())
}

// =============================================================================
// String Parsing Utilities
// =============================================================================

/// Try to parse a string as a floating point number.
///
/// Surrounding whitespace is ignored; an empty string never parses.
pub fn parse_float(s: &str) -> Option<f64> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok()
}

/// Check if a string is non-empty and made only of ASCII digits.
pub fn is_digit_string(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

/// Check if a text cell should be treated as missing.
#[inline]
pub fn is_blank(s: &str) -> bool {
    s.trim().is_empty()
}

/// Parse a catalog release date.
///
/// Release dates come with day, month or year precision (`2014-10-27`,
/// `2014-10`, `2014`); coarser values resolve to the first day of the period.
/// Datetime renderings (`2014-10-27 00:00:00`, `2014-10-27T00:00:00`) are cut
/// at the date part.
pub fn parse_release_date(s: &str) -> Option<NaiveDate> {
    let trimmed = s.trim();
    let date_part = trimmed
        .split(['T', ' '])
        .next()
        .unwrap_or(trimmed);

    if let Ok(date) = NaiveDate::parse_from_str(date_part, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(date) = NaiveDate::parse_from_str(&format!("{}-01", date_part), "%Y-%m-%d") {
        return Some(date);
    }
    if date_part.len() == 4 && is_digit_string(date_part) {
        let year = date_part.parse::<i32>().ok()?;
        return NaiveDate::from_ymd_opt(year, 1, 1);
    }
    None
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_numeric_dtype() {
        assert!(is_numeric_dtype(&DataType::Int64));
        assert!(is_numeric_dtype(&DataType::Float64));
        assert!(!is_numeric_dtype(&DataType::String));
        assert!(!is_numeric_dtype(&DataType::Boolean));
        assert!(!is_numeric_dtype(&DataType::Date));
    }

    #[test]
    fn test_dtype_category() {
        assert_eq!(get_dtype_category(&DataType::Int64), DtypeCategory::Numeric);
        assert_eq!(get_dtype_category(&DataType::Date), DtypeCategory::Datetime);
        assert_eq!(
            get_dtype_category(&DataType::Boolean),
            DtypeCategory::Boolean
        );
        assert_eq!(get_dtype_category(&DataType::String), DtypeCategory::String);
    }

    #[test]
    fn test_parse_float() {
        assert_eq!(parse_float("1.5"), Some(1.5));
        assert_eq!(parse_float(" 3 "), Some(3.0));
        assert_eq!(parse_float("-60"), Some(-60.0));
        assert_eq!(parse_float("1e3"), Some(1000.0));
        assert_eq!(parse_float(""), None);
        assert_eq!(parse_float("abc"), None);
    }

    #[test]
    fn test_is_digit_string() {
        assert!(is_digit_string("12"));
        assert!(!is_digit_string("12.0"));
        assert!(!is_digit_string("-1"));
        assert!(!is_digit_string("twelve"));
        assert!(!is_digit_string(""));
    }

    #[test]
    fn test_parse_release_date_precisions() {
        let day = NaiveDate::from_ymd_opt(2014, 10, 27).unwrap();
        assert_eq!(parse_release_date("2014-10-27"), Some(day));
        assert_eq!(parse_release_date("2014-10-27 00:00:00"), Some(day));
        assert_eq!(parse_release_date("2014-10-27T12:30:00"), Some(day));
        assert_eq!(
            parse_release_date("2014-10"),
            NaiveDate::from_ymd_opt(2014, 10, 1)
        );
        assert_eq!(
            parse_release_date("2014"),
            NaiveDate::from_ymd_opt(2014, 1, 1)
        );
        assert_eq!(parse_release_date("soon"), None);
    }

    #[test]
    fn test_text_cells_keeps_nulls() {
        let series = Series::new("v".into(), &[Some(1i64), None, Some(3)]);
        let cells = text_cells(&series).unwrap();
        assert_eq!(cells, vec![Some("1".to_string()), None, Some("3".to_string())]);
    }
}

//! Dataset overview profiling.
//!
//! This module computes the descriptive "overview" that accompanies a quality
//! report:
//! - Shape (variables, observations, cells)
//! - Missing cells, counted the same way the completeness rule counts them
//! - Duplicate rows, first occurrence kept
//! - Variable types (numeric, text, date-time)

use crate::error::Result;
use crate::predicates::null_cells;
use crate::table::Table;
use crate::types::{DatasetOverview, VariableTypeCounts};
use crate::utils::{DtypeCategory, get_dtype_category, text_cells};
use once_cell::sync::Lazy;
use polars::prelude::*;
use regex::Regex;
use tracing::debug;

/// Text renderings recognized as dates when classifying string columns.
static DATE_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    vec![
        Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("Invalid regex: YYYY-MM-DD"),
        Regex::new(r"^\d{4}-\d{2}$").expect("Invalid regex: YYYY-MM"),
        Regex::new(r"^\d{4}/\d{1,2}/\d{1,2}$").expect("Invalid regex: YYYY/MM/DD"),
        Regex::new(r"^\d{4}-\d{2}-\d{2}[ T]\d{2}:\d{2}:\d{2}").expect("Invalid regex: datetime"),
    ]
});

/// Data profiler for the dataset overview.
pub struct DataProfiler;

impl DataProfiler {
    /// Build the overview of a table.
    pub fn overview(table: &Table) -> Result<DatasetOverview> {
        let df = table.frame();
        let observations = table.row_count();
        let total_cells = table.cell_count();

        let missing_cells: usize = null_cells(table)?.iter().map(|c| c.count).sum();

        let duplicate_rows = if df.width() == 0 {
            0
        } else {
            df.height()
                - df.unique::<&str, &str>(None, UniqueKeepStrategy::First, None)?
                    .height()
        };

        let mut variable_types = VariableTypeCounts::default();
        for series in table.all_series() {
            match Self::classify(series)? {
                DtypeCategory::Numeric => variable_types.numeric += 1,
                DtypeCategory::Datetime => variable_types.date_time += 1,
                _ => variable_types.text += 1,
            }
        }

        debug!(
            "Overview: {} rows, {} missing cells, {} duplicate rows",
            observations, missing_cells, duplicate_rows
        );

        Ok(DatasetOverview {
            variables: table.column_count(),
            observations,
            total_cells,
            missing_cells,
            missing_percentage: percentage(missing_cells, total_cells),
            duplicate_rows,
            duplicate_percentage: percentage(duplicate_rows, observations),
            variable_types,
        })
    }

    /// Reported type of a column.
    ///
    /// String columns whose non-null values all look like dates count as
    /// date-time; booleans and everything else count as text.
    fn classify(series: &Series) -> Result<DtypeCategory> {
        let category = get_dtype_category(series.dtype());
        if category != DtypeCategory::String {
            return Ok(category);
        }

        let values: Vec<String> = text_cells(series)?.into_iter().flatten().collect();
        if !values.is_empty() && values.iter().all(|v| looks_like_date(v)) {
            return Ok(DtypeCategory::Datetime);
        }
        Ok(DtypeCategory::String)
    }
}

fn looks_like_date(value: &str) -> bool {
    let trimmed = value.trim();
    DATE_PATTERNS.iter().any(|pattern| pattern.is_match(trimmed))
}

fn percentage(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        (part as f64 / whole as f64) * 100.0
    }
}

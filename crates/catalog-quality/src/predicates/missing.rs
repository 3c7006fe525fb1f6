use crate::error::Result;
use crate::table::Table;
use crate::types::{CheckOutcome, ColumnCount, MatchCollector};
use crate::utils::{float_cells, is_blank, is_float_dtype, text_cells};
use polars::prelude::*;

/// Flag absent cells in a column.
///
/// A cell is absent when it is null, when it is a float NaN, or when it is
/// text that is empty after trimming.
pub fn null_check(table: &Table, column: &str) -> Result<CheckOutcome> {
    let series = table.series(column)?;
    let mut collector = MatchCollector::with_rows(series.len());

    if is_float_dtype(series.dtype()) {
        for value in float_cells(series)? {
            match value {
                Some(v) if !v.is_nan() => collector.pass(),
                Some(_) => collector.flag("NaN"),
                None => collector.flag("null"),
            }
        }
    } else {
        for value in text_cells(series)? {
            match value {
                Some(v) if !is_blank(&v) => collector.pass(),
                Some(v) => collector.flag(&v),
                None => collector.flag("null"),
            }
        }
    }

    Ok(collector.finish())
}

/// Null counts for every column, in table order, skipping clean columns.
pub fn null_cells(table: &Table) -> Result<Vec<ColumnCount>> {
    let mut counts = Vec::new();
    for name in table.column_names() {
        let count = null_check(table, &name)?.matched_count();
        if count > 0 {
            counts.push(ColumnCount {
                column: name,
                count,
            });
        }
    }
    Ok(counts)
}

/// Flag rows that have at least one identical row elsewhere in the table.
///
/// Rows are compared across all columns, nulls comparing equal to nulls.
/// Every member of a group of identical rows is flagged, so three identical
/// rows yield a count of three. The offending values are the rendered rows.
pub fn duplicate_rows(table: &Table) -> Result<CheckOutcome> {
    let rows = table.row_count();
    let mut collector = MatchCollector::with_rows(rows);
    if rows < 2 || table.column_count() == 0 {
        (0..rows).for_each(|_| collector.pass());
        return Ok(collector.finish());
    }

    let duplicated = table.frame().is_duplicated()?;
    let columns: Vec<Vec<Option<String>>> = table
        .all_series()
        .map(text_cells)
        .collect::<PolarsResult<_>>()?;

    for (row, flagged) in duplicated.into_iter().enumerate() {
        if flagged.unwrap_or(false) {
            collector.flag(&render_row(&columns, row));
        } else {
            collector.pass();
        }
    }

    Ok(collector.finish())
}

fn render_row(columns: &[Vec<Option<String>>], row: usize) -> String {
    columns
        .iter()
        .map(|column| column[row].as_deref().unwrap_or("null"))
        .collect::<Vec<_>>()
        .join(" | ")
}

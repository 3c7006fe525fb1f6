//! The columnar snapshot every rule is evaluated against.
//!
//! [`Table`] wraps a polars [`DataFrame`] and adds the lookups the engine
//! needs: column access that fails with [`QualityError::UnknownColumn`] and
//! the derived shape (rows, columns, cells). Nested struct columns are
//! flattened into dotted names when the table is built, so
//! `audio_features: {energy, ...}` becomes `audio_features.energy`.

mod flatten;

pub use flatten::flatten_struct_columns;

use crate::error::{QualityError, Result};
use polars::prelude::*;

/// An immutable, fully materialized dataset snapshot.
#[derive(Debug, Clone)]
pub struct Table {
    frame: DataFrame,
}

static_assertions::assert_impl_all!(Table: Send, Sync);

impl Table {
    /// Build a table from a loaded frame, flattening struct columns.
    pub fn new(frame: DataFrame) -> Result<Self> {
        let frame = flatten_struct_columns(frame)?;
        Ok(Self { frame })
    }

    /// The underlying frame.
    pub fn frame(&self) -> &DataFrame {
        &self.frame
    }

    /// Number of rows (R).
    pub fn row_count(&self) -> usize {
        self.frame.height()
    }

    /// Number of columns (C).
    pub fn column_count(&self) -> usize {
        self.frame.width()
    }

    /// Total number of cells (R×C).
    pub fn cell_count(&self) -> usize {
        self.row_count() * self.column_count()
    }

    /// Column names in table order.
    pub fn column_names(&self) -> Vec<String> {
        self.frame
            .get_column_names()
            .into_iter()
            .map(|name| name.to_string())
            .collect()
    }

    /// Whether the table has a column with this name.
    pub fn has_column(&self, name: &str) -> bool {
        self.frame
            .get_column_names()
            .iter()
            .any(|candidate| candidate.as_str() == name)
    }

    /// Look up a column as a Series.
    ///
    /// Returns [`QualityError::UnknownColumn`] when the column is absent.
    pub fn series(&self, name: &str) -> Result<&Series> {
        if !self.has_column(name) {
            return Err(QualityError::UnknownColumn(name.to_string()));
        }
        let column = self.frame.column(name)?;
        Ok(column.as_materialized_series())
    }

    /// All columns as Series, in table order.
    pub fn all_series(&self) -> impl Iterator<Item = &Series> {
        self.frame
            .get_columns()
            .iter()
            .map(|column| column.as_materialized_series())
    }
}

impl TryFrom<DataFrame> for Table {
    type Error = QualityError;

    fn try_from(frame: DataFrame) -> Result<Self> {
        Table::new(frame)
    }
}

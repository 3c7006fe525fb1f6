//! Dataset sources.
//!
//! A [`DatasetSource`] produces the [`Table`] an evaluation runs against.
//! Every loading failure surfaces as [`QualityError::SourceUnavailable`] so
//! callers can tell a missing dataset apart from a failed evaluation. Loads
//! are attempted once and never retried.

mod csv;
mod json;

pub use csv::CsvFileSource;
pub use json::{JsonFileSource, JsonLayout};

use crate::error::{QualityError, Result};
use crate::table::Table;
use std::path::Path;

/// Something a table can be loaded from.
pub trait DatasetSource {
    /// Human-readable name used in errors and logs.
    fn name(&self) -> String;

    /// Load the dataset into a fully materialized table.
    fn load(&self) -> Result<Table>;
}

/// Pick a source for a local file by its extension.
///
/// `.json` is read as a JSON array of records, `.ndjson` and `.jsonl` as one
/// record per line; everything else is read as CSV.
pub fn source_for_path(path: impl AsRef<Path>) -> Box<dyn DatasetSource> {
    let path = path.as_ref();
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase());

    match extension.as_deref() {
        Some("json") => Box::new(JsonFileSource::new(path, JsonLayout::Array)),
        Some("ndjson") | Some("jsonl") => Box::new(JsonFileSource::new(path, JsonLayout::Lines)),
        _ => Box::new(CsvFileSource::new(path)),
    }
}

/// Fail with `SourceUnavailable` unless `path` is an existing file.
fn ensure_file(path: &Path) -> Result<()> {
    if !path.exists() {
        return Err(QualityError::source_unavailable(
            path.display().to_string(),
            "file not found",
        ));
    }
    if !path.is_file() {
        return Err(QualityError::source_unavailable(
            path.display().to_string(),
            "not a regular file",
        ));
    }
    Ok(())
}

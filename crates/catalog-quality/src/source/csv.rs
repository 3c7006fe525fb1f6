use super::{DatasetSource, ensure_file};
use crate::error::{QualityError, Result};
use crate::table::Table;
use polars::prelude::*;
use std::io::Cursor;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info};

/// A local CSV file with a header row.
///
/// Loading tries progressively looser strategies: standard quoting, no quote
/// handling, then a pass over pre-cleaned content with collapsed quotes and
/// blank lines removed.
///
/// Column types are inferred from every row. Columns the reader would type
/// as Boolean are re-read as text, so `true`/`TRUE`/`True` stay distinct
/// for the boolean domain check.
#[derive(Debug, Clone)]
pub struct CsvFileSource {
    path: PathBuf,
}

impl CsvFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_with_fallbacks(&self) -> PolarsResult<DataFrame> {
        let df = self.read_with_schema(None)?;

        let flags: Vec<Field> = df
            .schema()
            .iter()
            .filter(|(_, dtype)| dtype.is_bool())
            .map(|(name, _)| Field::new(name.clone(), DataType::String))
            .collect();
        if flags.is_empty() {
            return Ok(df);
        }

        debug!("Re-reading {} boolean column(s) as text", flags.len());
        self.read_with_schema(Some(Arc::new(Schema::from_iter(flags))))
    }

    fn read_with_schema(&self, overwrite: Option<SchemaRef>) -> PolarsResult<DataFrame> {
        // Strategy 1: standard loading with quote handling
        match read_options(overwrite.clone())
            .with_parse_options(CsvParseOptions::default().with_quote_char(Some(b'"')))
            .try_into_reader_with_file_path(Some(self.path.clone()))?
            .finish()
        {
            Ok(df) => return Ok(df),
            Err(e) => debug!("Standard CSV loading failed: {}", e),
        }

        // Strategy 2: without quote handling
        match read_options(overwrite.clone())
            .with_parse_options(CsvParseOptions::default().with_quote_char(None))
            .try_into_reader_with_file_path(Some(self.path.clone()))?
            .finish()
        {
            Ok(df) => return Ok(df),
            Err(e) => debug!("CSV loading without quotes failed: {}", e),
        }

        // Strategy 3: pre-clean content
        let content = std::fs::read_to_string(&self.path)?;
        read_options(overwrite)
            .into_reader_with_file_handle(Cursor::new(clean_csv_content(&content)))
            .finish()
    }
}

fn read_options(overwrite: Option<SchemaRef>) -> CsvReadOptions {
    CsvReadOptions::default()
        .with_infer_schema_length(None)
        .with_has_header(true)
        .with_schema_overwrite(overwrite)
}

impl DatasetSource for CsvFileSource {
    fn name(&self) -> String {
        format!("csv:{}", self.path.display())
    }

    fn load(&self) -> Result<Table> {
        ensure_file(&self.path)?;

        let df = self
            .read_with_fallbacks()
            .map_err(|e| QualityError::source_unavailable(self.name(), e))?;
        info!(
            "Loaded {} rows x {} columns from {}",
            df.height(),
            df.width(),
            self.path.display()
        );

        Table::new(df)
    }
}

/// Collapse doubled quotes and drop blank lines.
fn clean_csv_content(content: &str) -> String {
    content
        .replace("\"\"\"", "\"")
        .replace("\"\"", "\"")
        .lines()
        .filter(|line| !line.trim().is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

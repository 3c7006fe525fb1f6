use super::{DatasetSource, ensure_file};
use crate::error::{QualityError, Result};
use crate::table::Table;
use polars::prelude::*;
use std::fs::File;
use std::path::{Path, PathBuf};
use tracing::info;

/// How records are laid out in a JSON file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JsonLayout {
    /// A single array of record objects.
    Array,
    /// One record object per line.
    Lines,
}

/// A local JSON or NDJSON catalog export.
///
/// Nested objects such as `audio_features` load as struct columns and are
/// flattened to dotted names when the table is built.
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
    layout: JsonLayout,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>, layout: JsonLayout) -> Self {
        Self {
            path: path.into(),
            layout,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> PolarsResult<DataFrame> {
        let file = File::open(&self.path)?;
        let format = match self.layout {
            JsonLayout::Array => JsonFormat::Json,
            JsonLayout::Lines => JsonFormat::JsonLines,
        };
        JsonReader::new(file)
            .with_json_format(format)
            .infer_schema_len(None)
            .finish()
    }
}

impl DatasetSource for JsonFileSource {
    fn name(&self) -> String {
        format!("json:{}", self.path.display())
    }

    fn load(&self) -> Result<Table> {
        ensure_file(&self.path)?;

        let df = self
            .read()
            .map_err(|e| QualityError::source_unavailable(self.name(), e))?;
        info!(
            "Loaded {} records from {}",
            df.height(),
            self.path.display()
        );

        Table::new(df)
    }
}

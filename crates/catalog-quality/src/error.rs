//! Custom error types for the quality engine.
//!
//! This module provides the error hierarchy using `thiserror`. The three
//! domain failures (`UnknownColumn`, `EmptyDataset`, `SourceUnavailable`) are
//! kept as distinct variants so a combined load-and-evaluate pipeline can tell
//! them apart.
//!
//! Errors are serializable so they can be embedded in machine-readable output.

use serde::Serialize;
use serde::ser::SerializeStruct;
use thiserror::Error;

/// The main error type for quality evaluation.
#[derive(Error, Debug)]
pub enum QualityError {
    /// A rule referenced a column that is absent from the table.
    #[error("Column '{0}' not found in dataset")]
    UnknownColumn(String),

    /// The table has zero rows or zero columns, so no score can be computed.
    #[error("Dataset is empty: cannot score a table with zero cells")]
    EmptyDataset,

    /// The upstream dataset could not be loaded.
    #[error("Dataset source '{source_name}' unavailable: {reason}")]
    SourceUnavailable { source_name: String, reason: String },

    /// Invalid configuration provided.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Report generation failed.
    #[error("Failed to generate report: {0}")]
    ReportGenerationFailed(String),

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Polars error wrapper.
    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error with context.
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<QualityError>,
    },
}

impl QualityError {
    /// Add context to an error.
    pub fn with_context(self, context: impl Into<String>) -> Self {
        QualityError::WithContext {
            context: context.into(),
            source: Box::new(self),
        }
    }

    /// Build a [`QualityError::SourceUnavailable`] from any displayable reason.
    pub fn source_unavailable(source_name: impl Into<String>, reason: impl ToString) -> Self {
        QualityError::SourceUnavailable {
            source_name: source_name.into(),
            reason: reason.to_string(),
        }
    }

    /// Get a stable error code for machine consumers.
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::UnknownColumn(_) => "UNKNOWN_COLUMN",
            Self::EmptyDataset => "EMPTY_DATASET",
            Self::SourceUnavailable { .. } => "SOURCE_UNAVAILABLE",
            Self::InvalidConfig(_) => "INVALID_CONFIG",
            Self::ReportGenerationFailed(_) => "REPORT_GENERATION_FAILED",
            Self::Io(_) => "IO_ERROR",
            Self::Polars(_) => "POLARS_ERROR",
            Self::Json(_) => "JSON_ERROR",
            Self::WithContext { source, .. } => source.error_code(),
        }
    }

    /// The innermost error, with all context layers peeled off.
    pub fn root(&self) -> &QualityError {
        match self {
            Self::WithContext { source, .. } => source.root(),
            other => other,
        }
    }

    /// Check if this error came from the dataset source rather than the engine.
    pub fn is_source_failure(&self) -> bool {
        matches!(self.root(), Self::SourceUnavailable { .. })
    }
}

/// Errors are serialized as a struct with `code` and `message` fields.
impl Serialize for QualityError {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut state = serializer.serialize_struct("QualityError", 2)?;
        state.serialize_field("code", &self.error_code())?;
        state.serialize_field("message", &self.to_string())?;
        state.end()
    }
}

/// Result type alias for quality operations.
pub type Result<T> = std::result::Result<T, QualityError>;

/// Extension trait for adding context to Results.
pub trait ResultExt<T> {
    /// Add context to an error result.
    fn context(self, context: impl Into<String>) -> Result<T>;
}

impl<T> ResultExt<T> for Result<T> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.with_context(context))
    }
}

impl<T> ResultExt<T> for std::result::Result<T, polars::error::PolarsError> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| QualityError::Polars(e).with_context(context))
    }
}

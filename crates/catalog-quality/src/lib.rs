//! Catalog Quality Library
//!
//! A data-quality rule engine for music catalog datasets, built with Rust and Polars.
//!
//! # Overview
//!
//! This library evaluates a fixed battery of declarative rules against a
//! loaded catalog table and scores the result along six dimensions:
//!
//! - **Completeness**: missing cells across every column
//! - **Uniqueness**: rows that have an identical twin
//! - **Validity**: text casing, encoding artifacts, boolean and numeric formats
//! - **Accuracy**: audio features, popularity, duration and release dates within plausible ranges
//! - **Consistency** and **Timeliness**: no checks for catalogs, always zero
//!
//! Every cell of the table lands in exactly one of three buckets (good,
//! unanalyzed or anomalous), and the overall score is the share of cells
//! that are not anomalous, from 0 to 100.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use catalog_quality::{evaluate, source_for_path, EvaluationConfig};
//! use chrono::NaiveDate;
//!
//! // Load data
//! let table = source_for_path("tracks.csv").load()?;
//!
//! // Pin the date release dates are measured against
//! let config = EvaluationConfig::builder()
//!     .as_of(NaiveDate::from_ymd_opt(2024, 6, 1).unwrap())
//!     .build()?;
//!
//! let evaluation = evaluate(&table, &config)?;
//! println!("Score: {:.2}", evaluation.summary.overall_score);
//!
//! for outcome in evaluation.outcomes.iter().filter(|o| o.anomaly_count > 0) {
//!     println!("{}: {} {:?}", outcome.rule.id, outcome.anomaly_count, outcome.examples(4));
//! }
//! ```
//!
//! # Rules
//!
//! Rules are plain data ([`RuleDescriptor`]); the catalog rule set comes from
//! [`catalog_rules`]. Custom rule tables can be evaluated with
//! [`evaluate_with_rules`].
//!
//! # Reports
//!
//! [`ReportGenerator`] combines an evaluation with a [`DatasetOverview`] into
//! a [`QualityReport`], which any [`ReportRenderer`] can turn into a document.

pub mod config;
pub mod error;
pub mod predicates;
pub mod profiler;
pub mod quality;
pub mod reporting;
pub mod rules;
pub mod source;
pub mod table;
pub mod types;
pub mod utils;

// Re-exports for convenient access
pub use config::{ConfigValidationError, EvaluationConfig, EvaluationConfigBuilder};
pub use error::{QualityError, Result as QualityResult, ResultExt};
pub use predicates::{CasingPolicy, RangeBounds};
pub use profiler::DataProfiler;
pub use quality::{Aggregator, QualityEvaluator, evaluate, evaluate_with_rules};
pub use reporting::{JsonRenderer, QualityReport, ReportGenerator, ReportRenderer, RuleReport};
pub use rules::{CheckKind, DateCeiling, RangeSpec, RuleDescriptor, RuleTarget, catalog_rules};
pub use source::{CsvFileSource, DatasetSource, JsonFileSource, source_for_path};
pub use table::Table;
pub use types::{
    AnalysisSummary, CheckOutcome, CheckResult, DatasetOverview, Dimension, DimensionScores,
    QualityEvaluation, RuleOutcome, RuleVerdict,
};

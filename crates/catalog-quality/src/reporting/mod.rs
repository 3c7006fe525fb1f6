//! Report generation module.
//!
//! This module turns an evaluation into a [`QualityReport`] and hands it to a
//! [`ReportRenderer`]. The report is the only thing renderers see; they never
//! touch the table or re-run rules.
//!
//! # Renderers
//!
//! [`JsonRenderer`] covers both machine-readable outputs:
//! - JSON output to stdout (`--json` CLI flag)
//! - JSON file output (`--emit-report` CLI flag)
//!
//! # Example
//!
//! ```rust,ignore
//! use catalog_quality::reporting::{JsonRenderer, ReportGenerator, ReportRenderer};
//!
//! let report = ReportGenerator::build_report(
//!     "data/tracks.csv",
//!     &evaluation,
//!     &overview,
//!     &config,
//!     generated_at,
//! );
//!
//! // Print as JSON
//! JsonRenderer::stdout().render(&report)?;
//!
//! // Or write to output/tracks_quality_report.json
//! JsonRenderer::file(PathBuf::from("output"), "tracks").render(&report)?;
//! ```

mod generator;
mod renderer;

pub use generator::{QualityReport, ReportGenerator, RuleReport};
pub use renderer::{JsonRenderer, ReportDestination, ReportRenderer};

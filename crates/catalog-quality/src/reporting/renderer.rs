use super::QualityReport;
use crate::error::{QualityError, Result};
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::info;

/// Turns a [`QualityReport`] into an output document.
pub trait ReportRenderer {
    fn render(&self, report: &QualityReport) -> Result<()>;
}

/// Where a JSON report goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportDestination {
    Stdout,
    /// `<dir>/<base_name>_quality_report.json`
    File { dir: PathBuf, base_name: String },
}

/// Pretty-printed JSON renderer.
#[derive(Debug, Clone)]
pub struct JsonRenderer {
    destination: ReportDestination,
}

impl JsonRenderer {
    pub fn stdout() -> Self {
        Self {
            destination: ReportDestination::Stdout,
        }
    }

    pub fn file(dir: PathBuf, base_name: impl Into<String>) -> Self {
        Self {
            destination: ReportDestination::File {
                dir,
                base_name: base_name.into(),
            },
        }
    }

    pub fn destination(&self) -> &ReportDestination {
        &self.destination
    }

    /// Path the report is written to, if rendering to a file.
    pub fn report_path(&self) -> Option<PathBuf> {
        match &self.destination {
            ReportDestination::Stdout => None,
            ReportDestination::File { dir, base_name } => Some(report_file_path(dir, base_name)),
        }
    }
}

fn report_file_path(dir: &Path, base_name: &str) -> PathBuf {
    dir.join(format!("{}_quality_report.json", base_name))
}

fn write_report_file(dir: &Path, report_path: &Path, json: &str) -> Result<()> {
    let write = || -> io::Result<()> {
        fs::create_dir_all(dir)?;
        let mut file = File::create(report_path)?;
        file.write_all(json.as_bytes())
    };
    write().map_err(|e| {
        QualityError::ReportGenerationFailed(format!("{}: {}", report_path.display(), e))
    })?;

    info!("Report saved: {}", report_path.display());
    Ok(())
}

impl ReportRenderer for JsonRenderer {
    fn render(&self, report: &QualityReport) -> Result<()> {
        let json = serde_json::to_string_pretty(report)?;

        match &self.destination {
            ReportDestination::Stdout => {
                let mut stdout = io::stdout().lock();
                writeln!(stdout, "{}", json)?;
                Ok(())
            }
            ReportDestination::File { dir, base_name } => {
                write_report_file(dir, &report_file_path(dir, base_name), &json)
            }
        }
    }
}

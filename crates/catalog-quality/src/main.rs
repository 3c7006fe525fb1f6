//! CLI entry point for the catalog quality engine.

use anyhow::{Context, Result, anyhow};
use catalog_quality::{
    CasingPolicy, DataProfiler, EvaluationConfig, JsonRenderer, QualityReport, ReportGenerator,
    ReportRenderer, evaluate, source_for_path,
};
use chrono::{Local, NaiveDate};
use clap::{Parser, ValueEnum};
use dotenv::dotenv;
use std::path::{Path, PathBuf};
use tracing::info;

/// CLI-compatible casing policy enum
#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliCasingPolicy {
    /// Track names must not contain uppercase letters
    Lower,
    /// Track names must not contain lowercase letters
    Upper,
    /// Every word starts with an uppercase letter
    Title,
}

impl From<CliCasingPolicy> for CasingPolicy {
    fn from(cli: CliCasingPolicy) -> Self {
        match cli {
            CliCasingPolicy::Lower => CasingPolicy::Lower,
            CliCasingPolicy::Upper => CasingPolicy::Upper,
            CliCasingPolicy::Title => CasingPolicy::Title,
        }
    }
}

#[derive(Parser, Debug)]
#[command(
    version,
    about = "Data-quality rule engine for music catalog datasets",
    long_about = "Evaluates completeness, uniqueness, validity and accuracy rules \
                  against a catalog dataset and reports a 0-100 quality score.\n\n\
                  ENVIRONMENT VARIABLES:\n  \
                  CATALOG_QUALITY_AS_OF    Default as-of date (YYYY-MM-DD)\n\n\
                  EXAMPLES:\n  \
                  # Evaluate a CSV export\n  \
                  catalog-quality -i tracks.csv\n\n  \
                  # Nested JSON export, pinned date, report file\n  \
                  catalog-quality -i tracks.json --as-of 2024-06-01 -r -o reports/\n\n  \
                  # Machine-readable output\n  \
                  catalog-quality -i tracks.csv --json | jq .summary.overall_score"
)]
struct Args {
    /// Path to the dataset (CSV, JSON or NDJSON by extension)
    #[arg(short, long)]
    input: String,

    /// Output directory for reports
    #[arg(short, long, default_value = "./outputs")]
    output: String,

    /// Upper bound for album release dates (YYYY-MM-DD)
    ///
    /// Defaults to today's date
    #[arg(long, env = "CATALOG_QUALITY_AS_OF")]
    as_of: Option<NaiveDate>,

    /// Casing expected of track names
    #[arg(long, value_enum, default_value = "lower")]
    casing: CliCasingPolicy,

    /// Number of offending values shown per rule
    #[arg(long, default_value = "4")]
    examples: usize,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// Suppress progress output (only show errors and final result)
    #[arg(short, long)]
    quiet: bool,

    /// Output JSON to stdout instead of human-readable summary
    ///
    /// Disables all progress logs; only outputs the final JSON report.
    #[arg(long)]
    json: bool,

    /// Write a JSON report to the output directory
    ///
    /// The report will be saved as <input_name>_quality_report.json
    #[arg(short = 'r', long)]
    emit_report: bool,
}

/// Initialize the tracing subscriber for logging.
///
/// When `json_output` is true, logging is completely disabled to ensure
/// only JSON is written to stdout.
fn init_logging(level: &str, quiet: bool, json_output: bool) {
    if json_output {
        return;
    }

    use tracing_subscriber::EnvFilter;

    let effective_level = if quiet { "warn" } else { level };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(effective_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    // Load environment variables before clap reads `env` defaults
    dotenv().ok();

    let args = Args::parse();
    init_logging(&args.log_level, args.quiet, args.json);

    if !Path::new(&args.input).exists() {
        return Err(anyhow!("Input file not found: {}", args.input));
    }

    let as_of = args.as_of.unwrap_or_else(|| Local::now().date_naive());
    let config = EvaluationConfig::builder()
        .as_of(as_of)
        .example_limit(args.examples)
        .casing_policy(args.casing.into())
        .build()?;

    info!("Loading dataset from: {}", args.input);
    let table = source_for_path(&args.input).load()?;

    let evaluation = evaluate(&table, &config).context("Quality evaluation failed")?;
    let overview = DataProfiler::overview(&table)?;

    let report = ReportGenerator::build_report(
        &args.input,
        &evaluation,
        &overview,
        &config,
        Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
    );

    if args.emit_report {
        JsonRenderer::file(PathBuf::from(&args.output), extract_file_stem(&args.input))
            .render(&report)?;
    }

    if args.json {
        JsonRenderer::stdout().render(&report)?;
    } else {
        print_human_readable_summary(&report);
    }

    Ok(())
}

/// Extract the file stem from a path for report naming.
fn extract_file_stem(path: &str) -> String {
    Path::new(path)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("output")
        .to_string()
}

/// Print the report for a terminal reader.
///
/// Uses `println!` intentionally: this is the primary output and must be
/// visible regardless of log level.
fn print_human_readable_summary(report: &QualityReport) {
    let overview = &report.overview;
    let summary = &report.summary;

    println!();
    println!("{}", "=".repeat(80));
    println!("DATA QUALITY REPORT");
    println!("{}", "=".repeat(80));
    println!();

    println!(
        "Input:  {} ({} rows x {} columns)",
        report.input, overview.observations, overview.variables
    );
    println!("As of:  {}", report.as_of);
    println!();

    println!("Overview:");
    println!("  Total cells: {}", overview.total_cells);
    println!(
        "  Missing cells: {} ({:.2}%)",
        overview.missing_cells, overview.missing_percentage
    );
    println!(
        "  Duplicate rows: {} ({:.2}%)",
        overview.duplicate_rows, overview.duplicate_percentage
    );
    println!(
        "  Variable types: {} numeric, {} text, {} date-time",
        overview.variable_types.numeric,
        overview.variable_types.text,
        overview.variable_types.date_time
    );
    println!();

    println!("Anomalies by dimension:");
    for (dimension, count) in summary.per_dimension.iter() {
        println!("  {:<14} {}", dimension, count);
    }
    println!();

    println!("Cells:");
    println!("  Good:       {}", summary.good_cells);
    println!("  Unanalyzed: {}", summary.unanalyzed_cells);
    println!("  Anomalous:  {}", summary.total_anomalies);
    if summary.dimension_total > summary.total_anomalies {
        println!(
            "  (dimension counts sum to {}, capped at the cell count)",
            summary.dimension_total
        );
    }
    println!();

    let failing: Vec<_> = report.failing_rules().collect();
    if !failing.is_empty() {
        println!("Findings:");
        for rule in failing {
            println!("  [{}] {}", rule.dimension, rule.message);
        }
        println!();
    }

    println!("Overall Score: {:.2}/100", summary.overall_score);
    println!("{}", "=".repeat(80));
}

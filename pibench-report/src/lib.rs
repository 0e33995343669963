#![warn(missing_docs)]
//! PiBench Report - Reporting
//!
//! Holds the serializable result model and generates output formats:
//! - Human (terminal table, rendered by the CLI)
//! - JSON (machine-readable)
//! - CSV (spreadsheet-compatible)

mod csv;
mod format;
mod json;
mod report;

pub use csv::generate_csv_report;
pub use format::{format_cv, format_duration, format_pi_cv, format_significant};
pub use json::generate_json_report;
pub use report::{Report, ReportConfig, ReportMeta, RunResult, SystemInfo};

/// Output format selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Human-readable terminal output
    #[default]
    Human,
    /// JSON with full schema
    Json,
    /// CSV for spreadsheets
    Csv,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "csv" => Ok(OutputFormat::Csv),
            "human" | "text" => Ok(OutputFormat::Human),
            other => Err(format!("Unknown output format: {}", other)),
        }
    }
}

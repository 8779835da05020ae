//! Export module for FinTrack
//!
//! Writes a [`FinancialReport`](crate::reports::FinancialReport) in
//! machine-readable formats:
//! - JSON: the full report, pretty-printed
//! - YAML: the full report behind a comment header
//! - CSV: one flat table of the report's figures (spreadsheet-compatible)

pub mod csv;
pub mod json;
pub mod yaml;

pub use self::csv::export_report_csv;
pub use self::json::export_report_json;
pub use self::yaml::export_report_yaml;

//! CLI command handlers
//!
//! Bridges clap argument parsing with the report engine.

pub mod report;

pub use report::{handle_report_command, ReportArgs, ReportFormat};

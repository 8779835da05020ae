//! YAML Export functionality
//!
//! Exports the report to YAML for human reading.

use std::io::Write;

use crate::error::FinTrackResult;
use crate::reports::FinancialReport;

/// Export the report as YAML with a comment header
pub fn export_report_yaml<W: Write>(report: &FinancialReport, writer: &mut W) -> FinTrackResult<()> {
    writeln!(writer, "# FinTrack Financial Report")?;
    writeln!(writer, "# User: {}", report.user_id)?;
    writeln!(writer, "# Range: {} to {}", report.start_date, report.end_date)?;
    writeln!(writer, "# Generated: {}", report.generated_at)?;
    writeln!(writer)?;

    serde_yaml::to_writer(writer, report)?;
    Ok(())
}

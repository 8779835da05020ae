//! JSON Export functionality

use std::io::Write;

use crate::error::{FinTrackError, FinTrackResult};
use crate::reports::FinancialReport;

/// Export the report as pretty-printed JSON
pub fn export_report_json<W: Write>(report: &FinancialReport, writer: &mut W) -> FinTrackResult<()> {
    serde_json::to_writer_pretty(&mut *writer, report)
        .map_err(|e| FinTrackError::Export(e.to_string()))?;
    writeln!(writer)?;
    Ok(())
}

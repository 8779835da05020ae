//! CLI command for the financial report

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDate, Utc};
use clap::{Args, ValueEnum};
use tracing::info;

use crate::config::Settings;
use crate::error::{FinTrackError, FinTrackResult};
use crate::export::{export_report_csv, export_report_json, export_report_yaml};
use crate::models::{DateRange, UserId};
use crate::reports::FinancialReport;
use crate::storage::Storage;

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ReportFormat {
    /// Human-readable tables
    #[default]
    Text,
    /// Full report as JSON
    Json,
    /// Full report as YAML
    Yaml,
    /// Flat CSV table
    Csv,
}

/// Arguments of `fintrack report`
#[derive(Args, Debug, Clone)]
pub struct ReportArgs {
    /// User to report on
    #[arg(short, long, env = "FINTRACK_USER")]
    pub user: Option<String>,

    /// Start date (YYYY-MM-DD), defaults to the first of the current month
    #[arg(short, long)]
    pub start: Option<String>,

    /// End date (YYYY-MM-DD), defaults to today
    #[arg(short, long)]
    pub end: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: ReportFormat,

    /// Write to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Handle the report command
pub fn handle_report_command(
    storage: &Storage,
    settings: &Settings,
    args: ReportArgs,
) -> FinTrackResult<()> {
    let user = resolve_user(args.user, settings)?;
    let today = Local::now().date_naive();
    let (start, end) = resolve_dates(args.start.as_deref(), args.end.as_deref(), today)?;

    let report = FinancialReport::build(storage, &user, start, end, settings, Utc::now())?;

    match args.output {
        Some(path) => {
            let file = File::create(&path).map_err(|e| {
                FinTrackError::Export(format!("Failed to create file {}: {}", path.display(), e))
            })?;
            let mut writer = BufWriter::new(file);
            write_report(&report, settings, args.format, &mut writer)?;
            writer.flush()?;
            report_written(&path);
        }
        None => {
            let stdout = io::stdout();
            let mut writer = stdout.lock();
            write_report(&report, settings, args.format, &mut writer)?;
        }
    }

    Ok(())
}

fn report_written(path: &Path) {
    info!(path = %path.display(), "Report written");
    println!("Report written to: {}", path.display());
}

fn write_report<W: Write>(
    report: &FinancialReport,
    settings: &Settings,
    format: ReportFormat,
    writer: &mut W,
) -> FinTrackResult<()> {
    match format {
        ReportFormat::Text => write!(writer, "{}", report.format_terminal(settings))?,
        ReportFormat::Json => export_report_json(report, writer)?,
        ReportFormat::Yaml => export_report_yaml(report, writer)?,
        ReportFormat::Csv => export_report_csv(report, writer)?,
    }
    Ok(())
}

/// The user from the command line or environment, else the configured default
fn resolve_user(user: Option<String>, settings: &Settings) -> FinTrackResult<UserId> {
    user.or_else(|| settings.default_user.clone())
        .filter(|u| !u.trim().is_empty())
        .map(UserId::new)
        .ok_or_else(|| {
            FinTrackError::Validation(
                "No user given. Pass --user, set FINTRACK_USER, or set default_user in config.json"
                    .to_string(),
            )
        })
}

/// Parse the requested range, filling gaps with the current month to date
fn resolve_dates(
    start: Option<&str>,
    end: Option<&str>,
    today: NaiveDate,
) -> FinTrackResult<(NaiveDate, NaiveDate)> {
    let month_to_date = DateRange::month_to_date(today);
    let start = match start {
        Some(s) => parse_date(s, "start")?,
        None => month_to_date.start(),
    };
    let end = match end {
        Some(e) => parse_date(e, "end")?,
        None => month_to_date.end(),
    };
    Ok((start, end))
}

fn parse_date(value: &str, which: &str) -> FinTrackResult<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| {
        FinTrackError::Validation(format!(
            "Invalid {} date format: {}. Use YYYY-MM-DD",
            which, value
        ))
    })
}

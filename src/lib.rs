//! FinTrack - financial reporting and settlement engine
//!
//! Given a user and a date range, FinTrack loads that user's incomes,
//! expenses, budgets and shared spending and produces one consolidated
//! report: category breakdowns, month-by-month trends, budget utilization
//! and the user's net settlement position for shared expenses.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `logging`: Tracing subscriber set-up for the binary
//! - `models`: Input records, money, ids and date ranges
//! - `storage`: JSON file storage the engine reads from
//! - `loader`: Loads one immutable record set per report request
//! - `reports`: The calculators and the report assembler
//! - `export`: JSON, YAML and CSV output
//! - `display`: Terminal formatting helpers
//! - `cli`: Command handlers for the `fintrack` binary
//!
//! # Example
//!
//! ```rust,ignore
//! use fintrack::config::{FinTrackPaths, Settings};
//! use fintrack::reports::FinancialReport;
//! use fintrack::storage::Storage;
//!
//! let paths = FinTrackPaths::new()?;
//! let settings = Settings::load_or_create(&paths)?;
//! let mut storage = Storage::new(paths)?;
//! storage.load_all()?;
//! let report = FinancialReport::build(&storage, &"alice".into(), start, end, &settings, Utc::now())?;
//! ```

pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod loader;
pub mod logging;
pub mod models;
pub mod reports;
pub mod storage;

pub use error::{FinTrackError, FinTrackResult};

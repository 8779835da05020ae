//! Display formatting for terminal output
//!
//! Column helpers shared by the terminal rendering of reports.

pub mod report;

pub use report::{
    double_separator, format_bar, format_date, format_money, format_percentage, separator,
    truncate,
};

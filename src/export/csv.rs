//! CSV Export functionality
//!
//! Flattens the report into one table so every figure can be filtered by
//! its `section` column in a spreadsheet. Amounts are in major units.

use std::io::Write;

use csv::Writer;

use crate::error::{FinTrackError, FinTrackResult};
use crate::models::Money;
use crate::reports::FinancialReport;

const HEADER: [&str; 6] = ["section", "label", "date", "amount", "count", "percentage"];

struct Row<'a> {
    section: &'a str,
    label: &'a str,
    date: String,
    amount: Option<Money>,
    count: Option<usize>,
    percentage: Option<f64>,
}

impl<'a> Row<'a> {
    fn new(section: &'a str, label: &'a str) -> Self {
        Self {
            section,
            label,
            date: String::new(),
            amount: None,
            count: None,
            percentage: None,
        }
    }

    fn amount(mut self, amount: Money) -> Self {
        self.amount = Some(amount);
        self
    }

    fn count(mut self, count: usize) -> Self {
        self.count = Some(count);
        self
    }

    fn percentage(mut self, percentage: f64) -> Self {
        self.percentage = Some(percentage);
        self
    }

    fn date(mut self, date: impl ToString) -> Self {
        self.date = date.to_string();
        self
    }

    fn write<W: Write>(&self, wtr: &mut Writer<W>) -> FinTrackResult<()> {
        wtr.write_record([
            self.section.to_string(),
            self.label.to_string(),
            self.date.clone(),
            self.amount
                .map(|a| format!("{:.2}", a.to_major()))
                .unwrap_or_default(),
            self.count.map(|c| c.to_string()).unwrap_or_default(),
            self.percentage
                .map(|p| format!("{:.2}", p))
                .unwrap_or_default(),
        ])?;
        Ok(())
    }
}

/// Export the report as a flat CSV table
pub fn export_report_csv<W: Write>(report: &FinancialReport, writer: W) -> FinTrackResult<()> {
    let mut wtr = Writer::from_writer(writer);
    wtr.write_record(HEADER)?;

    let summary = [
        ("total_income", report.total_income, Some(report.total_income_transactions)),
        ("total_expenses", report.total_expenses, Some(report.total_expense_transactions)),
        ("net_amount", report.net_amount, None),
        ("average_daily_income", report.average_daily_income, None),
        ("average_daily_expense", report.average_daily_expense, None),
        ("largest_expense", report.largest_expense, None),
        ("largest_income", report.largest_income, None),
        ("total_shared_expenses", report.total_shared_expenses, None),
    ];
    for (label, amount, count) in summary {
        let mut row = Row::new("summary", label).amount(amount);
        row.count = count;
        row.write(&mut wtr)?;
    }
    Row::new("summary", "savings_rate")
        .percentage(report.savings_rate)
        .write(&mut wtr)?;

    for category in &report.category_expenses {
        Row::new("category", &category.category_name)
            .amount(category.total_amount)
            .count(category.expense_count)
            .percentage(category.percentage_of_total)
            .write(&mut wtr)?;
    }

    for month in &report.monthly_summaries {
        Row::new("month_income", &month.label)
            .date(month.period_start)
            .amount(month.total_income)
            .count(month.income_count)
            .write(&mut wtr)?;
        Row::new("month_expenses", &month.label)
            .date(month.period_start)
            .amount(month.total_expenses)
            .count(month.expense_count)
            .write(&mut wtr)?;
    }

    if let Some(budgets) = &report.budget_comparison {
        for budget in &budgets.budgets {
            Row::new("budget", &budget.name)
                .date(budget.overlap_start)
                .amount(budget.spent)
                .percentage(budget.utilization_percentage)
                .write(&mut wtr)?;
        }
        Row::new("budget", "TOTAL")
            .amount(budgets.total_spent)
            .count(budgets.over_budget_count)
            .percentage(budgets.overall_utilization_percentage)
            .write(&mut wtr)?;
    }

    for item in &report.shared_expenses {
        Row::new("shared", &item.description)
            .date(item.date)
            .amount(item.net_contribution)
            .write(&mut wtr)?;
    }

    for entry in &report.transactions {
        Row::new("transaction", &entry.description)
            .date(entry.date)
            .amount(entry.amount)
            .write(&mut wtr)?;
    }

    wtr.flush()
        .map_err(|e| FinTrackError::Export(format!("Failed to flush CSV: {}", e)))?;
    Ok(())
}

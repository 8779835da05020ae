//! Financial Report
//!
//! Assembles every report section for one user and date range into a single
//! immutable value.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use tracing::{info, instrument};

use super::{
    percentage, BudgetComparison, CategoryBreakdown, CategoryNames, GroupSummary, MonthlySummary,
    SettlementItem, SettlementSummary,
};
use crate::config::Settings;
use crate::display::{
    double_separator, format_bar, format_date, format_money, format_percentage, separator,
    truncate,
};
use crate::error::FinTrackResult;
use crate::loader::{LedgerEntry, RecordSet, RecordSetLoader, RecordSource};
use crate::models::{Money, UserId};

const WIDTH: usize = 80;

/// Consolidated financial report
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialReport {
    pub user_id: UserId,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub days_in_range: i64,
    pub total_income: Money,
    pub total_expenses: Money,
    pub net_amount: Money,
    pub savings_rate: f64,
    pub total_income_transactions: usize,
    pub total_expense_transactions: usize,
    pub average_daily_income: Money,
    pub average_daily_expense: Money,
    pub largest_expense: Money,
    pub largest_income: Money,
    pub category_expenses: Vec<CategoryBreakdown>,
    pub monthly_summaries: Vec<MonthlySummary>,
    /// `None` when no budget overlaps the range
    pub budget_comparison: Option<BudgetComparison>,
    pub transactions: Vec<LedgerEntry>,
    pub shared_expenses: Vec<SettlementItem>,
    pub total_shared_expenses: Money,
    pub groups: Vec<GroupSummary>,
    pub generated_at: DateTime<Utc>,
}

impl FinancialReport {
    /// Load the records for `user` over `[start, end]` and build the report
    pub fn build<S: RecordSource>(
        source: &S,
        user: &UserId,
        start: NaiveDate,
        end: NaiveDate,
        settings: &Settings,
        generated_at: DateTime<Utc>,
    ) -> FinTrackResult<Self> {
        let records = RecordSetLoader::new(source).load(user, start, end)?;
        Ok(Self::generate(&records, settings, generated_at))
    }

    /// Build the report from an already loaded record set
    #[instrument(skip_all, fields(user = %records.user_id, range = %records.range))]
    pub fn generate(records: &RecordSet, settings: &Settings, generated_at: DateTime<Utc>) -> Self {
        let names = CategoryNames::from_settings(&records.categories, settings);
        let range = &records.range;

        let total_income: Money = records.incomes.iter().map(|i| i.amount).sum();
        let total_expenses: Money = records.expenses.iter().map(|e| e.amount).sum();
        let net_amount = total_income - total_expenses;
        let days = range.days();
        let day_count = usize::try_from(days).unwrap_or(1);

        let category_expenses = CategoryBreakdown::calculate(&records.expenses, total_expenses, &names);
        let monthly_summaries = MonthlySummary::calculate(range, &records.expenses, &records.incomes);
        let budget_comparison =
            BudgetComparison::calculate(&records.budgets, &records.expenses, range, &names);
        let settlement = SettlementSummary::calculate(records, settings.split_policy);

        info!(
            categories = category_expenses.len(),
            months = monthly_summaries.len(),
            budgets = budget_comparison.as_ref().map_or(0, |b| b.budgets.len()),
            shared_items = settlement.items.len(),
            "Generated financial report"
        );

        Self {
            user_id: records.user_id.clone(),
            start_date: range.start(),
            end_date: range.end(),
            days_in_range: days,
            total_income,
            total_expenses,
            net_amount,
            savings_rate: percentage(net_amount, total_income),
            total_income_transactions: records.incomes.len(),
            total_expense_transactions: records.expenses.len(),
            average_daily_income: total_income.average(day_count),
            average_daily_expense: total_expenses.average(day_count),
            largest_expense: records
                .expenses
                .iter()
                .map(|e| e.amount)
                .max()
                .unwrap_or_default(),
            largest_income: records
                .incomes
                .iter()
                .map(|i| i.amount)
                .max()
                .unwrap_or_default(),
            category_expenses,
            monthly_summaries,
            budget_comparison,
            transactions: records.transactions.clone(),
            shared_expenses: settlement.items,
            total_shared_expenses: settlement.total_shared_balance,
            groups: settlement.groups,
            generated_at,
        }
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self, settings: &Settings) -> String {
        let sym = settings.currency_symbol.as_str();
        let date = |d: NaiveDate| format_date(d, &settings.date_format);
        let mut output = String::new();

        // Header
        output.push_str(&format!(
            "Financial Report for {}: {} to {}\n",
            self.user_id,
            date(self.start_date),
            date(self.end_date)
        ));
        output.push_str(&double_separator(WIDTH));
        output.push('\n');
        output.push_str(&format!(
            "Total Income:      {:>14}  ({} transactions)\n",
            format_money(self.total_income, sym),
            self.total_income_transactions
        ));
        output.push_str(&format!(
            "Total Expenses:    {:>14}  ({} transactions)\n",
            format_money(self.total_expenses, sym),
            self.total_expense_transactions
        ));
        output.push_str(&format!(
            "Net:               {:>14}\n",
            format_money(self.net_amount, sym)
        ));
        output.push_str(&format!(
            "Savings Rate:      {:>14}\n",
            format_percentage(self.savings_rate)
        ));
        output.push_str(&format!(
            "Daily Average:     {:>14} in, {} out over {} days\n",
            format_money(self.average_daily_income, sym),
            format_money(self.average_daily_expense, sym),
            self.days_in_range
        ));
        output.push_str(&format!(
            "Largest:           {:>14} expense, {} income\n",
            format_money(self.largest_expense, sym),
            format_money(self.largest_income, sym)
        ));

        // Categories
        if !self.category_expenses.is_empty() {
            output.push_str("\nSPENDING BY CATEGORY\n");
            output.push_str(&format!(
                "{:<24} {:>12} {:>6} {:>12} {:>8}  {}\n",
                "Category", "Amount", "Count", "Average", "%", ""
            ));
            output.push_str(&separator(WIDTH));
            output.push('\n');
            for row in &self.category_expenses {
                output.push_str(&format!(
                    "{:<24} {:>12} {:>6} {:>12} {:>8}  {}\n",
                    truncate(&row.category_name, 24),
                    format_money(row.total_amount, sym),
                    row.expense_count,
                    format_money(row.average_amount, sym),
                    format_percentage(row.percentage_of_total),
                    format_bar(row.percentage_of_total, 100.0, 10)
                ));
            }
        }

        // Months
        output.push_str("\nMONTHLY TREND\n");
        output.push_str(&format!(
            "{:<10} {:>14} {:>14} {:>14}\n",
            "Month", "Income", "Expenses", "Net"
        ));
        output.push_str(&separator(WIDTH));
        output.push('\n');
        for month in &self.monthly_summaries {
            output.push_str(&format!(
                "{:<10} {:>14} {:>14} {:>14}\n",
                month.label,
                format_money(month.total_income, sym),
                format_money(month.total_expenses, sym),
                format_money(month.net_amount, sym)
            ));
        }

        // Budgets
        if let Some(budgets) = &self.budget_comparison {
            output.push_str("\nBUDGETS\n");
            output.push_str(&format!(
                "{:<22} {:>12} {:>12} {:>12} {:>9}\n",
                "Budget", "Budgeted", "Spent", "Remaining", "Used"
            ));
            output.push_str(&separator(WIDTH));
            output.push('\n');
            for row in &budgets.budgets {
                let marker = if row.is_over_budget { " *" } else { "" };
                output.push_str(&format!(
                    "{:<22} {:>12} {:>12} {:>12} {:>9}{}\n",
                    truncate(&row.name, 22),
                    format_money(row.budget_amount, sym),
                    format_money(row.spent, sym),
                    format_money(row.remaining_amount, sym),
                    format_percentage(row.utilization_percentage),
                    marker
                ));
            }
            output.push_str(&separator(WIDTH));
            output.push('\n');
            output.push_str(&format!(
                "{:<22} {:>12} {:>12} {:>12} {:>9}\n",
                "TOTAL",
                format_money(budgets.total_budgeted, sym),
                format_money(budgets.total_spent, sym),
                format_money(budgets.total_remaining, sym),
                format_percentage(budgets.overall_utilization_percentage)
            ));
            if budgets.over_budget_count > 0 {
                output.push_str(&format!("* = Over budget ({})\n", budgets.over_budget_count));
            }
        }

        // Shared spending
        if !self.shared_expenses.is_empty() {
            output.push_str("\nSHARED EXPENSES\n");
            output.push_str(&format!(
                "{:<10} {:<11} {:<22} {:>11} {:>11} {:>11}\n",
                "Date", "Type", "Description", "Total", "Your Share", "Net"
            ));
            output.push_str(&separator(WIDTH));
            output.push('\n');
            for item in &self.shared_expenses {
                output.push_str(&format!(
                    "{:<10} {:<11} {:<22} {:>11} {:>11} {:>11}\n",
                    date(item.date),
                    item.source.kind(),
                    truncate(&item.description, 22),
                    format_money(item.total_amount, sym),
                    format_money(item.user_share, sym),
                    format_money(item.net_contribution, sym)
                ));
            }
        }

        for group in &self.groups {
            output.push_str(&format!(
                "\nGroup {} ({}, {} members): {} expenses, balance {}\n",
                group.name,
                group.role,
                group.member_count,
                group.shared_expense_count,
                format_money(group.net_balance, sym)
            ));
        }

        output.push_str(&separator(WIDTH));
        output.push('\n');
        output.push_str(&format!(
            "Shared balance: {}\n",
            format_money(self.total_shared_expenses, sym)
        ));

        output
    }
}

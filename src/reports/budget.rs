//! Budget utilization
//!
//! Evaluates each budget against the part of its window that overlaps the
//! report range.

use chrono::NaiveDate;
use serde::Serialize;
use tracing::warn;

use super::{percentage, CategoryNames};
use crate::models::{Budget, BudgetId, CategoryId, DateRange, Expense, Money};

/// Utilization of one budget over its clipped window
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetUtilization {
    pub budget_id: BudgetId,
    pub name: String,
    pub category_id: CategoryId,
    pub category_name: String,
    pub budget_amount: Money,
    /// First day of the budget window that lies inside the report range
    pub overlap_start: NaiveDate,
    /// Last day of the budget window that lies inside the report range
    pub overlap_end: NaiveDate,
    pub spent: Money,
    pub remaining_amount: Money,
    pub utilization_percentage: f64,
    pub is_over_budget: bool,
}

impl BudgetUtilization {
    /// Evaluate one budget, or `None` if its window misses `range`
    pub fn evaluate(
        budget: &Budget,
        expenses: &[Expense],
        range: &DateRange,
        names: &CategoryNames,
    ) -> Option<Self> {
        let overlap = range.intersect(budget.start_date, budget.end_date)?;

        let spent: Money = expenses
            .iter()
            .filter(|e| e.category_id == Some(budget.category_id) && overlap.contains(e.date))
            .map(|e| e.amount)
            .sum();

        Some(Self {
            budget_id: budget.id,
            name: budget.name.clone(),
            category_id: budget.category_id,
            category_name: names.resolve(Some(budget.category_id)).to_string(),
            budget_amount: budget.amount,
            overlap_start: overlap.start(),
            overlap_end: overlap.end(),
            spent,
            remaining_amount: budget.amount - spent,
            utilization_percentage: percentage(spent, budget.amount),
            is_over_budget: spent > budget.amount,
        })
    }
}

/// Budgets against actual spending for the report range
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetComparison {
    pub budgets: Vec<BudgetUtilization>,
    pub total_budgeted: Money,
    pub total_spent: Money,
    pub total_remaining: Money,
    pub overall_utilization_percentage: f64,
    pub over_budget_count: usize,
}

impl BudgetComparison {
    /// Compare every budget overlapping `range`
    ///
    /// Returns `None` when no budget overlaps, so "no budgets" is not
    /// confused with "budgets fully unspent". Budgets with an inverted
    /// window are skipped.
    pub fn calculate(
        budgets: &[Budget],
        expenses: &[Expense],
        range: &DateRange,
        names: &CategoryNames,
    ) -> Option<Self> {
        let rows: Vec<BudgetUtilization> = budgets
            .iter()
            .filter(|b| {
                if !b.has_valid_window() {
                    warn!(
                        budget = %b.id,
                        start = %b.start_date,
                        end = %b.end_date,
                        "Skipping budget with inverted window"
                    );
                    return false;
                }
                true
            })
            .filter_map(|b| BudgetUtilization::evaluate(b, expenses, range, names))
            .collect();

        if rows.is_empty() {
            return None;
        }

        let total_budgeted: Money = rows.iter().map(|r| r.budget_amount).sum();
        let total_spent: Money = rows.iter().map(|r| r.spent).sum();

        Some(Self {
            over_budget_count: rows.iter().filter(|r| r.is_over_budget).count(),
            total_remaining: total_budgeted - total_spent,
            overall_utilization_percentage: percentage(total_spent, total_budgeted),
            total_budgeted,
            total_spent,
            budgets: rows,
        })
    }
}

//! Category breakdown
//!
//! Groups expenses by category reference and computes per-category totals.

use std::collections::BTreeMap;

use serde::Serialize;

use super::{percentage, CategoryNames};
use crate::models::{CategoryId, Expense, Money};

/// Spending for one category
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryBreakdown {
    /// `None` for the uncategorized bucket
    pub category_id: Option<CategoryId>,
    pub category_name: String,
    pub total_amount: Money,
    pub expense_count: usize,
    pub average_amount: Money,
    pub percentage_of_total: f64,
}

impl CategoryBreakdown {
    /// Break `expenses` down by category, largest total first
    ///
    /// Expenses without a category land in one uncategorized bucket so the
    /// percentages always cover the whole of `grand_total`. Ties on total are
    /// broken by category id, with the uncategorized bucket first.
    pub fn calculate(
        expenses: &[Expense],
        grand_total: Money,
        names: &CategoryNames,
    ) -> Vec<CategoryBreakdown> {
        let mut buckets: BTreeMap<Option<CategoryId>, (Money, usize)> = BTreeMap::new();
        for expense in expenses {
            let entry = buckets
                .entry(expense.category_id)
                .or_insert((Money::zero(), 0));
            entry.0 += expense.amount;
            entry.1 += 1;
        }

        let mut rows: Vec<CategoryBreakdown> = buckets
            .into_iter()
            .map(|(category_id, (total, count))| CategoryBreakdown {
                category_id,
                category_name: names.resolve(category_id).to_string(),
                total_amount: total,
                expense_count: count,
                average_amount: total.average(count),
                percentage_of_total: percentage(total, grand_total),
            })
            .collect();

        // Stable sort keeps id order among equal totals
        rows.sort_by(|a, b| b.total_amount.cmp(&a.total_amount));
        rows
    }
}

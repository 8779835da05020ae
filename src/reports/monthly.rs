//! Monthly trend
//!
//! Partitions the report range into calendar months and totals income and
//! expenses per month.

use chrono::NaiveDate;
use serde::Serialize;

use crate::models::{DateRange, Expense, Income, Money};

/// Totals for one calendar month, clipped to the report range
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlySummary {
    pub year: i32,
    pub month: u32,
    /// `YYYY-MM`
    pub label: String,
    pub period_start: NaiveDate,
    pub period_end: NaiveDate,
    pub total_income: Money,
    pub total_expenses: Money,
    pub net_amount: Money,
    pub income_count: usize,
    pub expense_count: usize,
}

impl MonthlySummary {
    /// One summary per month touched by `range`, oldest first
    ///
    /// Empty months are still emitted with zero totals.
    pub fn calculate(range: &DateRange, expenses: &[Expense], incomes: &[Income]) -> Vec<Self> {
        range
            .months()
            .into_iter()
            .map(|span| {
                let (total_income, income_count) = incomes
                    .iter()
                    .filter(|i| span.contains(i.date))
                    .fold((Money::zero(), 0), |(sum, n), i| (sum + i.amount, n + 1));
                let (total_expenses, expense_count) = expenses
                    .iter()
                    .filter(|e| span.contains(e.date))
                    .fold((Money::zero(), 0), |(sum, n), e| (sum + e.amount, n + 1));

                MonthlySummary {
                    year: span.year,
                    month: span.month,
                    label: span.label(),
                    period_start: span.start,
                    period_end: span.end,
                    total_income,
                    total_expenses,
                    net_amount: total_income - total_expenses,
                    income_count,
                    expense_count,
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_buckets_clip_and_total() {
        let range = DateRange::new(d(2025, 1, 15), d(2025, 3, 10)).unwrap();
        let expenses = vec![
            Expense::new("alice", "a", Money::from_cents(1000), d(2025, 1, 15)),
            Expense::new("alice", "b", Money::from_cents(2000), d(2025, 1, 31)),
            Expense::new("alice", "c", Money::from_cents(500), d(2025, 3, 10)),
        ];
        let incomes = vec![Income::new("alice", "Salary", Money::from_cents(9000), d(2025, 2, 1))];

        let months = MonthlySummary::calculate(&range, &expenses, &incomes);

        assert_eq!(months.len(), 3);
        assert_eq!(months[0].label, "2025-01");
        assert_eq!(months[0].period_start, d(2025, 1, 15));
        assert_eq!(months[0].total_expenses.cents(), 3000);
        assert_eq!(months[0].expense_count, 2);
        assert_eq!(months[0].net_amount.cents(), -3000);

        assert_eq!(months[1].total_income.cents(), 9000);
        assert_eq!(months[1].total_expenses, Money::zero());
        assert_eq!(months[1].net_amount.cents(), 9000);

        assert_eq!(months[2].period_end, d(2025, 3, 10));
        assert_eq!(months[2].total_expenses.cents(), 500);
    }

    #[test]
    fn test_empty_months_are_emitted() {
        let range = DateRange::new(d(2024, 11, 1), d(2025, 1, 31)).unwrap();
        let months = MonthlySummary::calculate(&range, &[], &[]);

        assert_eq!(months.len(), 3);
        assert!(months.iter().all(|m| m.total_income.is_zero() && m.total_expenses.is_zero()));
        assert_eq!(months[2].label, "2025-01");
    }

    #[test]
    fn test_spending_on_the_last_representable_date_is_counted() {
        let end = NaiveDate::MAX;
        let range = DateRange::new(end - chrono::Duration::days(40), end).unwrap();
        let expenses = vec![Expense::new("alice", "late", Money::from_cents(100), end)];

        let months = MonthlySummary::calculate(&range, &expenses, &[]);
        let total: Money = months.iter().map(|m| m.total_expenses).sum();

        assert_eq!(total.cents(), 100);
        assert_eq!(months.last().unwrap().period_end, end);
    }
}

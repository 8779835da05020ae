//! Budget model
//!
//! A spending limit for one category over an inclusive date window.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::ids::{BudgetId, CategoryId, UserId};
use super::money::Money;
use crate::error::{FinTrackError, FinTrackResult};

/// A category budget over `[start_date, end_date]`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Budget {
    /// Unique identifier
    pub id: BudgetId,

    /// Display name
    pub name: String,

    /// Amount allotted for the whole window
    pub amount: Money,

    /// First day of the budget window
    pub start_date: NaiveDate,

    /// Last day of the budget window (inclusive)
    pub end_date: NaiveDate,

    /// The category whose expenses count against this budget
    pub category_id: CategoryId,

    /// The user who owns the budget
    pub user_id: UserId,
}

impl Budget {
    /// Create a new budget
    pub fn new(
        user_id: impl Into<UserId>,
        name: impl Into<String>,
        category_id: CategoryId,
        amount: Money,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Self {
        Self {
            id: BudgetId::new(),
            name: name.into(),
            amount,
            start_date,
            end_date,
            category_id,
            user_id: user_id.into(),
        }
    }

    /// Check that the window is not inverted
    pub fn has_valid_window(&self) -> bool {
        self.start_date <= self.end_date
    }

    /// Validate the budget
    pub fn validate(&self) -> FinTrackResult<()> {
        if !self.has_valid_window() {
            return Err(FinTrackError::Validation(format!(
                "Budget '{}' starts on {} after it ends on {}",
                self.name, self.start_date, self.end_date
            )));
        }
        if self.amount.is_negative() {
            return Err(FinTrackError::Validation(format!(
                "Budget '{}' cannot have a negative amount",
                self.name
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, m, day).unwrap()
    }

    #[test]
    fn test_valid_budget() {
        let budget = Budget::new(
            "alice",
            "Food",
            CategoryId::new(),
            Money::from_cents(50000),
            d(1, 1),
            d(1, 31),
        );
        assert!(budget.validate().is_ok());
    }

    #[test]
    fn test_inverted_window_is_invalid() {
        let budget = Budget::new(
            "alice",
            "Food",
            CategoryId::new(),
            Money::from_cents(50000),
            d(2, 1),
            d(1, 1),
        );
        assert!(!budget.has_valid_window());
        assert!(budget.validate().unwrap_err().is_validation());
    }
}

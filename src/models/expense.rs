//! Expense model
//!
//! A personal expense recorded by a user. Expenses are created and edited by
//! the CRUD layer; the reporting engine only reads them.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::ids::{CategoryId, ExpenseId, UserId};
use super::money::Money;
use crate::error::{FinTrackError, FinTrackResult};

/// A personal expense
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    /// Unique identifier
    pub id: ExpenseId,

    /// What the money was spent on
    pub description: String,

    /// Amount spent (always positive)
    pub amount: Money,

    /// Date of the expense
    pub date: NaiveDate,

    /// Optional free-form notes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,

    /// Category reference (None for uncategorized spend)
    #[serde(default)]
    pub category_id: Option<CategoryId>,

    /// The user who owns the expense
    pub user_id: UserId,
}

impl Expense {
    /// Create a new uncategorized expense
    pub fn new(
        user_id: impl Into<UserId>,
        description: impl Into<String>,
        amount: Money,
        date: NaiveDate,
    ) -> Self {
        Self {
            id: ExpenseId::new(),
            description: description.into(),
            amount,
            date,
            notes: None,
            category_id: None,
            user_id: user_id.into(),
        }
    }

    /// Assign a category
    pub fn with_category(mut self, category_id: CategoryId) -> Self {
        self.category_id = Some(category_id);
        self
    }

    /// Attach notes
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    /// Check if the expense is owned by the given user
    pub fn is_owned_by(&self, user_id: &UserId) -> bool {
        &self.user_id == user_id
    }

    /// Validate the expense
    pub fn validate(&self) -> FinTrackResult<()> {
        if !self.amount.is_positive() {
            return Err(FinTrackError::Validation(format!(
                "Expense '{}' must have a positive amount, got {}",
                self.description, self.amount
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, 15).unwrap()
    }

    #[test]
    fn test_new_expense() {
        let category = CategoryId::new();
        let expense = Expense::new("alice", "Groceries", Money::from_cents(4250), date())
            .with_category(category)
            .with_notes("weekly shop");

        assert_eq!(expense.category_id, Some(category));
        assert_eq!(expense.notes.as_deref(), Some("weekly shop"));
        assert!(expense.is_owned_by(&UserId::from("alice")));
        assert!(expense.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_non_positive_amount() {
        let expense = Expense::new("alice", "Refund", Money::zero(), date());
        assert!(expense.validate().unwrap_err().is_validation());
    }

    #[test]
    fn test_missing_category_deserializes_as_none() {
        let json = format!(
            r#"{{"id":"{}","description":"Taxi","amount":1200,"date":"2025-01-15","user_id":"bob"}}"#,
            ExpenseId::new().as_uuid()
        );
        let expense: Expense = serde_json::from_str(&json).unwrap();
        assert!(expense.category_id.is_none());
        assert!(expense.notes.is_none());
    }
}

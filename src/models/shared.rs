//! Shared spending models
//!
//! Two ways spending is shared between users:
//! - [`SharedExpense`]: paid in full by one group member for the whole group
//! - [`ExpenseShare`]: a bilateral split of one personal expense

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::ids::{ExpenseId, ExpenseShareId, GroupId, SharedExpenseId, UserId};
use super::money::Money;

/// An expense paid by one member on behalf of a whole group
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SharedExpense {
    pub id: SharedExpenseId,

    /// The group the expense is split across
    pub group_id: GroupId,

    pub description: String,

    /// Full amount paid
    pub total_amount: Money,

    pub date: NaiveDate,

    /// The member who paid
    pub paid_by: UserId,
}

impl SharedExpense {
    /// Create a new group expense
    pub fn new(
        group_id: GroupId,
        paid_by: impl Into<UserId>,
        description: impl Into<String>,
        total_amount: Money,
        date: NaiveDate,
    ) -> Self {
        Self {
            id: SharedExpenseId::new(),
            group_id,
            description: description.into(),
            total_amount,
            date,
            paid_by: paid_by.into(),
        }
    }
}

/// One personal expense split with exactly one other user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseShare {
    pub id: ExpenseShareId,

    /// The personal expense being split
    pub expense_id: ExpenseId,

    /// The user the expense is shared with
    pub shared_with: UserId,

    /// Amount the shared-with user owes the expense owner
    pub share_amount: Money,

    /// Whether the share has been paid back
    #[serde(default)]
    pub is_paid: bool,
}

impl ExpenseShare {
    /// Create an unpaid share
    pub fn new(expense_id: ExpenseId, shared_with: impl Into<UserId>, share_amount: Money) -> Self {
        Self {
            id: ExpenseShareId::new(),
            expense_id,
            shared_with: shared_with.into(),
            share_amount,
            is_paid: false,
        }
    }

    /// Mark the share as paid
    pub fn paid(mut self) -> Self {
        self.is_paid = true;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_share_defaults_to_unpaid() {
        let share = ExpenseShare::new(ExpenseId::new(), "bob", Money::from_cents(2500));
        assert!(!share.is_paid);
        assert!(share.paid().is_paid);
    }

    #[test]
    fn test_is_paid_defaults_when_missing() {
        let json = format!(
            r#"{{"id":"{}","expense_id":"{}","shared_with":"bob","share_amount":2500}}"#,
            ExpenseShareId::new().as_uuid(),
            ExpenseId::new().as_uuid()
        );
        let share: ExpenseShare = serde_json::from_str(&json).unwrap();
        assert!(!share.is_paid);
    }
}

//! Income model
//!
//! Money received by a user from a labelled source.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::ids::{IncomeId, UserId};
use super::money::Money;

/// A personal income record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Income {
    pub id: IncomeId,

    /// Source label (e.g. "Salary")
    pub source: String,

    /// Amount received (always positive)
    pub amount: Money,

    pub date: NaiveDate,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// The user who received the income
    pub user_id: UserId,
}

impl Income {
    /// Create a new income record
    pub fn new(
        user_id: impl Into<UserId>,
        source: impl Into<String>,
        amount: Money,
        date: NaiveDate,
    ) -> Self {
        Self {
            id: IncomeId::new(),
            source: source.into(),
            amount,
            date,
            description: None,
            user_id: user_id.into(),
        }
    }

    /// Attach a description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Label used when listing the income alongside expenses
    pub fn display_label(&self) -> &str {
        self.description.as_deref().unwrap_or(&self.source)
    }
}

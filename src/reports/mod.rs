//! Reports module for FinTrack
//!
//! The calculators each derive one section of the financial report from an
//! already-loaded [`RecordSet`](crate::loader::RecordSet). They are total
//! functions: sparse or odd data yields zeros or omissions, never errors.
//! [`FinancialReport`] assembles them into the single report value.

pub mod budget;
pub mod category;
pub mod financial;
pub mod monthly;
pub mod settlement;

pub use budget::{BudgetComparison, BudgetUtilization};
pub use category::CategoryBreakdown;
pub use financial::FinancialReport;
pub use monthly::MonthlySummary;
pub use settlement::{
    settle_group_expense, GroupSummary, MemberView, ParticipantNet, SettlementItem,
    SettlementSource, SettlementSummary,
};

use std::collections::BTreeMap;

use crate::config::Settings;
use crate::models::{Category, CategoryId, Money};

/// `part / whole * 100`, rounded to two decimal places
///
/// A zero `whole` yields `0.0`.
pub fn percentage(part: Money, whole: Money) -> f64 {
    if whole.is_zero() {
        return 0.0;
    }
    round2(part.cents() as f64 / whole.cents() as f64 * 100.0)
}

pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Resolves display names for category references
///
/// Holds the one place where missing names get their default labels.
#[derive(Debug, Clone)]
pub struct CategoryNames {
    names: BTreeMap<CategoryId, String>,
    uncategorized: String,
    unknown: String,
}

impl CategoryNames {
    pub fn new(
        categories: &BTreeMap<CategoryId, Category>,
        uncategorized: impl Into<String>,
        unknown: impl Into<String>,
    ) -> Self {
        Self {
            names: categories
                .iter()
                .map(|(id, c)| (*id, c.name.clone()))
                .collect(),
            uncategorized: uncategorized.into(),
            unknown: unknown.into(),
        }
    }

    /// Build with the labels configured in settings
    pub fn from_settings(categories: &BTreeMap<CategoryId, Category>, settings: &Settings) -> Self {
        Self::new(
            categories,
            settings.uncategorized_label.clone(),
            settings.unknown_category_label.clone(),
        )
    }

    /// Name for an optional category reference
    pub fn resolve(&self, id: Option<CategoryId>) -> &str {
        match id {
            None => self.uncategorized.as_str(),
            Some(id) => self.names.get(&id).unwrap_or(&self.unknown).as_str(),
        }
    }
}

//! Core data models for FinTrack
//!
//! The input records the reporting engine reads (expenses, incomes, budgets,
//! groups, shared spending) plus the value types they are built from.

pub mod budget;
pub mod category;
pub mod date_range;
pub mod expense;
pub mod group;
pub mod ids;
pub mod income;
pub mod money;
pub mod shared;

pub use budget::Budget;
pub use category::Category;
pub use date_range::{DateRange, MonthSpan};
pub use expense::Expense;
pub use group::{Group, GroupMember, MemberRole};
pub use ids::{
    BudgetId, CategoryId, ExpenseId, ExpenseShareId, GroupId, IncomeId, SharedExpenseId, UserId,
};
pub use income::Income;
pub use money::Money;
pub use shared::{ExpenseShare, SharedExpense};

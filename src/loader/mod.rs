//! RecordSet loader
//!
//! Pulls every collection a report needs for one `(user, range)` request out
//! of a [`RecordSource`] and freezes them into an immutable [`RecordSet`].
//! This is the only place the report engine performs I/O; the calculators
//! read the loaded snapshot and never go back to the source.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;
use tracing::{debug, info};

use crate::error::FinTrackResult;
use crate::models::{
    Budget, Category, CategoryId, DateRange, Expense, ExpenseId, ExpenseShare, Group, GroupId,
    Income, Money, SharedExpense, UserId,
};

/// Read-only access to persisted records
///
/// Implemented by the persistence layer. Every method returns an empty
/// collection, not an error, when nothing matches.
pub trait RecordSource: Sync {
    /// The user's expenses dated inside the range
    fn expenses_in_range(&self, user: &UserId, range: &DateRange) -> FinTrackResult<Vec<Expense>>;

    /// The user's incomes dated inside the range
    fn incomes_in_range(&self, user: &UserId, range: &DateRange) -> FinTrackResult<Vec<Income>>;

    /// The user's budgets whose window shares at least one day with the range
    fn budgets_overlapping(&self, user: &UserId, range: &DateRange) -> FinTrackResult<Vec<Budget>>;

    /// Categories owned by the user
    fn categories_for_user(&self, user: &UserId) -> FinTrackResult<Vec<Category>>;

    /// Groups the user is currently a member of
    fn groups_for_user(&self, user: &UserId) -> FinTrackResult<Vec<Group>>;

    /// Group expenses dated inside the range for the given groups
    ///
    /// Fails with `NotAuthorized` if the user is not a member of one of them.
    fn shared_expenses_in_range(
        &self,
        user: &UserId,
        group_ids: &[GroupId],
        range: &DateRange,
    ) -> FinTrackResult<Vec<SharedExpense>>;

    /// Expense shares the user owns or is shared with, whose underlying
    /// expense is dated inside the range
    fn expense_shares_for_user(
        &self,
        user: &UserId,
        range: &DateRange,
    ) -> FinTrackResult<Vec<ExpenseShare>>;

    /// Expenses by id, regardless of owner; unknown ids are skipped
    fn expenses_by_ids(&self, ids: &[ExpenseId]) -> FinTrackResult<Vec<Expense>>;
}

/// Direction of a ledger entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    Income,
    Expense,
}

/// One income or expense in the signed ledger view
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerEntry {
    /// Id of the underlying income or expense
    pub id: String,
    pub kind: EntryKind,
    pub description: String,
    /// Positive for income, negated for expenses
    pub amount: Money,
    pub date: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<CategoryId>,
}

/// Immutable snapshot of all records for one report request
#[derive(Debug, Clone)]
pub struct RecordSet {
    pub user_id: UserId,
    pub range: DateRange,
    pub expenses: Vec<Expense>,
    pub incomes: Vec<Income>,
    pub budgets: Vec<Budget>,
    /// Signed ledger of `incomes` and `expenses`, newest first
    pub transactions: Vec<LedgerEntry>,
    pub shared_expenses: Vec<SharedExpense>,
    pub expense_shares: Vec<ExpenseShare>,
    /// Category lookup for the user's categories
    pub categories: BTreeMap<CategoryId, Category>,
    /// Lookup of the groups the user belongs to
    pub groups: BTreeMap<GroupId, Group>,
    /// Underlying expenses of `expense_shares`, which may belong to other users
    pub share_expenses: BTreeMap<ExpenseId, Expense>,
}

impl RecordSet {
    /// Assemble a snapshot from already-loaded collections
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        user_id: UserId,
        range: DateRange,
        expenses: Vec<Expense>,
        incomes: Vec<Income>,
        budgets: Vec<Budget>,
        categories: Vec<Category>,
        groups: Vec<Group>,
        shared_expenses: Vec<SharedExpense>,
        expense_shares: Vec<ExpenseShare>,
        share_expenses: Vec<Expense>,
    ) -> Self {
        let transactions = build_ledger(&incomes, &expenses);
        Self {
            user_id,
            range,
            expenses,
            incomes,
            budgets,
            transactions,
            shared_expenses,
            expense_shares,
            categories: categories.into_iter().map(|c| (c.id, c)).collect(),
            groups: groups.into_iter().map(|g| (g.id, g)).collect(),
            share_expenses: share_expenses.into_iter().map(|e| (e.id, e)).collect(),
        }
    }

    /// Snapshot with no records, for a user with nothing recorded
    pub fn empty(user_id: UserId, range: DateRange) -> Self {
        Self::new(
            user_id,
            range,
            Vec::new(),
            Vec::new(),
            Vec::new(),
            Vec::new(),
            Vec::new(),
            Vec::new(),
            Vec::new(),
            Vec::new(),
        )
    }
}

fn build_ledger(incomes: &[Income], expenses: &[Expense]) -> Vec<LedgerEntry> {
    let mut ledger: Vec<LedgerEntry> = incomes
        .iter()
        .map(|i| LedgerEntry {
            id: i.id.as_uuid().to_string(),
            kind: EntryKind::Income,
            description: i.display_label().to_string(),
            amount: i.amount,
            date: i.date,
            category_id: None,
        })
        .chain(expenses.iter().map(|e| LedgerEntry {
            id: e.id.as_uuid().to_string(),
            kind: EntryKind::Expense,
            description: e.description.clone(),
            amount: -e.amount,
            date: e.date,
            category_id: e.category_id,
        }))
        .collect();

    ledger.sort_by(|a, b| b.date.cmp(&a.date).then_with(|| a.id.cmp(&b.id)));
    ledger
}

/// Loads [`RecordSet`]s from a [`RecordSource`]
pub struct RecordSetLoader<'a, S: RecordSource> {
    source: &'a S,
}

type Personal = (Vec<Expense>, Vec<Income>);
type Planning = (Vec<Budget>, Vec<Category>);
type Groups = (Vec<Group>, Vec<SharedExpense>);
type Shares = (Vec<ExpenseShare>, Vec<Expense>);

impl<'a, S: RecordSource> RecordSetLoader<'a, S> {
    pub fn new(source: &'a S) -> Self {
        Self { source }
    }

    /// Load every record needed for a report on `user` over `[start, end]`
    ///
    /// The range is validated before any read. Independent reads run
    /// concurrently and are all joined before the snapshot is built; any
    /// failing read fails the whole load.
    pub fn load(
        &self,
        user: &UserId,
        start: NaiveDate,
        end: NaiveDate,
    ) -> FinTrackResult<RecordSet> {
        let range = DateRange::new(start, end)?;
        self.load_range(user, range)
    }

    /// Load for an already validated range
    pub fn load_range(&self, user: &UserId, range: DateRange) -> FinTrackResult<RecordSet> {
        let ((personal, planning), (groups, shares)) = rayon::join(
            || {
                rayon::join(
                    || self.load_personal(user, &range),
                    || self.load_planning(user, &range),
                )
            },
            || {
                rayon::join(
                    || self.load_groups(user, &range),
                    || self.load_shares(user, &range),
                )
            },
        );

        let (expenses, incomes) = personal?;
        let (budgets, categories) = planning?;
        let (groups, shared_expenses) = groups?;
        let (expense_shares, share_expenses) = shares?;

        info!(
            user = %user,
            range = %range,
            expenses = expenses.len(),
            incomes = incomes.len(),
            budgets = budgets.len(),
            groups = groups.len(),
            shared_expenses = shared_expenses.len(),
            expense_shares = expense_shares.len(),
            "Loaded record set"
        );

        Ok(RecordSet::new(
            user.clone(),
            range,
            expenses,
            incomes,
            budgets,
            categories,
            groups,
            shared_expenses,
            expense_shares,
            share_expenses,
        ))
    }

    fn load_personal(&self, user: &UserId, range: &DateRange) -> FinTrackResult<Personal> {
        let (expenses, incomes) = rayon::join(
            || self.source.expenses_in_range(user, range),
            || self.source.incomes_in_range(user, range),
        );
        let (expenses, incomes) = (expenses?, incomes?);
        debug!(expenses = expenses.len(), incomes = incomes.len(), "Loaded personal records");
        Ok((expenses, incomes))
    }

    fn load_planning(&self, user: &UserId, range: &DateRange) -> FinTrackResult<Planning> {
        let (budgets, categories) = rayon::join(
            || self.source.budgets_overlapping(user, range),
            || self.source.categories_for_user(user),
        );
        let (budgets, categories) = (budgets?, categories?);
        debug!(budgets = budgets.len(), categories = categories.len(), "Loaded budgets");
        Ok((budgets, categories))
    }

    fn load_groups(&self, user: &UserId, range: &DateRange) -> FinTrackResult<Groups> {
        let groups = self.source.groups_for_user(user)?;
        let group_ids: Vec<GroupId> = groups.iter().map(|g| g.id).collect();
        let shared = if group_ids.is_empty() {
            Vec::new()
        } else {
            self.source.shared_expenses_in_range(user, &group_ids, range)?
        };
        debug!(groups = groups.len(), shared_expenses = shared.len(), "Loaded group records");
        Ok((groups, shared))
    }

    fn load_shares(&self, user: &UserId, range: &DateRange) -> FinTrackResult<Shares> {
        let shares = self.source.expense_shares_for_user(user, range)?;
        let mut ids: Vec<ExpenseId> = shares.iter().map(|s| s.expense_id).collect();
        ids.sort();
        ids.dedup();
        let expenses = if ids.is_empty() {
            Vec::new()
        } else {
            self.source.expenses_by_ids(&ids)?
        };
        debug!(expense_shares = shares.len(), "Loaded expense shares");
        Ok((shares, expenses))
    }
}

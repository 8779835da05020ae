//! Storage layer for FinTrack
//!
//! JSON file storage for the records the report engine reads. The CRUD
//! application owns these files; here they are loaded into memory and served
//! read-only through [`RecordSource`].

pub mod file_io;
pub mod init;
pub mod repository;

pub use file_io::{read_records, write_records_atomic};
pub use init::initialize_storage;
pub use repository::{Record, Repository};

use std::collections::BTreeSet;

use tracing::debug;

use crate::config::paths::FinTrackPaths;
use crate::error::{FinTrackError, FinTrackResult};
use crate::loader::RecordSource;
use crate::models::{
    Budget, Category, DateRange, Expense, ExpenseId, ExpenseShare, Group, GroupId, Income,
    SharedExpense, UserId,
};

/// Main storage coordinator that provides access to all repositories
pub struct Storage {
    paths: FinTrackPaths,
    pub expenses: Repository<Expense>,
    pub incomes: Repository<Income>,
    pub categories: Repository<Category>,
    pub budgets: Repository<Budget>,
    pub groups: Repository<Group>,
    pub shared_expenses: Repository<SharedExpense>,
    pub expense_shares: Repository<ExpenseShare>,
}

impl Storage {
    /// Create a new Storage instance
    pub fn new(paths: FinTrackPaths) -> Result<Self, FinTrackError> {
        paths.ensure_directories()?;

        Ok(Self {
            expenses: Repository::new(paths.expenses_file()),
            incomes: Repository::new(paths.incomes_file()),
            categories: Repository::new(paths.categories_file()),
            budgets: Repository::new(paths.budgets_file()),
            groups: Repository::new(paths.groups_file()),
            shared_expenses: Repository::new(paths.shared_expenses_file()),
            expense_shares: Repository::new(paths.expense_shares_file()),
            paths,
        })
    }

    /// Get the paths configuration
    pub fn paths(&self) -> &FinTrackPaths {
        &self.paths
    }

    /// Load all data from disk
    pub fn load_all(&mut self) -> Result<(), FinTrackError> {
        self.expenses.load()?;
        self.incomes.load()?;
        self.categories.load()?;
        self.budgets.load()?;
        self.groups.load()?;
        self.shared_expenses.load()?;
        self.expense_shares.load()?;
        Ok(())
    }

    /// Save all data to disk
    pub fn save_all(&self) -> Result<(), FinTrackError> {
        self.expenses.save()?;
        self.incomes.save()?;
        self.categories.save()?;
        self.budgets.save()?;
        self.groups.save()?;
        self.shared_expenses.save()?;
        self.expense_shares.save()?;
        Ok(())
    }
}

impl RecordSource for Storage {
    fn expenses_in_range(&self, user: &UserId, range: &DateRange) -> FinTrackResult<Vec<Expense>> {
        self.expenses
            .filter(|e| &e.user_id == user && range.contains(e.date))
    }

    fn incomes_in_range(&self, user: &UserId, range: &DateRange) -> FinTrackResult<Vec<Income>> {
        self.incomes
            .filter(|i| &i.user_id == user && range.contains(i.date))
    }

    fn budgets_overlapping(&self, user: &UserId, range: &DateRange) -> FinTrackResult<Vec<Budget>> {
        self.budgets
            .filter(|b| &b.user_id == user && range.overlaps(b.start_date, b.end_date))
    }

    fn categories_for_user(&self, user: &UserId) -> FinTrackResult<Vec<Category>> {
        self.categories.filter(|c| &c.user_id == user)
    }

    fn groups_for_user(&self, user: &UserId) -> FinTrackResult<Vec<Group>> {
        self.groups.filter(|g| g.is_member(user))
    }

    fn shared_expenses_in_range(
        &self,
        user: &UserId,
        group_ids: &[GroupId],
        range: &DateRange,
    ) -> FinTrackResult<Vec<SharedExpense>> {
        for group_id in group_ids {
            let group = self
                .groups
                .get(*group_id)?
                .ok_or_else(|| FinTrackError::group_not_found(group_id.to_string()))?;
            if !group.is_member(user) {
                return Err(FinTrackError::not_authorized(user.as_str(), group_id));
            }
        }

        let wanted: BTreeSet<GroupId> = group_ids.iter().copied().collect();
        self.shared_expenses
            .filter(|s| wanted.contains(&s.group_id) && range.contains(s.date))
    }

    fn expense_shares_for_user(
        &self,
        user: &UserId,
        range: &DateRange,
    ) -> FinTrackResult<Vec<ExpenseShare>> {
        let mut touching = Vec::new();
        for share in self.expense_shares.all()? {
            let Some(expense) = self.expenses.get(share.expense_id)? else {
                debug!(share = %share.id, expense = %share.expense_id, "Share references a missing expense");
                continue;
            };
            let involved = &share.shared_with == user || expense.is_owned_by(user);
            if involved && range.contains(expense.date) {
                touching.push(share);
            }
        }
        Ok(touching)
    }

    fn expenses_by_ids(&self, ids: &[ExpenseId]) -> FinTrackResult<Vec<Expense>> {
        let mut found = Vec::with_capacity(ids.len());
        for id in ids {
            if let Some(expense) = self.expenses.get(*id)? {
                found.push(expense);
            }
        }
        Ok(found)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CategoryId, MemberRole, Money};
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn d(m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, m, day).unwrap()
    }

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = FinTrackPaths::with_base_dir(temp_dir.path().to_path_buf());
        let mut storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();
        (temp_dir, storage)
    }

    fn january() -> DateRange {
        DateRange::new(d(1, 1), d(1, 31)).unwrap()
    }

    #[test]
    fn test_storage_creation() {
        let (temp_dir, _storage) = create_test_storage();
        assert!(temp_dir.path().join("data").exists());
    }

    #[test]
    fn test_expenses_in_range_is_inclusive_and_per_user() {
        let (_temp_dir, storage) = create_test_storage();
        let alice = UserId::from("alice");

        for (user, date) in [
            ("alice", d(1, 1)),
            ("alice", d(1, 31)),
            ("alice", d(2, 1)),
            ("bob", d(1, 15)),
        ] {
            storage
                .expenses
                .upsert(Expense::new(user, "x", Money::from_cents(100), date))
                .unwrap();
        }

        let found = storage.expenses_in_range(&alice, &january()).unwrap();
        assert_eq!(found.len(), 2);
    }

    #[test]
    fn test_budgets_overlapping_includes_budgets_starting_before_range() {
        let (_temp_dir, storage) = create_test_storage();
        let alice = UserId::from("alice");
        let cat = CategoryId::new();

        let straddling = Budget::new("alice", "January", cat, Money::from_cents(100), d(1, 1), d(1, 20));
        let mut earlier = straddling.clone();
        earlier.id = crate::models::BudgetId::new();
        earlier.start_date = NaiveDate::from_ymd_opt(2024, 12, 1).unwrap();
        earlier.end_date = NaiveDate::from_ymd_opt(2024, 12, 31).unwrap();

        storage.budgets.upsert(straddling.clone()).unwrap();
        storage.budgets.upsert(earlier).unwrap();

        let range = DateRange::new(d(1, 15), d(2, 15)).unwrap();
        let found = storage.budgets_overlapping(&alice, &range).unwrap();
        assert_eq!(found, vec![straddling]);
    }

    #[test]
    fn test_shared_expenses_require_membership() {
        let (_temp_dir, storage) = create_test_storage();
        let group = Group::new("Flat", "alice").with_member("bob", MemberRole::Member);
        storage.groups.upsert(group.clone()).unwrap();
        storage
            .shared_expenses
            .upsert(SharedExpense::new(group.id, "alice", "Rent", Money::from_cents(9000), d(1, 5)))
            .unwrap();

        let found = storage
            .shared_expenses_in_range(&UserId::from("bob"), &[group.id], &january())
            .unwrap();
        assert_eq!(found.len(), 1);

        let err = storage
            .shared_expenses_in_range(&UserId::from("mallory"), &[group.id], &january())
            .unwrap_err();
        assert!(err.is_not_authorized());

        let err = storage
            .shared_expenses_in_range(&UserId::from("bob"), &[GroupId::new()], &january())
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_expense_shares_touch_owner_and_sharee() {
        let (_temp_dir, storage) = create_test_storage();
        let dinner = Expense::new("alice", "Dinner", Money::from_cents(6000), d(1, 10));
        let old = Expense::new("alice", "Old", Money::from_cents(6000), d(2, 10));
        storage.expenses.upsert(dinner.clone()).unwrap();
        storage.expenses.upsert(old.clone()).unwrap();
        storage
            .expense_shares
            .upsert(ExpenseShare::new(dinner.id, "bob", Money::from_cents(3000)))
            .unwrap();
        storage
            .expense_shares
            .upsert(ExpenseShare::new(old.id, "bob", Money::from_cents(3000)))
            .unwrap();
        storage
            .expense_shares
            .upsert(ExpenseShare::new(ExpenseId::new(), "bob", Money::from_cents(100)))
            .unwrap();

        let for_alice = storage
            .expense_shares_for_user(&UserId::from("alice"), &january())
            .unwrap();
        let for_bob = storage
            .expense_shares_for_user(&UserId::from("bob"), &january())
            .unwrap();
        let for_carol = storage
            .expense_shares_for_user(&UserId::from("carol"), &january())
            .unwrap();

        assert_eq!(for_alice.len(), 1);
        assert_eq!(for_bob.len(), 1);
        assert!(for_carol.is_empty());

        let expenses = storage.expenses_by_ids(&[dinner.id, ExpenseId::new()]).unwrap();
        assert_eq!(expenses, vec![dinner]);
    }
}

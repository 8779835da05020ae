//! Generic JSON-file repository
//!
//! One repository per record collection. Records are kept in memory, keyed
//! by id in an ordered map so iteration order is stable across runs.

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use serde::{de::DeserializeOwned, Serialize};

use crate::error::FinTrackError;
use crate::models::{
    Budget, BudgetId, Category, CategoryId, Expense, ExpenseId, ExpenseShare, ExpenseShareId,
    Group, GroupId, Income, IncomeId, SharedExpense, SharedExpenseId,
};

use super::file_io::{read_records, write_records_atomic};

/// A persisted record with a typed id
pub trait Record: Clone + Serialize + DeserializeOwned + Send + Sync {
    type Id: Copy + Ord + Send + Sync;

    fn record_id(&self) -> Self::Id;
}

macro_rules! impl_record {
    ($record:ty, $id:ty) => {
        impl Record for $record {
            type Id = $id;

            fn record_id(&self) -> Self::Id {
                self.id
            }
        }
    };
}

impl_record!(Expense, ExpenseId);
impl_record!(Income, IncomeId);
impl_record!(Category, CategoryId);
impl_record!(Budget, BudgetId);
impl_record!(Group, GroupId);
impl_record!(SharedExpense, SharedExpenseId);
impl_record!(ExpenseShare, ExpenseShareId);

/// In-memory view of one record file
pub struct Repository<T: Record> {
    path: PathBuf,
    data: RwLock<BTreeMap<T::Id, T>>,
}

impl<T: Record> Repository<T> {
    /// Create an empty repository backed by `path`
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(BTreeMap::new()),
        }
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, BTreeMap<T::Id, T>>, FinTrackError> {
        self.data
            .read()
            .map_err(|e| FinTrackError::Storage(format!("Failed to acquire read lock: {}", e)))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, BTreeMap<T::Id, T>>, FinTrackError> {
        self.data
            .write()
            .map_err(|e| FinTrackError::Storage(format!("Failed to acquire write lock: {}", e)))
    }

    /// Replace the in-memory records with the file contents
    pub fn load(&self) -> Result<(), FinTrackError> {
        let records: Vec<T> = read_records(&self.path)?;
        let mut data = self.write()?;
        data.clear();
        for record in records {
            data.insert(record.record_id(), record);
        }
        Ok(())
    }

    /// Write the in-memory records back to the file
    pub fn save(&self) -> Result<(), FinTrackError> {
        let records = self.all()?;
        write_records_atomic(&self.path, &records)
    }

    /// Insert or replace a record
    pub fn upsert(&self, record: T) -> Result<(), FinTrackError> {
        self.write()?.insert(record.record_id(), record);
        Ok(())
    }

    /// Get a record by id
    pub fn get(&self, id: T::Id) -> Result<Option<T>, FinTrackError> {
        Ok(self.read()?.get(&id).cloned())
    }

    /// All records, in id order
    pub fn all(&self) -> Result<Vec<T>, FinTrackError> {
        Ok(self.read()?.values().cloned().collect())
    }

    /// Records matching a predicate, in id order
    pub fn filter<F>(&self, predicate: F) -> Result<Vec<T>, FinTrackError>
    where
        F: Fn(&T) -> bool,
    {
        Ok(self
            .read()?
            .values()
            .filter(|r| predicate(r))
            .cloned()
            .collect())
    }

    /// Number of records held
    pub fn count(&self) -> Result<usize, FinTrackError> {
        Ok(self.read()?.len())
    }
}

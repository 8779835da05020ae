//! Storage initialization
//!
//! First-run setup: the data directory plus one empty collection file per
//! record type, so the CRUD side and the report engine agree on the layout.

use std::path::PathBuf;

use tracing::info;

use crate::config::paths::FinTrackPaths;
use crate::error::FinTrackError;

use super::file_io::write_records_atomic;

fn collection_files(paths: &FinTrackPaths) -> [PathBuf; 7] {
    [
        paths.expenses_file(),
        paths.incomes_file(),
        paths.categories_file(),
        paths.budgets_file(),
        paths.groups_file(),
        paths.shared_expenses_file(),
        paths.expense_shares_file(),
    ]
}

/// Initialize storage for a fresh installation
///
/// Existing collection files are left untouched. Returns how many files
/// were created.
pub fn initialize_storage(paths: &FinTrackPaths) -> Result<usize, FinTrackError> {
    paths.ensure_directories()?;

    let mut created = 0;
    for file in collection_files(paths) {
        if !file.exists() {
            write_records_atomic::<serde_json::Value, _>(&file, &[])?;
            created += 1;
        }
    }

    info!(data_dir = %paths.data_dir().display(), created, "Initialized storage");
    Ok(created)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Expense;
    use crate::storage::read_records;
    use tempfile::TempDir;

    #[test]
    fn test_initialize_creates_empty_collections_once() {
        let temp_dir = TempDir::new().unwrap();
        let paths = FinTrackPaths::with_base_dir(temp_dir.path().to_path_buf());

        assert_eq!(initialize_storage(&paths).unwrap(), 7);
        assert!(paths.shared_expenses_file().exists());
        let expenses: Vec<Expense> = read_records(paths.expenses_file()).unwrap();
        assert!(expenses.is_empty());

        assert_eq!(initialize_storage(&paths).unwrap(), 0);
    }
}

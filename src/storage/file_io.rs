//! Record file I/O
//!
//! Each record collection lives in its own JSON array file. A missing or
//! blank file is an empty collection; writes go through a temp file and a
//! rename so a crash never leaves a half-written collection behind.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use serde::{de::DeserializeOwned, Serialize};

use crate::error::FinTrackError;

/// Read a JSON array of records
pub fn read_records<T, P>(path: P) -> Result<Vec<T>, FinTrackError>
where
    T: DeserializeOwned,
    P: AsRef<Path>,
{
    let path = path.as_ref();

    if !path.exists() {
        return Ok(Vec::new());
    }

    let contents = fs::read_to_string(path)
        .map_err(|e| FinTrackError::Storage(format!("Failed to open {}: {}", path.display(), e)))?;

    if contents.trim().is_empty() {
        return Ok(Vec::new());
    }

    serde_json::from_str(&contents)
        .map_err(|e| FinTrackError::Storage(format!("Failed to parse {}: {}", path.display(), e)))
}

/// Write a JSON array of records atomically (write to temp, then rename)
pub fn write_records_atomic<T, P>(path: P, records: &[T]) -> Result<(), FinTrackError>
where
    T: Serialize,
    P: AsRef<Path>,
{
    let path = path.as_ref();

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| {
            FinTrackError::Storage(format!(
                "Failed to create directory {}: {}",
                parent.display(),
                e
            ))
        })?;
    }

    // Same directory as the target so the rename stays on one filesystem
    let temp_path = path.with_extension("json.tmp");

    let file = File::create(&temp_path)
        .map_err(|e| FinTrackError::Storage(format!("Failed to create temp file: {}", e)))?;

    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, records)
        .map_err(|e| FinTrackError::Storage(format!("Failed to serialize records: {}", e)))?;
    writer
        .flush()
        .map_err(|e| FinTrackError::Storage(format!("Failed to flush records: {}", e)))?;
    writer
        .get_ref()
        .sync_all()
        .map_err(|e| FinTrackError::Storage(format!("Failed to sync records: {}", e)))?;

    fs::rename(&temp_path, path).map_err(|e| {
        let _ = fs::remove_file(&temp_path);
        FinTrackError::Storage(format!("Failed to rename temp file: {}", e))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, UserId};
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_is_empty_collection() {
        let temp_dir = TempDir::new().unwrap();
        let records: Vec<Category> = read_records(temp_dir.path().join("none.json")).unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn test_blank_file_is_empty_collection() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("blank.json");
        fs::write(&path, "  \n").unwrap();

        let records: Vec<Category> = read_records(&path).unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn test_write_then_read_records() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("data").join("categories.json");

        let categories = vec![Category::new("alice", "Food"), Category::new("bob", "Rent")];
        write_records_atomic(&path, &categories).unwrap();

        assert!(!temp_dir.path().join("data").join("categories.json.tmp").exists());

        let loaded: Vec<Category> = read_records(&path).unwrap();
        assert_eq!(loaded, categories);
        assert_eq!(loaded[1].user_id, UserId::from("bob"));
    }

    #[test]
    fn test_malformed_file_is_storage_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("broken.json");
        fs::write(&path, "{ not json").unwrap();

        let err = read_records::<Category, _>(&path).unwrap_err();
        assert!(matches!(err, FinTrackError::Storage(_)));
    }
}

//! Custom error types for FinTrack
//!
//! This module defines the error hierarchy for the reporting engine using
//! thiserror. Only the loader and the outer layers (config, storage, export)
//! can fail; the report calculators are total functions.

use chrono::NaiveDate;
use thiserror::Error;

/// The main error type for FinTrack operations
#[derive(Error, Debug)]
pub enum FinTrackError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Validation errors for data models
    #[error("Validation error: {0}")]
    Validation(String),

    /// Report range where the start date falls after the end date
    #[error("Invalid date range: start {start} is after end {end}")]
    InvalidRange { start: NaiveDate, end: NaiveDate },

    /// Requester is not a member of a group whose records were requested
    #[error("User '{user}' is not authorized to read group {group}")]
    NotAuthorized { user: String, group: String },

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// Storage errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// Export errors
    #[error("Export error: {0}")]
    Export(String),
}

impl FinTrackError {
    /// Create an invalid range error
    pub fn invalid_range(start: NaiveDate, end: NaiveDate) -> Self {
        Self::InvalidRange { start, end }
    }

    /// Create a "not authorized" error for group access
    pub fn not_authorized(user: impl Into<String>, group: impl ToString) -> Self {
        Self::NotAuthorized {
            user: user.into(),
            group: group.to_string(),
        }
    }

    /// Create a "not found" error for groups
    pub fn group_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Group",
            identifier: identifier.into(),
        }
    }

    /// Check if this is an invalid range error
    pub fn is_invalid_range(&self) -> bool {
        matches!(self, Self::InvalidRange { .. })
    }

    /// Check if this is an authorization error
    pub fn is_not_authorized(&self) -> bool {
        matches!(self, Self::NotAuthorized { .. })
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

// Implement From traits for common error types

impl From<std::io::Error> for FinTrackError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for FinTrackError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

impl From<serde_yaml::Error> for FinTrackError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::Export(err.to_string())
    }
}

impl From<csv::Error> for FinTrackError {
    fn from(err: csv::Error) -> Self {
        Self::Export(err.to_string())
    }
}

/// Result type alias for FinTrack operations
pub type FinTrackResult<T> = Result<T, FinTrackError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = FinTrackError::Config("test error".into());
        assert_eq!(err.to_string(), "Configuration error: test error");
    }

    #[test]
    fn test_invalid_range_error() {
        let err = FinTrackError::invalid_range(
            NaiveDate::from_ymd_opt(2025, 2, 1).unwrap(),
            NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
        );
        assert_eq!(
            err.to_string(),
            "Invalid date range: start 2025-02-01 is after end 2025-01-01"
        );
        assert!(err.is_invalid_range());
        assert!(!err.is_not_found());
    }

    #[test]
    fn test_not_authorized_error() {
        let err = FinTrackError::not_authorized("alice", "grp-1234");
        assert_eq!(
            err.to_string(),
            "User 'alice' is not authorized to read group grp-1234"
        );
        assert!(err.is_not_authorized());
    }

    #[test]
    fn test_not_found_error() {
        let err = FinTrackError::group_not_found("Roommates");
        assert_eq!(err.to_string(), "Group not found: Roommates");
        assert!(err.is_not_found());
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: FinTrackError = io_err.into();
        assert!(matches!(err, FinTrackError::Io(_)));
    }
}

//! User settings for FinTrack
//!
//! Report defaults: who to report on, how to label missing categories and
//! how shared group expenses are split.

use serde::{Deserialize, Serialize};

use super::paths::FinTrackPaths;
use crate::error::FinTrackError;

/// Who takes part in the equal split of a group expense
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SplitPolicy {
    /// Every current member, regardless of role
    #[default]
    AllMembers,
    /// Every member except those with the child role
    ExcludeChildren,
}

/// User settings for FinTrack
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Currency symbol used in terminal output
    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// Date format preference (strftime format)
    #[serde(default = "default_date_format")]
    pub date_format: String,

    /// User reported on when none is given on the command line
    #[serde(default)]
    pub default_user: Option<String>,

    /// Split policy for group expenses
    #[serde(default)]
    pub split_policy: SplitPolicy,

    /// Label for expenses without a category
    #[serde(default = "default_uncategorized_label")]
    pub uncategorized_label: String,

    /// Label for expenses whose category is not in the loaded set
    #[serde(default = "default_unknown_category_label")]
    pub unknown_category_label: String,

    /// tracing filter used when `RUST_LOG` is not set
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
}

fn default_schema_version() -> u32 {
    1
}

fn default_currency() -> String {
    "$".to_string()
}

fn default_date_format() -> String {
    "%Y-%m-%d".to_string()
}

fn default_uncategorized_label() -> String {
    "Uncategorized".to_string()
}

fn default_unknown_category_label() -> String {
    "Unknown".to_string()
}

fn default_log_filter() -> String {
    "fintrack=info".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            currency_symbol: default_currency(),
            date_format: default_date_format(),
            default_user: None,
            split_policy: SplitPolicy::default(),
            uncategorized_label: default_uncategorized_label(),
            unknown_category_label: default_unknown_category_label(),
            log_filter: default_log_filter(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or return defaults if the file doesn't exist
    pub fn load_or_create(paths: &FinTrackPaths) -> Result<Self, FinTrackError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path).map_err(|e| {
                FinTrackError::Io(format!("Failed to read settings file: {}", e))
            })?;

            let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
                FinTrackError::Config(format!("Failed to parse settings file: {}", e))
            })?;

            Ok(settings)
        } else {
            // Don't save yet - let caller decide when to persist
            Ok(Settings::default())
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &FinTrackPaths) -> Result<(), FinTrackError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self).map_err(|e| {
            FinTrackError::Config(format!("Failed to serialize settings: {}", e))
        })?;

        std::fs::write(paths.settings_file(), contents).map_err(|e| {
            FinTrackError::Io(format!("Failed to write settings file: {}", e))
        })?;

        Ok(())
    }
}

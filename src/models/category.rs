//! Category model
//!
//! Categories are owned per user and referenced by expenses and budgets.
//! Two users may own categories with the same name; grouping is always done
//! by id.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::{CategoryId, UserId};

/// A spending category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    /// Unique identifier
    pub id: CategoryId,

    /// Category name
    pub name: String,

    /// Optional emoji or short label shown next to the name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emoji: Option<String>,

    /// The user who owns the category
    pub user_id: UserId,
}

impl Category {
    /// Create a new category
    pub fn new(user_id: impl Into<UserId>, name: impl Into<String>) -> Self {
        Self {
            id: CategoryId::new(),
            name: name.into(),
            emoji: None,
            user_id: user_id.into(),
        }
    }

    /// Attach an emoji label
    pub fn with_emoji(mut self, emoji: impl Into<String>) -> Self {
        self.emoji = Some(emoji.into());
        self
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.emoji {
            Some(emoji) => write!(f, "{} {}", emoji, self.name),
            None => write!(f, "{}", self.name),
        }
    }
}

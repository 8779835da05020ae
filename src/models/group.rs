//! Group model
//!
//! A group of users who share expenses. Every member has a role; the
//! settlement engine splits group expenses across the current member set.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

use super::ids::{GroupId, UserId};

/// Role of a user within a group
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum MemberRole {
    Admin,
    #[default]
    Member,
    Child,
}

impl fmt::Display for MemberRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Admin => write!(f, "Admin"),
            Self::Member => write!(f, "Member"),
            Self::Child => write!(f, "Child"),
        }
    }
}

/// A user's membership in a group
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupMember {
    pub user_id: UserId,
    #[serde(default)]
    pub role: MemberRole,
}

impl GroupMember {
    pub fn new(user_id: impl Into<UserId>, role: MemberRole) -> Self {
        Self {
            user_id: user_id.into(),
            role,
        }
    }
}

/// A shared-expense group
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Group {
    /// Unique identifier
    pub id: GroupId,

    /// Group name
    pub name: String,

    /// The user who created the group
    pub created_by: UserId,

    /// Current members
    #[serde(default)]
    pub members: Vec<GroupMember>,
}

impl Group {
    /// Create a group whose creator is its first admin
    pub fn new(name: impl Into<String>, created_by: impl Into<UserId>) -> Self {
        let created_by = created_by.into();
        Self {
            id: GroupId::new(),
            name: name.into(),
            members: vec![GroupMember::new(created_by.clone(), MemberRole::Admin)],
            created_by,
        }
    }

    /// Add a member, replacing the role if the user is already present
    pub fn add_member(&mut self, user_id: impl Into<UserId>, role: MemberRole) {
        let user_id = user_id.into();
        match self.members.iter_mut().find(|m| m.user_id == user_id) {
            Some(existing) => existing.role = role,
            None => self.members.push(GroupMember::new(user_id, role)),
        }
    }

    /// Builder form of [`Group::add_member`]
    pub fn with_member(mut self, user_id: impl Into<UserId>, role: MemberRole) -> Self {
        self.add_member(user_id, role);
        self
    }

    /// Members with repeated user ids collapsed to their first entry
    ///
    /// Hand-edited data can list a user twice; everything that counts or
    /// splits over members goes through this set.
    pub fn distinct_members(&self) -> Vec<&GroupMember> {
        let mut seen = BTreeSet::new();
        self.members
            .iter()
            .filter(|m| seen.insert(&m.user_id))
            .collect()
    }

    /// Number of distinct current members
    pub fn member_count(&self) -> usize {
        self.distinct_members().len()
    }

    /// Check if a user belongs to the group
    pub fn is_member(&self, user_id: &UserId) -> bool {
        self.members.iter().any(|m| &m.user_id == user_id)
    }

    /// Role of a user in the group, if they are a member
    pub fn role_of(&self, user_id: &UserId) -> Option<MemberRole> {
        self.members
            .iter()
            .find(|m| &m.user_id == user_id)
            .map(|m| m.role)
    }
}

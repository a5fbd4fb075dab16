//! Role entity, member references, and the transfer representation.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::error::RoleError;
use crate::types::{DbId, UNASSIGNED_ID};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Maximum length of a role name, in characters.
pub const MAX_ROLE_NAME_LEN: usize = 100;

// ---------------------------------------------------------------------------
// Entities
// ---------------------------------------------------------------------------

/// A resolved user identity attached to a role.
///
/// Ordered by `id` so a [`BTreeSet`] of members deduplicates on identity.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct UserRef {
    pub id: DbId,
    pub username: String,
}

/// A named group of users.
///
/// `id` is [`UNASSIGNED_ID`] until the store persists the role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Role {
    pub id: DbId,
    pub name: String,
    pub members: BTreeSet<UserRef>,
}

impl Role {
    /// Build an unpersisted role.
    pub fn new(name: impl Into<String>, members: impl IntoIterator<Item = UserRef>) -> Self {
        Self {
            id: UNASSIGNED_ID,
            name: name.into(),
            members: members.into_iter().collect(),
        }
    }

    pub fn is_persisted(&self) -> bool {
        self.id != UNASSIGNED_ID
    }

    /// Member usernames in alphabetical order.
    pub fn usernames(&self) -> Vec<String> {
        let mut names: Vec<String> = self.members.iter().map(|m| m.username.clone()).collect();
        names.sort();
        names
    }
}

/// Wire representation of a role: `{ "id": 1, "name": "ADMIN", "users": ["alice"] }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleDto {
    #[serde(default)]
    pub id: DbId,
    pub name: String,
    #[serde(default)]
    pub users: Vec<String>,
}

impl From<&Role> for RoleDto {
    fn from(role: &Role) -> Self {
        Self {
            id: role.id,
            name: role.name.clone(),
            users: role.usernames(),
        }
    }
}

impl From<Role> for RoleDto {
    fn from(role: Role) -> Self {
        RoleDto::from(&role)
    }
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Reject blank, overlong or control-character role names.
pub fn validate_role_name(name: &str) -> Result<(), RoleError> {
    if name.trim().is_empty() {
        return Err(RoleError::Invalid("Role name must not be empty".into()));
    }
    if has_control_chars(name) {
        return Err(RoleError::Invalid(
            "Role name must not contain control characters".into(),
        ));
    }
    if name.chars().count() > MAX_ROLE_NAME_LEN {
        return Err(RoleError::Invalid(format!(
            "Role name must be at most {MAX_ROLE_NAME_LEN} characters"
        )));
    }
    Ok(())
}

/// Deduplicate requested usernames, keeping first-occurrence order.
///
/// Blank usernames and usernames with control characters are rejected
/// rather than silently dropped.
pub fn canonical_usernames(usernames: &[String]) -> Result<Vec<String>, RoleError> {
    let mut seen = BTreeSet::new();
    let mut out = Vec::with_capacity(usernames.len());
    for username in usernames {
        if username.trim().is_empty() {
            return Err(RoleError::Invalid("Usernames must not be empty".into()));
        }
        if has_control_chars(username) {
            return Err(RoleError::Invalid(
                "Usernames must not contain control characters".into(),
            ));
        }
        if seen.insert(username.as_str()) {
            out.push(username.clone());
        }
    }
    Ok(out)
}

/// NUL in particular cannot be stored in a Postgres text column.
fn has_control_chars(value: &str) -> bool {
    value.chars().any(char::is_control)
}

/// Usernames in `requested` that are absent from `resolved`.
pub fn missing_usernames(requested: &[String], resolved: &[UserRef]) -> Vec<String> {
    requested
        .iter()
        .filter(|name| !resolved.iter().any(|u| &u.username == *name))
        .cloned()
        .collect()
}

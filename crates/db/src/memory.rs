//! In-process [`RoleStore`] and [`UserDirectory`].
//!
//! Backs the `memory` storage backend and the HTTP integration tests. All
//! state sits behind one [`RwLock`], so name uniqueness is checked and the
//! write applied under the same write guard.

use std::collections::BTreeMap;

use async_trait::async_trait;
use rolegate_core::role::{Role, UserRef};
use rolegate_core::store::{RoleStore, StoreError, UserDirectory};
use rolegate_core::types::DbId;
use tokio::sync::RwLock;

#[derive(Debug, Default)]
struct State {
    /// Users keyed by username.
    users: BTreeMap<String, UserRef>,
    roles: BTreeMap<DbId, Role>,
    last_user_id: DbId,
    last_role_id: DbId,
}

impl State {
    fn insert_user(&mut self, username: &str) -> UserRef {
        if let Some(existing) = self.users.get(username) {
            return existing.clone();
        }
        self.last_user_id += 1;
        let user = UserRef {
            id: self.last_user_id,
            username: username.to_string(),
        };
        self.users.insert(user.username.clone(), user.clone());
        user
    }

    fn name_holder(&self, name: &str) -> Option<DbId> {
        self.roles.values().find(|r| r.name == name).map(|r| r.id)
    }

    /// Members must reference known users, mirroring the foreign key.
    fn check_members(&self, role: &Role) -> Result<(), StoreError> {
        for member in &role.members {
            let known = self
                .users
                .get(&member.username)
                .is_some_and(|u| u.id == member.id);
            if !known {
                return Err(StoreError::Rejected(format!(
                    "user {} ({}) does not exist",
                    member.username, member.id
                )));
            }
        }
        Ok(())
    }
}

/// Thread-safe in-memory store for users and roles.
#[derive(Debug, Default)]
pub struct MemoryStore {
    state: RwLock<State>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store pre-populated with the given usernames.
    pub fn with_users<I, S>(usernames: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut state = State::default();
        for name in usernames {
            state.insert_user(name.as_ref());
        }
        Self {
            state: RwLock::new(state),
        }
    }

    /// Add a user, returning the existing identity if the name is taken.
    pub async fn add_user(&self, username: &str) -> UserRef {
        self.state.write().await.insert_user(username)
    }

    /// Remove a user and drop it from every role, as the cascade would.
    pub async fn remove_user(&self, username: &str) -> bool {
        let mut state = self.state.write().await;
        let Some(user) = state.users.remove(username) else {
            return false;
        };
        for role in state.roles.values_mut() {
            role.members.remove(&user);
        }
        true
    }

    pub async fn role_count(&self) -> usize {
        self.state.read().await.roles.len()
    }
}

#[async_trait]
impl UserDirectory for MemoryStore {
    async fn resolve(&self, usernames: &[String]) -> Result<Vec<UserRef>, StoreError> {
        let state = self.state.read().await;
        let mut found: Vec<UserRef> = usernames
            .iter()
            .filter_map(|name| state.users.get(name).cloned())
            .collect();
        found.sort();
        found.dedup();
        Ok(found)
    }
}

#[async_trait]
impl RoleStore for MemoryStore {
    async fn find_all(&self) -> Result<Vec<Role>, StoreError> {
        Ok(self.state.read().await.roles.values().cloned().collect())
    }

    async fn find_by_id(&self, id: DbId) -> Result<Option<Role>, StoreError> {
        Ok(self.state.read().await.roles.get(&id).cloned())
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Role>, StoreError> {
        let state = self.state.read().await;
        Ok(state
            .name_holder(name)
            .and_then(|id| state.roles.get(&id).cloned()))
    }

    async fn try_create(&self, role: &Role) -> Result<Role, StoreError> {
        let mut state = self.state.write().await;
        if state.name_holder(&role.name).is_some() {
            return Err(StoreError::NameTaken(role.name.clone()));
        }
        state.check_members(role)?;

        state.last_role_id += 1;
        let created = Role {
            id: state.last_role_id,
            name: role.name.clone(),
            members: role.members.clone(),
        };
        state.roles.insert(created.id, created.clone());
        Ok(created)
    }

    async fn update(&self, role: &Role) -> Result<Role, StoreError> {
        let mut state = self.state.write().await;
        if !state.roles.contains_key(&role.id) {
            return Err(StoreError::NotFound(role.id));
        }
        if state
            .name_holder(&role.name)
            .is_some_and(|holder| holder != role.id)
        {
            return Err(StoreError::NameTaken(role.name.clone()));
        }
        state.check_members(role)?;

        state.roles.insert(role.id, role.clone());
        Ok(role.clone())
    }

    async fn delete_by_id(&self, id: DbId) -> Result<bool, StoreError> {
        Ok(self.state.write().await.roles.remove(&id).is_some())
    }
}

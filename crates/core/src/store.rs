//! Persistence collaborators consumed by [`crate::role_service::RoleService`].
//!
//! Implementations live in `rolegate-db` (Postgres and in-memory). The store's
//! `try_create` and `update` are the atomicity boundary for name uniqueness;
//! any checks the service performs beforehand are advisory.

use async_trait::async_trait;

use crate::role::{Role, UserRef};
use crate::types::DbId;

/// Why a store call did not produce the requested entity.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// A unique-name constraint rejected the write.
    #[error("role name '{0}' is already taken")]
    NameTaken(String),

    /// The row to update does not exist.
    #[error("role {0} not found")]
    NotFound(DbId),

    /// Any other constraint violation.
    #[error("constraint violation: {0}")]
    Rejected(String),

    /// Connection, protocol or other infrastructure failure.
    #[error("backend failure: {0}")]
    Backend(String),
}

/// Resolves usernames to user identities.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Return the users that exist among `usernames`. Unknown names are
    /// omitted; callers detect them by comparing counts.
    async fn resolve(&self, usernames: &[String]) -> Result<Vec<UserRef>, StoreError>;
}

/// Canonical storage for roles.
#[async_trait]
pub trait RoleStore: Send + Sync {
    async fn find_all(&self) -> Result<Vec<Role>, StoreError>;

    async fn find_by_id(&self, id: DbId) -> Result<Option<Role>, StoreError>;

    async fn find_by_name(&self, name: &str) -> Result<Option<Role>, StoreError>;

    /// Persist a new role, assigning its id. Fails with
    /// [`StoreError::NameTaken`] if the name is in use.
    async fn try_create(&self, role: &Role) -> Result<Role, StoreError>;

    /// Replace name and membership of an existing role.
    async fn update(&self, role: &Role) -> Result<Role, StoreError>;

    /// Remove a role. Returns `true` if a row was deleted.
    async fn delete_by_id(&self, id: DbId) -> Result<bool, StoreError>;
}

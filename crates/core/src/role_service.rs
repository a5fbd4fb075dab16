//! Create/update consistency rules for roles.
//!
//! [`RoleService`] resolves member usernames, checks for unknown targets and
//! name collisions, then hands a fully-built [`Role`] to the [`RoleStore`].
//! It keeps no state between calls.

use std::sync::Arc;

use crate::error::RoleError;
use crate::role::{
    canonical_usernames, missing_usernames, validate_role_name, Role, RoleDto, UserRef,
};
use crate::store::{RoleStore, UserDirectory};
use crate::types::DbId;

#[derive(Clone)]
pub struct RoleService {
    roles: Arc<dyn RoleStore>,
    users: Arc<dyn UserDirectory>,
}

impl RoleService {
    pub fn new(roles: Arc<dyn RoleStore>, users: Arc<dyn UserDirectory>) -> Self {
        Self { roles, users }
    }

    /// Every persisted role with its current members.
    pub async fn list(&self) -> Result<Vec<Role>, RoleError> {
        Ok(self.roles.find_all().await?)
    }

    /// Create a role from `input`. Any id in `input` is ignored.
    pub async fn create(&self, input: RoleDto) -> Result<Role, RoleError> {
        validate_role_name(&input.name).inspect_err(log_rejection)?;
        let members = self.resolve_members(&input.users).await?;

        let role = Role::new(input.name, members);
        let created = self
            .roles
            .try_create(&role)
            .await
            .map_err(RoleError::from)
            .inspect_err(log_rejection)?;

        tracing::info!(role_id = created.id, role_name = %created.name, "Role created");
        Ok(created)
    }

    /// Replace the name and members of the role identified by `input.id`.
    pub async fn update(&self, input: RoleDto) -> Result<Role, RoleError> {
        validate_role_name(&input.name).inspect_err(log_rejection)?;

        let existing = self
            .roles
            .find_by_id(input.id)
            .await?
            .ok_or(RoleError::RoleNotFound(input.id))
            .inspect_err(log_rejection)?;

        if existing.name != input.name {
            if let Some(holder) = self.roles.find_by_name(&input.name).await? {
                if holder.id != existing.id {
                    let err = RoleError::NameTaken(input.name);
                    log_rejection(&err);
                    return Err(err);
                }
            }
        }

        let members = self.resolve_members(&input.users).await?;
        let role = Role {
            id: existing.id,
            name: input.name,
            members: members.into_iter().collect(),
        };

        let updated = self
            .roles
            .update(&role)
            .await
            .map_err(RoleError::from)
            .inspect_err(log_rejection)?;

        tracing::info!(role_id = updated.id, role_name = %updated.name, "Role updated");
        Ok(updated)
    }

    /// Delete a role by id. Deleting an unknown id is not an error.
    pub async fn delete(&self, id: DbId) -> Result<(), RoleError> {
        let deleted = self.roles.delete_by_id(id).await?;
        tracing::debug!(role_id = id, deleted, "Role delete requested");
        Ok(())
    }

    /// Resolve usernames to identities, failing if any is unknown.
    async fn resolve_members(&self, usernames: &[String]) -> Result<Vec<UserRef>, RoleError> {
        let requested = canonical_usernames(usernames).inspect_err(log_rejection)?;
        if requested.is_empty() {
            return Ok(Vec::new());
        }

        let resolved = self.users.resolve(&requested).await?;
        if resolved.len() != requested.len() {
            let err = RoleError::UnknownMembers(missing_usernames(&requested, &resolved));
            log_rejection(&err);
            return Err(err);
        }
        Ok(resolved)
    }
}

fn log_rejection(err: &RoleError) {
    if err.is_client_error() {
        tracing::debug!(error = %err, "Role request rejected");
    }
}

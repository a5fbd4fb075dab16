//! Postgres-backed [`RoleStore`] and [`UserDirectory`].
//!
//! Name uniqueness is enforced by the `uq_roles_name` constraint; a unique
//! violation on write is reported as [`StoreError::NameTaken`] regardless of
//! any check the caller made beforehand.

use std::collections::{BTreeMap, BTreeSet};

use async_trait::async_trait;
use rolegate_core::role::{Role, UserRef};
use rolegate_core::store::{RoleStore, StoreError, UserDirectory};
use rolegate_core::types::DbId;

use crate::models::role::RoleRow;
use crate::repositories::{RoleRepo, UserRepo};
use crate::DbPool;

/// Unique constraint guarding role names.
const ROLE_NAME_CONSTRAINT: &str = "uq_roles_name";

/// PostgreSQL SQLSTATE codes for constraint violations.
const UNIQUE_VIOLATION: &str = "23505";
const FOREIGN_KEY_VIOLATION: &str = "23503";
const CHECK_VIOLATION: &str = "23514";
/// SQLSTATE class 22: bad input data (invalid encoding, value too long, ...).
const DATA_EXCEPTION_CLASS: &str = "22";

/// Roles stored in the `roles` / `role_members` tables.
#[derive(Clone)]
pub struct PgRoleStore {
    pool: DbPool,
}

impl PgRoleStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Attach members to the given rows, preserving row order.
    async fn hydrate(&self, rows: Vec<RoleRow>) -> Result<Vec<Role>, StoreError> {
        let ids: Vec<DbId> = rows.iter().map(|r| r.id).collect();
        let mut members: BTreeMap<DbId, BTreeSet<UserRef>> = BTreeMap::new();
        for row in RoleRepo::members_of(&self.pool, &ids)
            .await
            .map_err(backend)?
        {
            members.entry(row.role_id).or_default().insert(row.into());
        }

        Ok(rows
            .into_iter()
            .map(|row| Role {
                members: members.remove(&row.id).unwrap_or_default(),
                id: row.id,
                name: row.name,
            })
            .collect())
    }

    async fn hydrate_one(&self, row: Option<RoleRow>) -> Result<Option<Role>, StoreError> {
        match row {
            Some(row) => Ok(self.hydrate(vec![row]).await?.pop()),
            None => Ok(None),
        }
    }
}

#[async_trait]
impl RoleStore for PgRoleStore {
    async fn find_all(&self) -> Result<Vec<Role>, StoreError> {
        let rows = RoleRepo::list(&self.pool).await.map_err(backend)?;
        self.hydrate(rows).await
    }

    async fn find_by_id(&self, id: DbId) -> Result<Option<Role>, StoreError> {
        let row = RoleRepo::find_by_id(&self.pool, id).await.map_err(backend)?;
        self.hydrate_one(row).await
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Role>, StoreError> {
        let row = RoleRepo::find_by_name(&self.pool, name)
            .await
            .map_err(backend)?;
        self.hydrate_one(row).await
    }

    async fn try_create(&self, role: &Role) -> Result<Role, StoreError> {
        let member_ids = member_ids(role);
        let row = RoleRepo::create(&self.pool, &role.name, &member_ids)
            .await
            .map_err(|e| classify_write_error(e, &role.name))?;

        Ok(Role {
            id: row.id,
            name: row.name,
            members: role.members.clone(),
        })
    }

    async fn update(&self, role: &Role) -> Result<Role, StoreError> {
        let member_ids = member_ids(role);
        let row = RoleRepo::update(&self.pool, role.id, &role.name, &member_ids)
            .await
            .map_err(|e| classify_write_error(e, &role.name))?
            .ok_or(StoreError::NotFound(role.id))?;

        Ok(Role {
            id: row.id,
            name: row.name,
            members: role.members.clone(),
        })
    }

    async fn delete_by_id(&self, id: DbId) -> Result<bool, StoreError> {
        RoleRepo::delete(&self.pool, id).await.map_err(backend)
    }
}

/// Users stored in the `users` table.
#[derive(Clone)]
pub struct PgUserDirectory {
    pool: DbPool,
}

impl PgUserDirectory {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserDirectory for PgUserDirectory {
    async fn resolve(&self, usernames: &[String]) -> Result<Vec<UserRef>, StoreError> {
        let rows = UserRepo::find_by_usernames(&self.pool, usernames)
            .await
            .map_err(classify_read_error)?;
        Ok(rows.into_iter().map(UserRef::from).collect())
    }
}

fn member_ids(role: &Role) -> Vec<DbId> {
    role.members.iter().map(|m| m.id).collect()
}

fn backend(err: sqlx::Error) -> StoreError {
    tracing::error!(error = %err, "Role store query failed");
    StoreError::Backend(err.to_string())
}

/// Map a write failure to the store's error taxonomy.
///
/// - Unique violation on `uq_roles_name` -> [`StoreError::NameTaken`].
/// - Other unique, foreign-key or check violations -> [`StoreError::Rejected`].
/// - Data exceptions (class `22`) -> [`StoreError::Rejected`].
/// - Everything else -> [`StoreError::Backend`].
fn classify_write_error(err: sqlx::Error, name: &str) -> StoreError {
    if let sqlx::Error::Database(db_err) = &err {
        let code = db_err.code();
        match code.as_deref() {
            Some(UNIQUE_VIOLATION) if db_err.constraint() == Some(ROLE_NAME_CONSTRAINT) => {
                return StoreError::NameTaken(name.to_string());
            }
            Some(UNIQUE_VIOLATION | FOREIGN_KEY_VIOLATION | CHECK_VIOLATION) => {
                let constraint = db_err.constraint().unwrap_or("unknown");
                return StoreError::Rejected(format!("constraint {constraint} violated"));
            }
            _ => {}
        }
    }
    classify_read_error(err)
}

/// Data exceptions caused by the input are rejections; the rest is backend failure.
fn classify_read_error(err: sqlx::Error) -> StoreError {
    if let sqlx::Error::Database(db_err) = &err {
        if let Some(code) = db_err.code().filter(|c| c.starts_with(DATA_EXCEPTION_CLASS)) {
            return StoreError::Rejected(format!("invalid input data (SQLSTATE {code})"));
        }
    }
    backend(err)
}

//! Repository for the `roles` and `role_members` tables.

use sqlx::{PgPool, Postgres, Transaction};
use rolegate_core::types::DbId;

use crate::models::role::{RoleMemberRow, RoleRow};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, created_at, updated_at";

/// Provides CRUD operations for roles and their memberships.
pub struct RoleRepo;

impl RoleRepo {
    /// Insert a role and its memberships in one transaction.
    pub async fn create(
        pool: &PgPool,
        name: &str,
        member_ids: &[DbId],
    ) -> Result<RoleRow, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!("INSERT INTO roles (name) VALUES ($1) RETURNING {COLUMNS}");
        let row = sqlx::query_as::<_, RoleRow>(&query)
            .bind(name)
            .fetch_one(&mut *tx)
            .await?;

        Self::insert_members(&mut tx, row.id, member_ids).await?;
        tx.commit().await?;
        Ok(row)
    }

    /// Find a role by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<RoleRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM roles WHERE id = $1");
        sqlx::query_as::<_, RoleRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a role by name (case-sensitive).
    pub async fn find_by_name(pool: &PgPool, name: &str) -> Result<Option<RoleRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM roles WHERE name = $1");
        sqlx::query_as::<_, RoleRow>(&query)
            .bind(name)
            .fetch_optional(pool)
            .await
    }

    /// List all roles ordered by ID ascending.
    pub async fn list(pool: &PgPool) -> Result<Vec<RoleRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM roles ORDER BY id ASC");
        sqlx::query_as::<_, RoleRow>(&query).fetch_all(pool).await
    }

    /// Memberships for the given roles, joined with usernames.
    pub async fn members_of(
        pool: &PgPool,
        role_ids: &[DbId],
    ) -> Result<Vec<RoleMemberRow>, sqlx::Error> {
        sqlx::query_as::<_, RoleMemberRow>(
            "SELECT rm.role_id, u.id AS user_id, u.username
             FROM role_members rm
             JOIN users u ON u.id = rm.user_id
             WHERE rm.role_id = ANY($1)
             ORDER BY rm.role_id, u.username",
        )
        .bind(role_ids)
        .fetch_all(pool)
        .await
    }

    /// Rename a role and replace its memberships in one transaction.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        name: &str,
        member_ids: &[DbId],
    ) -> Result<Option<RoleRow>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!("UPDATE roles SET name = $2 WHERE id = $1 RETURNING {COLUMNS}");
        let Some(row) = sqlx::query_as::<_, RoleRow>(&query)
            .bind(id)
            .bind(name)
            .fetch_optional(&mut *tx)
            .await?
        else {
            tx.rollback().await?;
            return Ok(None);
        };

        sqlx::query("DELETE FROM role_members WHERE role_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        Self::insert_members(&mut tx, id, member_ids).await?;

        tx.commit().await?;
        Ok(Some(row))
    }

    /// Delete a role (memberships cascade). Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM roles WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn insert_members(
        tx: &mut Transaction<'_, Postgres>,
        role_id: DbId,
        member_ids: &[DbId],
    ) -> Result<(), sqlx::Error> {
        if member_ids.is_empty() {
            return Ok(());
        }
        sqlx::query(
            "INSERT INTO role_members (role_id, user_id)
             SELECT $1, UNNEST($2::BIGINT[])",
        )
        .bind(role_id)
        .bind(member_ids)
        .execute(&mut **tx)
        .await?;
        Ok(())
    }
}

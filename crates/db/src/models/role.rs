//! Role row models.

use rolegate_core::role::UserRef;
use rolegate_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A row from the `roles` table (without members).
#[derive(Debug, Clone, FromRow)]
pub struct RoleRow {
    pub id: DbId,
    pub name: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// One membership joined with the member's username.
#[derive(Debug, Clone, FromRow)]
pub struct RoleMemberRow {
    pub role_id: DbId,
    pub user_id: DbId,
    pub username: String,
}

impl From<RoleMemberRow> for UserRef {
    fn from(row: RoleMemberRow) -> Self {
        UserRef {
            id: row.user_id,
            username: row.username,
        }
    }
}

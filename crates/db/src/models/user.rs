//! User row model.

use rolegate_core::role::UserRef;
use rolegate_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A row from the `users` table.
#[derive(Debug, Clone, FromRow)]
pub struct UserRow {
    pub id: DbId,
    pub username: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<UserRow> for UserRef {
    fn from(row: UserRow) -> Self {
        UserRef {
            id: row.id,
            username: row.username,
        }
    }
}

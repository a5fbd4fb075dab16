//! Repository for the `users` table.

use sqlx::PgPool;

use crate::models::user::UserRow;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, username, created_at, updated_at";

/// Provides lookups for users. Users are managed elsewhere; `create` exists
/// for seeding and tests.
pub struct UserRepo;

impl UserRepo {
    /// Insert a new user, returning the created row.
    pub async fn create(pool: &PgPool, username: &str) -> Result<UserRow, sqlx::Error> {
        let query = format!("INSERT INTO users (username) VALUES ($1) RETURNING {COLUMNS}");
        sqlx::query_as::<_, UserRow>(&query)
            .bind(username)
            .fetch_one(pool)
            .await
    }

    /// Find every user whose username is in `usernames` (case-sensitive).
    ///
    /// Unknown usernames are simply absent from the result.
    pub async fn find_by_usernames(
        pool: &PgPool,
        usernames: &[String],
    ) -> Result<Vec<UserRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE username = ANY($1) ORDER BY id ASC");
        sqlx::query_as::<_, UserRow>(&query)
            .bind(usernames)
            .fetch_all(pool)
            .await
    }
}

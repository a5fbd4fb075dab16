/// All database primary keys are PostgreSQL BIGSERIAL.
pub type DbId = i64;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Identifier carried by a role that has not been persisted yet.
pub const UNASSIGNED_ID: DbId = 0;

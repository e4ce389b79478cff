/// All database primary keys are PostgreSQL BIGSERIAL.
pub type DbId = i64;

/// User ids are opaque identifiers issued by the external user directory.
pub type UserId = i64;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

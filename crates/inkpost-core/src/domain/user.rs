use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// User entity - subject of issued bearer tokens.
///
/// Emails are normalized to lowercase before they reach the repository, so
/// equality on `email` is effectively case-insensitive.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

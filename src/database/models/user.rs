use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// An API user. `password_hash` is `base64(salt):base64(sha256(salt || pw))`
/// and never leaves this layer; login responses carry only email and role.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub password_hash: String,
    pub role: String,
    pub created_date: DateTime<Utc>,
}

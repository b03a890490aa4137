use sqlx::FromRow;

// Deliberately not Serialize: the password hash never leaves the process.
#[derive(Debug, FromRow)]
pub struct User {
    pub id: uuid::Uuid,
    pub username: String,
    pub password_hash: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

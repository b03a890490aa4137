use argon2::password_hash::{rand_core::OsRng, SaltString};
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};
use sqlx::PgPool;
use tracing::warn;

use crate::db;
use crate::errors::AppError;
use crate::models::Credentials;
use crate::services::token_service::TokenService;

pub async fn register(pool: &PgPool, input: Credentials) -> Result<(), AppError> {
    let (username, password) = input.into_parts()?;

    let password_hash = hash_password(&password)?;
    match db::user_queries::insert(pool, &username, &password_hash).await {
        Ok(_) => Ok(()),
        // The unique index is the source of truth, so concurrent duplicate
        // registrations still yield exactly one success.
        Err(sqlx::Error::Database(e)) if e.is_unique_violation() => {
            Err(AppError::Conflict("Username already exists".to_string()))
        }
        Err(e) => Err(AppError::Db(e)),
    }
}

pub async fn login(
    pool: &PgPool,
    tokens: &TokenService,
    input: Credentials,
) -> Result<String, AppError> {
    let (username, password) = input.into_parts()?;

    // Unknown user and wrong password are indistinguishable to the caller.
    let user = db::user_queries::fetch_by_username(pool, &username)
        .await?
        .ok_or_else(|| AppError::Unauthorized("Invalid username or password".to_string()))?;

    if !verify_password(&user.password_hash, &password) {
        warn!("Failed login attempt for user {}", username);
        return Err(AppError::Unauthorized(
            "Invalid username or password".to_string(),
        ));
    }

    tokens.issue(&user.username)
}

fn hash_password(password: &str) -> Result<String, AppError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AppError::Internal(format!("Failed to hash password: {e}")))
}

/// Comparison is delegated to the hashing primitive; no manual byte
/// comparison against stored material.
fn verify_password(stored_hash: &str, password: &str) -> bool {
    match PasswordHash::new(stored_hash) {
        Ok(parsed) => Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok(),
        Err(e) => {
            warn!("Stored password hash is malformed: {}", e);
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_round_trips_and_rejects_wrong_password() {
        let hash = hash_password("pw123").unwrap();
        assert_ne!(hash, "pw123");
        assert!(verify_password(&hash, "pw123"));
        assert!(!verify_password(&hash, "pw124"));
    }

    #[test]
    fn hashes_are_salted() {
        let a = hash_password("pw123").unwrap();
        let b = hash_password("pw123").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn malformed_stored_hash_never_verifies() {
        assert!(!verify_password("plaintext-left-over", "plaintext-left-over"));
    }
}

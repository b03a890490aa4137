use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;

/// Identity claim embedded in every bearer token.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub iat: i64,
    pub exp: i64,
}

#[derive(Debug, Clone)]
pub struct AuthConfig {
    pub jwt_secret: String,
    pub token_ttl_secs: i64,
}

impl AuthConfig {
    /// Fails at startup when the signing secret is absent. Handlers never
    /// re-check it per request.
    pub fn from_env() -> Result<Self, String> {
        let jwt_secret = std::env::var("JWT_SECRET")
            .ok()
            .filter(|s| !s.trim().is_empty())
            .ok_or_else(|| "JWT_SECRET is not set".to_string())?;
        let token_ttl_secs = std::env::var("TOKEN_TTL_SECS")
            .ok()
            .and_then(|s| s.parse::<i64>().ok())
            .unwrap_or(3600);
        Ok(Self {
            jwt_secret,
            token_ttl_secs,
        })
    }
}

#[derive(Clone)]
pub struct TokenService {
    secret: String,
    ttl: Duration,
}

impl TokenService {
    pub fn new(config: AuthConfig) -> Self {
        Self {
            secret: config.jwt_secret,
            ttl: Duration::seconds(config.token_ttl_secs),
        }
    }

    pub fn issue(&self, username: &str) -> Result<String, AppError> {
        self.issue_at(username, Utc::now())
    }

    fn issue_at(&self, username: &str, now: DateTime<Utc>) -> Result<String, AppError> {
        let claims = Claims {
            sub: username.to_string(),
            iat: now.timestamp(),
            exp: (now + self.ttl).timestamp(),
        };
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )
        .map_err(|e| AppError::Internal(format!("Failed to sign token: {e}")))
    }

    /// Rejects bad signatures and expired tokens alike; the gate maps this
    /// to 403.
    pub fn verify(&self, token: &str) -> Result<Claims, AppError> {
        let mut validation = Validation::default();
        validation.leeway = 0;
        decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &validation,
        )
        .map(|data| data.claims)
        .map_err(|_| AppError::Forbidden("Invalid access token".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service(secret: &str) -> TokenService {
        TokenService::new(AuthConfig {
            jwt_secret: secret.to_string(),
            token_ttl_secs: 3600,
        })
    }

    #[test]
    fn issued_token_carries_the_right_identity() {
        let tokens = service("test-secret");
        let token = tokens.issue("alice").unwrap();
        let claims = tokens.verify(&token).unwrap();
        assert_eq!(claims.sub, "alice");
        assert!(tokens.verify(&token).unwrap().sub != "bob");
    }

    #[test]
    fn token_signed_with_another_secret_fails() {
        let token = service("secret-a").issue("alice").unwrap();
        assert!(service("secret-b").verify(&token).is_err());
    }

    #[test]
    fn expired_token_fails_even_with_correct_signature() {
        let tokens = service("test-secret");
        let issued_two_hours_ago = tokens
            .issue_at("alice", Utc::now() - Duration::hours(2))
            .unwrap();
        assert!(tokens.verify(&issued_two_hours_ago).is_err());
    }

    #[test]
    fn garbage_token_fails() {
        assert!(service("test-secret").verify("not-a-jwt").is_err());
    }
}

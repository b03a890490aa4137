use axum::async_trait;
use axum::extract::{FromRef, FromRequestParts};
use axum::http::request::Parts;
use axum::http::HeaderMap;

use crate::errors::AppError;
use crate::state::AppState;

/// Verified identity attached to a request by the auth gate. Handlers on
/// identity-scoped routes take this as an extractor argument; the gate has
/// no side effects beyond producing it.
#[derive(Clone, Debug)]
pub struct AuthUser {
    pub username: String,
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let token = bearer_token(&parts.headers).ok_or_else(|| {
            AppError::Unauthorized("Access token is missing or invalid".to_string())
        })?;

        let app = AppState::from_ref(state);
        let claims = app
            .tokens
            .verify(&token)
            .map_err(|_| AppError::Forbidden("Invalid access token".to_string()))?;

        Ok(AuthUser {
            username: claims.sub,
        })
    }
}

fn bearer_token(headers: &HeaderMap) -> Option<String> {
    let auth_header = headers.get(http::header::AUTHORIZATION)?.to_str().ok()?;
    let token = auth_header.strip_prefix("Bearer ")?.trim();
    if token.is_empty() {
        None
    } else {
        Some(token.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers_with(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(
            http::header::AUTHORIZATION,
            HeaderValue::from_str(value).unwrap(),
        );
        headers
    }

    #[test]
    fn extracts_token_from_bearer_scheme() {
        let headers = headers_with("Bearer abc.def.ghi");
        assert_eq!(bearer_token(&headers).as_deref(), Some("abc.def.ghi"));
    }

    #[test]
    fn missing_header_yields_none() {
        assert!(bearer_token(&HeaderMap::new()).is_none());
    }

    #[test]
    fn non_bearer_scheme_yields_none() {
        let headers = headers_with("Basic dXNlcjpwdw==");
        assert!(bearer_token(&headers).is_none());
    }

    #[test]
    fn empty_bearer_token_yields_none() {
        let headers = headers_with("Bearer   ");
        assert!(bearer_token(&headers).is_none());
    }
}

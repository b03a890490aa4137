use axum::response::IntoResponse;
use axum::Json;
use reqwest::StatusCode;
use serde_json::{json, Value};
use sqlx::Error;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Database error: {0}")]
    Db(sqlx::Error),
    #[error("Validation error: {0}")]
    Validation(String),
    #[error("Unauthorized: {0}")]
    Unauthorized(String),
    #[error("Forbidden: {0}")]
    Forbidden(String),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Conflict: {0}")]
    Conflict(String),
    #[error("Upstream error ({status}): {message}")]
    Upstream {
        status: u16,
        message: String,
        details: Option<Value>,
    },
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Every failure leaves the gateway as `{ "error": .., "details": .. }`,
/// never as a raw sqlx/reqwest error.
fn envelope(status: StatusCode, error: String, details: Option<Value>) -> axum::response::Response {
    let body = match details {
        Some(details) => json!({ "error": error, "details": details }),
        None => json!({ "error": error }),
    };
    (status, Json(body)).into_response()
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        match self {
            AppError::Validation(msg) => envelope(StatusCode::BAD_REQUEST, msg, None),
            AppError::Unauthorized(msg) => envelope(StatusCode::UNAUTHORIZED, msg, None),
            AppError::Forbidden(msg) => envelope(StatusCode::FORBIDDEN, msg, None),
            AppError::NotFound(msg) => envelope(StatusCode::NOT_FOUND, msg, None),
            AppError::Conflict(msg) => envelope(StatusCode::CONFLICT, msg, None),
            AppError::Upstream {
                status,
                message,
                details,
            } => {
                let status =
                    StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
                envelope(status, message, details)
            }
            AppError::Db(_) | AppError::Internal(_) => envelope(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal Server Error".to_string(),
                None,
            ),
        }
    }
}

impl From<sqlx::Error> for AppError {
    fn from(value: Error) -> Self {
        AppError::Db(value)
    }
}

impl From<String> for AppError {
    fn from(value: String) -> Self {
        AppError::Validation(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_message_converts_via_question_mark() {
        fn check(input: &str) -> Result<(), AppError> {
            Err(input.to_string())?
        }
        assert!(matches!(check("bad input"), Err(AppError::Validation(msg)) if msg == "bad input"));
    }
}

use axum::extract::State;
use axum::routing::post;
use axum::Router;
use http::StatusCode;
use serde_json::{json, Value};
use tracing::{error, info};

use crate::errors::AppError;
use crate::middleware::json::Json;
use crate::models::{Credentials, TokenResponse};
use crate::services::auth_service;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
}

pub async fn register(
    State(state): State<AppState>,
    Json(body): Json<Credentials>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    info!("POST /register - Registering new user");
    auth_service::register(&state.pool, body).await.map_err(|e| {
        error!("Registration failed: {}", e);
        e
    })?;
    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "User registered successfully" })),
    ))
}

pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<Credentials>,
) -> Result<Json<TokenResponse>, AppError> {
    info!("POST /login - Authenticating user");
    let token = auth_service::login(&state.pool, &state.tokens, body)
        .await
        .map_err(|e| {
            error!("Login failed: {}", e);
            e
        })?;
    Ok(Json(TokenResponse { token }))
}

use axum::extract::{Path, State};
use axum::routing::get;
use axum::Router;
use http::StatusCode;
use serde_json::{json, Value};
use tracing::{error, info};

use crate::errors::AppError;
use crate::middleware::auth::AuthUser;
use crate::middleware::json::Json;
use crate::models::{Portfolio, SavePortfolioRequest};
use crate::services::portfolio_service;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/portfolio", get(greet))
        .route("/portfolios", get(list_portfolios))
        .route("/save", axum::routing::post(save_portfolio))
        .route("/portfolio/:id", get(get_portfolio).delete(delete_portfolio))
}

pub async fn greet(user: AuthUser) -> Json<Value> {
    Json(json!({ "message": format!("Welcome {}", user.username) }))
}

#[axum::debug_handler]
pub async fn save_portfolio(
    user: AuthUser,
    State(state): State<AppState>,
    Json(body): Json<SavePortfolioRequest>,
) -> Result<(StatusCode, Json<Portfolio>), AppError> {
    info!("POST /save - Saving portfolio for {}", user.username);
    let portfolio = portfolio_service::save(&state.pool, &user.username, body)
        .await
        .map_err(|e| {
            error!("Failed to save portfolio: {}", e);
            e
        })?;
    Ok((StatusCode::CREATED, Json(portfolio)))
}

pub async fn list_portfolios(
    user: AuthUser,
    State(state): State<AppState>,
) -> Result<Json<Vec<Portfolio>>, AppError> {
    info!("GET /portfolios - Listing portfolios for {}", user.username);
    let portfolios = portfolio_service::list(&state.pool, &user.username)
        .await
        .map_err(|e| {
            error!("Failed to list portfolios: {}", e);
            e
        })?;
    Ok(Json(portfolios))
}

pub async fn get_portfolio(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Portfolio>, AppError> {
    info!("GET /portfolio/{} - Fetching portfolio", id);
    let portfolio = portfolio_service::fetch_one(&state.pool, &id)
        .await
        .map_err(|e| {
            error!("Failed to fetch portfolio {}: {}", id, e);
            e
        })?;
    Ok(Json(portfolio))
}

pub async fn delete_portfolio(
    user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, AppError> {
    info!(
        "DELETE /portfolio/{} - Deleting portfolio for {}",
        id, user.username
    );
    portfolio_service::delete(&state.pool, &user.username, &id)
        .await
        .map_err(|e| {
            error!("Failed to delete portfolio {}: {}", id, e);
            e
        })?;
    Ok(Json(json!({ "message": "Portfolio deleted" })))
}

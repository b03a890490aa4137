use axum::extract::{Query, State};
use axum::routing::get;
use axum::{Json, Router};
use tracing::{error, info};

use crate::errors::AppError;
use crate::models::{NewsPage, NewsQueryParams};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/news", get(get_news))
}

pub async fn get_news(
    State(state): State<AppState>,
    Query(params): Query<NewsQueryParams>,
) -> Result<Json<NewsPage>, AppError> {
    let (page, limit) = params.normalize();
    info!("GET /news - Serving news page {} (limit {})", page, limit);

    let result = state
        .news
        .page(state.engine.as_ref(), page, limit)
        .await
        .map_err(|e| {
            error!("News fetch failed: {}", e);
            e
        })?;
    Ok(Json(result))
}

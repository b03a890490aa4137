use axum::Router;
use tower_http::cors::CorsLayer;

use crate::routes::{auth, engine, health, news, portfolios};
use crate::state::AppState;

pub fn create_app(state: AppState) -> Router {
    Router::<AppState>::new()
        .merge(health::router())
        .merge(auth::router())
        .merge(portfolios::router())
        .merge(engine::router())
        .merge(news::router())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

use std::sync::Arc;
use std::time::Instant;

use sqlx::PgPool;

use crate::external::engine::EngineClient;
use crate::services::news_cache::NewsCache;
use crate::services::token_service::TokenService;

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub engine: Arc<EngineClient>,
    pub news: NewsCache,
    pub tokens: TokenService,
    pub started_at: Instant,
}

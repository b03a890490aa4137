mod app;
mod db;
mod errors;
mod external;
mod logging;
mod middleware;
mod models;
mod routes;
mod services;
mod state;
mod utils;

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

use sqlx::postgres::PgPoolOptions;
use tokio::net::TcpListener;

use crate::external::engine::{EngineClient, EngineConfig};
use crate::services::news_cache::{NewsCache, NewsCacheConfig};
use crate::services::token_service::{AuthConfig, TokenService};
use crate::state::AppState;
use crate::utils::SystemClock;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    logging::init_logging(logging::LoggingConfig::from_env())
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {e}"))?;

    // All required configuration is checked here; nothing is validated
    // lazily inside handlers.
    let database_url = std::env::var("DATABASE_URL")
        .map_err(|_| anyhow::anyhow!("DATABASE_URL is not set"))?;
    let auth_config = AuthConfig::from_env().map_err(|e| anyhow::anyhow!(e))?;
    let engine_config = EngineConfig::from_env();
    let cache_config = NewsCacheConfig::from_env();

    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(&database_url)
        .await?;
    sqlx::migrate!().run(&pool).await?;

    tracing::info!(
        "Optimization engine at {} (timeout {}s)",
        engine_config.base_url,
        engine_config.timeout_secs
    );

    let engine = EngineClient::new(engine_config)
        .map_err(|e| anyhow::anyhow!("Failed to build engine client: {e}"))?;

    let state = AppState {
        pool,
        engine: Arc::new(engine),
        news: NewsCache::new(cache_config, Arc::new(SystemClock)),
        tokens: TokenService::new(auth_config),
        started_at: Instant::now(),
    };
    let app = app::create_app(state);

    let port = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse::<u16>().ok())
        .unwrap_or(5000);
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = TcpListener::bind(&addr).await?;
    tracing::info!("Gateway listening at http://{}/", addr);
    axum::serve(listener, app).await?;

    Ok(())
}

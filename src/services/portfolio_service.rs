use sqlx::PgPool;
use uuid::Uuid;

use crate::db;
use crate::errors::AppError;
use crate::models::{Portfolio, SavePortfolioRequest};

pub async fn save(
    pool: &PgPool,
    owner: &str,
    input: SavePortfolioRequest,
) -> Result<Portfolio, AppError> {
    let portfolio = Portfolio::new(owner.to_string(), input)?;
    let stored = db::portfolio_queries::insert(pool, portfolio).await?;
    Ok(stored)
}

pub async fn list(pool: &PgPool, owner: &str) -> Result<Vec<Portfolio>, AppError> {
    let portfolios = db::portfolio_queries::fetch_for_owner(pool, owner).await?;
    Ok(portfolios)
}

pub async fn fetch_one(pool: &PgPool, id: &str) -> Result<Portfolio, AppError> {
    let id = parse_id(id)?;
    let portfolio = db::portfolio_queries::fetch_one(pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Portfolio not found".to_string()))?;
    Ok(portfolio)
}

pub async fn delete(pool: &PgPool, owner: &str, id: &str) -> Result<(), AppError> {
    let id = parse_id(id)?;
    match db::portfolio_queries::delete_for_owner(pool, owner, id).await? {
        0 => Err(AppError::NotFound("Portfolio not found".to_string())),
        _ => Ok(()),
    }
}

// A malformed identifier is a client bug, not a miss: 400, never 404.
fn parse_id(id: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(id)
        .map_err(|_| AppError::Validation("Invalid portfolio ID format".to_string()))
}

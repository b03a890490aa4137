use sqlx::PgPool;
use uuid::Uuid;

use crate::models::Portfolio;

const PORTFOLIO_COLUMNS: &str = "id, owner, assets, window_days, min_asset_weight, \
     max_asset_weight, risk_free_rate, created_at";

pub async fn insert(pool: &PgPool, input: Portfolio) -> Result<Portfolio, sqlx::Error> {
    sqlx::query_as::<_, Portfolio>(&format!(
        "INSERT INTO portfolios (id, owner, assets, window_days, min_asset_weight, \
         max_asset_weight, risk_free_rate, created_at)
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
         RETURNING {PORTFOLIO_COLUMNS}"
    ))
    .bind(input.id)
    .bind(input.owner)
    .bind(input.assets)
    .bind(input.window_days)
    .bind(input.min_asset_weight)
    .bind(input.max_asset_weight)
    .bind(input.risk_free_rate)
    .bind(input.created_at)
    .fetch_one(pool)
    .await
}

// Listing is always owner-scoped; there is no unscoped variant on purpose.
pub async fn fetch_for_owner(pool: &PgPool, owner: &str) -> Result<Vec<Portfolio>, sqlx::Error> {
    sqlx::query_as::<_, Portfolio>(&format!(
        "SELECT {PORTFOLIO_COLUMNS}
         FROM portfolios
         WHERE owner = $1
         ORDER BY created_at"
    ))
    .bind(owner)
    .fetch_all(pool)
    .await
}

pub async fn fetch_one(pool: &PgPool, id: Uuid) -> Result<Option<Portfolio>, sqlx::Error> {
    sqlx::query_as::<_, Portfolio>(&format!(
        "SELECT {PORTFOLIO_COLUMNS}
         FROM portfolios
         WHERE id = $1"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await
}

/// Deletes only when the record belongs to `owner`; returns rows affected
/// so the caller cannot distinguish "absent" from "someone else's".
pub async fn delete_for_owner(pool: &PgPool, owner: &str, id: Uuid) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM portfolios WHERE id = $1 AND owner = $2")
        .bind(id)
        .bind(owner)
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}

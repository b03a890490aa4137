use serde_json::{json, Value};

use crate::errors::AppError;
use crate::external::engine::EngineClient;
use crate::models::{FindRequest, HistoricalRequest, OptimizeRequest};

// Validation always runs before any network call; an invalid request
// never reaches the engine.

pub async fn optimize(engine: &EngineClient, input: OptimizeRequest) -> Result<Value, AppError> {
    let payload = input.into_engine_request()?;
    engine.optimize(&payload).await
}

pub async fn find_symbol(engine: &EngineClient, input: FindRequest) -> Result<Value, AppError> {
    let name = input
        .name
        .filter(|n| !n.trim().is_empty())
        .ok_or_else(|| AppError::Validation("Name is required and must be a string".to_string()))?;
    engine.find(&json!({ "name": name })).await
}

pub async fn historical(
    engine: &EngineClient,
    input: HistoricalRequest,
) -> Result<Value, AppError> {
    input.validate()?;
    let data = engine.historical(&input).await?;
    if data.is_null() {
        return Err(AppError::NotFound("Historical data not found".to_string()));
    }
    Ok(data)
}

pub async fn market_snapshot(engine: &EngineClient) -> Result<Value, AppError> {
    let data = engine.market_snapshot().await?;
    if data.is_null() {
        return Err(AppError::NotFound("Market snapshot not found".to_string()));
    }
    Ok(data)
}

use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use tracing::error;

use crate::errors::AppError;
use crate::services::news_cache::NewsSource;

#[derive(Debug, Clone)]
pub struct EngineConfig {
    pub base_url: String,
    pub timeout_secs: u64,
    pub user_agent: String,
}

impl EngineConfig {
    pub fn from_env() -> Self {
        Self {
            base_url: std::env::var("ENGINE_BASE_URL")
                .unwrap_or_else(|_| "http://localhost:8000".to_string()),
            timeout_secs: std::env::var("ENGINE_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse::<u64>().ok())
                .unwrap_or(30),
            user_agent: std::env::var("ENGINE_USER_AGENT")
                .unwrap_or_else(|_| "Mozilla/5.0".to_string()),
        }
    }
}

/// HTTP client for the external optimization engine. The engine is the
/// only party that does optimization math; this client forwards requests
/// and translates failures into the gateway taxonomy.
pub struct EngineClient {
    base_url: String,
    client: reqwest::Client,
}

impl EngineClient {
    pub fn new(config: EngineConfig) -> Result<Self, AppError> {
        let client = reqwest::Client::builder()
            // A hung engine must not pin gateway request tasks forever.
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent)
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to build engine client: {e}")))?;
        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    pub async fn optimize<T: Serialize + Sync>(&self, payload: &T) -> Result<Value, AppError> {
        self.post("/optimize", payload, "Optimization failed").await
    }

    pub async fn find<T: Serialize + Sync>(&self, payload: &T) -> Result<Value, AppError> {
        self.post("/find", payload, "Symbol lookup failed").await
    }

    pub async fn historical<T: Serialize + Sync>(&self, payload: &T) -> Result<Value, AppError> {
        self.post("/historical", payload, "Historical data fetch failed")
            .await
    }

    pub async fn market_snapshot(&self) -> Result<Value, AppError> {
        let response = self
            .client
            .get(format!("{}/market_snapshot", self.base_url))
            .send()
            .await
            .map_err(|e| {
                error!("Engine request to /market_snapshot failed: {}", e);
                AppError::Internal("Internal Server Error".to_string())
            })?;
        read_engine_response(response, "Market snapshot fetch failed").await
    }

    async fn post<T: Serialize + Sync>(
        &self,
        path: &str,
        payload: &T,
        fallback: &str,
    ) -> Result<Value, AppError> {
        let response = self
            .client
            .post(format!("{}{}", self.base_url, path))
            .json(payload)
            .send()
            .await
            .map_err(|e| {
                error!("Engine request to {} failed: {}", path, e);
                AppError::Internal("Internal Server Error".to_string())
            })?;
        read_engine_response(response, fallback).await
    }
}

/// Success bodies pass through untouched (empty body becomes `Null` so the
/// caller can decide whether that means 404). Error bodies keep the
/// upstream status; the engine's `detail` field becomes the envelope error
/// and the raw body is surfaced under `details`.
async fn read_engine_response(
    response: reqwest::Response,
    fallback: &str,
) -> Result<Value, AppError> {
    let status = response.status();
    if status.is_success() {
        let text = response
            .text()
            .await
            .map_err(|e| AppError::Internal(format!("Failed to read engine response: {e}")))?;
        if text.trim().is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_str(&text)
            .map_err(|e| AppError::Internal(format!("Engine returned malformed JSON: {e}")))
    } else {
        let body = response.json::<Value>().await.ok();
        error!("Engine returned {}: {:?}", status, body);
        match body {
            Some(body) => {
                let message = body
                    .get("detail")
                    .and_then(|d| d.as_str())
                    .unwrap_or(fallback)
                    .to_string();
                Err(AppError::Upstream {
                    status: status.as_u16(),
                    message,
                    details: Some(body),
                })
            }
            None => Err(AppError::Internal("Internal Server Error".to_string())),
        }
    }
}

#[async_trait]
impl NewsSource for EngineClient {
    async fn fetch_news(&self) -> Result<Vec<Value>, AppError> {
        let response = self
            .client
            .get(format!("{}/news", self.base_url))
            .send()
            .await
            .map_err(|e| {
                error!("Engine request to /news failed: {}", e);
                AppError::Internal("Internal Server Error".to_string())
            })?;
        let body = read_engine_response(response, "News fetch failed").await?;
        match body {
            Value::Array(articles) => Ok(articles),
            other => {
                error!("Engine /news returned a non-array body: {}", other);
                Err(AppError::Internal("Internal Server Error".to_string()))
            }
        }
    }
}

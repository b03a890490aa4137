use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::engine::ConstraintsInput;

// A saved optimization request: the asset universe plus the constraint
// envelope the owner wants re-runs scoped to.
#[derive(Debug, Serialize, Deserialize, FromRow)]
pub struct Portfolio {
    pub id: uuid::Uuid,
    pub owner: String,
    pub assets: Vec<String>,
    pub window_days: i32,
    pub min_asset_weight: f64,
    pub max_asset_weight: f64,
    pub risk_free_rate: Option<f64>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// Client payload for POST /save. The owner is never read from the body;
/// it always comes from the verified bearer identity.
#[derive(Debug, Deserialize)]
pub struct SavePortfolioRequest {
    pub assets: Option<Vec<String>>,
    pub window_days: Option<i32>,
    pub constraints: Option<ConstraintsInput>,
}

impl Portfolio {
    pub fn new(owner: String, req: SavePortfolioRequest) -> Result<Self, String> {
        let assets = match req.assets {
            Some(assets) if !assets.is_empty() => assets,
            _ => return Err("Assets array is required and cannot be empty".to_string()),
        };
        let window_days = match req.window_days {
            Some(days) if days > 0 => days,
            _ => return Err("window_days is required and must be a positive number".to_string()),
        };
        let constraints = req.constraints.unwrap_or_default().with_defaults();
        Ok(Self {
            id: uuid::Uuid::new_v4(),
            owner,
            assets,
            window_days,
            min_asset_weight: constraints.min_asset_weight,
            max_asset_weight: constraints.max_asset_weight,
            risk_free_rate: constraints.risk_free_rate,
            created_at: chrono::Utc::now(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn owner_comes_from_identity_not_payload() {
        let req = SavePortfolioRequest {
            assets: Some(vec!["AAPL".into(), "MSFT".into()]),
            window_days: Some(252),
            constraints: None,
        };
        let portfolio = Portfolio::new("alice".into(), req).unwrap();
        assert_eq!(portfolio.owner, "alice");
        assert_eq!(portfolio.min_asset_weight, 0.05);
        assert_eq!(portfolio.max_asset_weight, 0.75);
        assert_eq!(portfolio.risk_free_rate, None);
    }

    #[test]
    fn incomplete_payload_is_rejected() {
        let req = SavePortfolioRequest {
            assets: None,
            window_days: Some(252),
            constraints: None,
        };
        assert!(Portfolio::new("alice".into(), req).is_err());

        let req = SavePortfolioRequest {
            assets: Some(vec!["AAPL".into()]),
            window_days: Some(-1),
            constraints: None,
        };
        assert!(Portfolio::new("alice".into(), req).is_err());
    }
}

use serde::{Deserialize, Serialize};

pub const DEFAULT_MIN_ASSET_WEIGHT: f64 = 0.05;
pub const DEFAULT_MAX_ASSET_WEIGHT: f64 = 0.75;

/// Constraint block as the client may send it; anything omitted is filled
/// with the gateway defaults before the request goes upstream.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConstraintsInput {
    pub min_asset_weight: Option<f64>,
    pub max_asset_weight: Option<f64>,
    pub risk_free_rate: Option<f64>,
}

/// Fully-populated constraint block forwarded to the optimization engine.
/// `risk_free_rate` serializes as `null` when absent so the engine decides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConstraints {
    pub min_asset_weight: f64,
    pub max_asset_weight: f64,
    pub risk_free_rate: Option<f64>,
}

impl ConstraintsInput {
    pub fn with_defaults(self) -> EngineConstraints {
        EngineConstraints {
            min_asset_weight: self.min_asset_weight.unwrap_or(DEFAULT_MIN_ASSET_WEIGHT),
            max_asset_weight: self.max_asset_weight.unwrap_or(DEFAULT_MAX_ASSET_WEIGHT),
            risk_free_rate: self.risk_free_rate,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct OptimizeRequest {
    pub assets: Option<Vec<String>>,
    pub window_days: Option<i32>,
    pub constraints: Option<ConstraintsInput>,
}

#[derive(Debug, Serialize)]
pub struct EngineOptimizeRequest {
    pub assets: Vec<String>,
    pub window_days: i32,
    pub constraints: EngineConstraints,
}

impl OptimizeRequest {
    /// Structural validation, then default filling. Runs before any I/O.
    pub fn into_engine_request(self) -> Result<EngineOptimizeRequest, String> {
        let assets = match self.assets {
            Some(assets) if !assets.is_empty() => assets,
            _ => return Err("Assets array is required and cannot be empty".to_string()),
        };
        let window_days = match self.window_days {
            Some(days) if days > 0 => days,
            _ => return Err("window_days is required and must be a positive number".to_string()),
        };
        Ok(EngineOptimizeRequest {
            assets,
            window_days,
            constraints: self.constraints.unwrap_or_default().with_defaults(),
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct FindRequest {
    pub name: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HistoricalRequest {
    pub symbol: Option<String>,
    pub start: Option<String>,
    pub end: Option<String>,
    pub step: Option<String>,
}

impl HistoricalRequest {
    pub fn validate(&self) -> Result<(), String> {
        let complete = [&self.symbol, &self.start, &self.end, &self.step]
            .iter()
            .all(|f| f.as_deref().map(|s| !s.trim().is_empty()).unwrap_or(false));
        if complete {
            Ok(())
        } else {
            Err("symbol, start, end, and step are all required".to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_assets_rejected_before_forwarding() {
        let req = OptimizeRequest {
            assets: Some(vec![]),
            window_days: Some(252),
            constraints: None,
        };
        assert!(req.into_engine_request().is_err());
    }

    #[test]
    fn non_positive_window_rejected() {
        let req = OptimizeRequest {
            assets: Some(vec!["AAPL".into()]),
            window_days: Some(0),
            constraints: None,
        };
        assert!(req.into_engine_request().is_err());
    }

    #[test]
    fn constraint_defaults_fill_every_field() {
        let req = OptimizeRequest {
            assets: Some(vec!["AAPL".into(), "MSFT".into()]),
            window_days: Some(252),
            constraints: Some(ConstraintsInput {
                min_asset_weight: None,
                max_asset_weight: Some(0.5),
                risk_free_rate: None,
            }),
        };
        let engine = req.into_engine_request().unwrap();
        assert_eq!(engine.constraints.min_asset_weight, DEFAULT_MIN_ASSET_WEIGHT);
        assert_eq!(engine.constraints.max_asset_weight, 0.5);
        assert_eq!(engine.constraints.risk_free_rate, None);
    }

    #[test]
    fn absent_risk_free_rate_serializes_as_null() {
        let req = OptimizeRequest {
            assets: Some(vec!["AAPL".into()]),
            window_days: Some(126),
            constraints: None,
        };
        let body = serde_json::to_value(req.into_engine_request().unwrap()).unwrap();
        assert_eq!(body["constraints"]["risk_free_rate"], serde_json::Value::Null);
        assert_eq!(body["constraints"]["min_asset_weight"], 0.05);
        assert_eq!(body["constraints"]["max_asset_weight"], 0.75);
    }

    #[test]
    fn historical_request_requires_all_fields() {
        let req = HistoricalRequest {
            symbol: Some("AAPL".into()),
            start: Some("2024-01-01".into()),
            end: None,
            step: Some("1d".into()),
        };
        assert!(req.validate().is_err());

        let req = HistoricalRequest {
            symbol: Some("AAPL".into()),
            start: Some("2024-01-01".into()),
            end: Some("2024-06-01".into()),
            step: Some("1d".into()),
        };
        assert!(req.validate().is_ok());
    }
}

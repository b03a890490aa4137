use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const DEFAULT_PAGE: u32 = 1;
pub const DEFAULT_LIMIT: u32 = 25;

#[derive(Debug, Deserialize)]
pub struct NewsQueryParams {
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

impl NewsQueryParams {
    /// Missing or zero values fall back to the defaults; `?limit=0` is a
    /// degenerate request, not a one-item page.
    pub fn normalize(self) -> (u32, u32) {
        let page = self.page.filter(|p| *p > 0).unwrap_or(DEFAULT_PAGE);
        let limit = self.limit.filter(|l| *l > 0).unwrap_or(DEFAULT_LIMIT);
        (page, limit)
    }
}

/// One page of the cached feed. `cached` reports whether the snapshot was
/// still within its TTL at the moment this response was built.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsPage {
    pub page: u32,
    pub limit: u32,
    pub total: usize,
    pub total_pages: usize,
    pub results: Vec<Value>,
    pub last_updated: chrono::DateTime<chrono::Utc>,
    pub cached: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_params_use_defaults() {
        let params = NewsQueryParams {
            page: None,
            limit: None,
        };
        assert_eq!(params.normalize(), (DEFAULT_PAGE, DEFAULT_LIMIT));
    }

    #[test]
    fn zero_params_fall_back_to_defaults() {
        let params = NewsQueryParams {
            page: Some(0),
            limit: Some(0),
        };
        assert_eq!(params.normalize(), (DEFAULT_PAGE, DEFAULT_LIMIT));
    }

    #[test]
    fn explicit_params_are_kept() {
        let params = NewsQueryParams {
            page: Some(3),
            limit: Some(10),
        };
        assert_eq!(params.normalize(), (3, 10));
    }
}

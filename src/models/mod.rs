mod auth;
mod engine;
mod news;
mod portfolio;
mod user;

pub use auth::{Credentials, TokenResponse};
pub use engine::{
    ConstraintsInput, EngineConstraints, EngineOptimizeRequest, FindRequest, HistoricalRequest,
    OptimizeRequest, DEFAULT_MAX_ASSET_WEIGHT, DEFAULT_MIN_ASSET_WEIGHT,
};
pub use news::{NewsPage, NewsQueryParams};
pub use portfolio::{Portfolio, SavePortfolioRequest};
pub use user::User;

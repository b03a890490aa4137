pub(crate) mod auth_service;
pub(crate) mod news_cache;
pub(crate) mod optimizer_service;
pub(crate) mod portfolio_service;
pub(crate) mod token_service;

pub(crate) mod portfolio_queries;
pub(crate) mod user_queries;

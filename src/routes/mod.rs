pub(crate) mod auth;
pub(crate) mod engine;
pub(crate) mod health;
pub(crate) mod news;
pub(crate) mod portfolios;

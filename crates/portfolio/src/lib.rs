//! Portfolio domain records (issuers, securities, investment accounts and
//! transactions) and their PostgreSQL persistence.

pub mod database;
pub mod errors;
pub mod models;

pub use database::Database;
pub use errors::PortfolioError;

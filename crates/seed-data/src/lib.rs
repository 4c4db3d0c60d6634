//! Reference data seeding for portfolio.
//!
//! This crate seeds an empty database with a fixed set of issuers,
//! securities, investment accounts and transactions. Seeding runs at most
//! once: if any issuer already exists nothing is written.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use seed_data::prelude::*;
//!
//! let db = Database::new(pool);
//! db.run_migrations().await?;
//!
//! let seeder = Seeder::new(db, SeedConfig::from_env()?.reference_date());
//! if let Some(SeedOutcome::Seeded(summary)) = seeder.seed_if_empty().await {
//!     println!("{summary:?}");
//! }
//! ```

pub mod calendar;
pub mod catalog;
pub mod config;
pub mod db;

// Re-export core types from portfolio crate
pub use portfolio::models::{SecurityType, TransactionType};

pub mod prelude {
    //! Convenient re-exports for common usage.

    pub use crate::config::{ConfigError, SeedConfig};
    pub use crate::db::{MemoryStore, SeedError, SeedOutcome, SeedStore, SeedSummary, Seeder};
    pub use crate::{SecurityType, TransactionType};
    pub use portfolio::Database;
}

//! Database integration for seeding reference data.
//!
//! The [`Seeder`] writes the catalog through any [`SeedStore`]: the
//! PostgreSQL-backed [`portfolio::Database`] or the in-process [`MemoryStore`].

mod memory;
mod seeder;
mod store;

pub use memory::MemoryStore;
pub use seeder::{SeedError, SeedOutcome, SeedSummary, Seeder};
pub use store::SeedStore;

//! Startup seed script - seeds reference data into an empty database
//!
//! Run with:
//! ```
//! cargo run -p seed-data --bin seed
//! ```
//!
//! A failed seed is logged and the process still exits cleanly unless
//! `SEED_STRICT=true`.

use seed_data::prelude::*;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = SeedConfig::from_env()?;
    let reference_date = config.reference_date();

    let outcome = if config.dry_run {
        tracing::info!("Dry run: seeding in-memory store");
        let seeder = Seeder::new(MemoryStore::new(), reference_date);
        seeder.seed_if_empty().await
    } else {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .connect(&config.database_url)
            .await?;

        tracing::info!("Connected to database");

        let db = Database::new(pool);
        db.run_migrations().await?;

        let seeder = Seeder::new(db, reference_date);
        seeder.seed_if_empty().await
    };

    match outcome {
        Some(SeedOutcome::Seeded(summary)) => {
            tracing::info!("Seed completed!");
            tracing::info!("  Issuers: {}", summary.issuers);
            tracing::info!("  Securities: {}", summary.securities);
            tracing::info!("  Accounts: {}", summary.accounts);
            tracing::info!("  Transactions: {}", summary.transactions);
        }
        Some(SeedOutcome::Skipped { existing_issuers }) => {
            tracing::info!("Nothing to do ({} issuers present)", existing_issuers);
        }
        None if config.strict => {
            anyhow::bail!("seeding failed, see the error above");
        }
        None => {
            tracing::warn!("Continuing startup with incomplete seed data");
        }
    }

    Ok(())
}

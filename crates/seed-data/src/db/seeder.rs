//! Startup seeding of the portfolio reference data.

use std::collections::HashMap;
use std::future::Future;

use chrono::NaiveDate;
use thiserror::Error;
use tracing::{error, info};

use portfolio::{
    PortfolioError,
    models::{
        InvestmentAccount, Issuer, NewInvestmentAccount, NewIssuer, NewSecurity, NewTransaction,
        Security,
    },
};

use super::SeedStore;
use crate::calendar;
use crate::catalog;

#[derive(Debug, Error)]
pub enum SeedError {
    #[error("Store error: {0}")]
    Store(#[from] PortfolioError),
    #[error("Seed data references unknown {kind} {key:?}")]
    UnknownReference { kind: &'static str, key: String },
    #[error("{entity} {id} was not found after commit")]
    MissingRecord { entity: &'static str, id: i64 },
    #[error("Date out of range for {what}")]
    DateOutOfRange { what: String },
}

/// Number of records created by a seeding run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SeedSummary {
    pub issuers: usize,
    pub securities: usize,
    pub accounts: usize,
    pub transactions: usize,
}

/// What a successful seeding call did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SeedOutcome {
    /// Issuers already existed; nothing was written.
    Skipped { existing_issuers: i64 },
    /// All four phases committed.
    Seeded(SeedSummary),
}

/// Seeds issuers, securities, investment accounts and transactions into an
/// empty store, one committed batch per record type.
pub struct Seeder<S> {
    store: S,
    reference_date: NaiveDate,
}

impl<S: SeedStore> Seeder<S> {
    /// Creates a seeder. Relative dates in the catalog resolve against `reference_date`.
    pub fn new(store: S, reference_date: NaiveDate) -> Self {
        Self {
            store,
            reference_date,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Seeds the store unless it already holds issuers.
    ///
    /// Never fails: errors are logged and reported as `None`, leaving any
    /// already-committed phase in place.
    pub async fn seed_if_empty(&self) -> Option<SeedOutcome> {
        match self.try_seed_if_empty().await {
            Ok(outcome) => Some(outcome),
            Err(e) => {
                error!("Failed to initialize seed data: {e}");
                None
            }
        }
    }

    /// Same as [`seed_if_empty`](Self::seed_if_empty) but returns the failure.
    pub async fn try_seed_if_empty(&self) -> Result<SeedOutcome, SeedError> {
        let existing_issuers = self.store.count_issuers().await?;
        if existing_issuers > 0 {
            info!(
                "Database already contains {} issuers, skipping seed",
                existing_issuers
            );
            return Ok(SeedOutcome::Skipped { existing_issuers });
        }

        info!("Seeding reference data as of {}...", self.reference_date);

        let issuers = self.seed_issuers().await?;
        let securities = self.seed_securities(&issuers).await?;
        let accounts = self.seed_accounts().await?;
        let transactions = self.seed_transactions(&securities, &accounts).await?;

        let summary = SeedSummary {
            issuers: issuers.len(),
            securities: securities.len(),
            accounts: accounts.len(),
            transactions: transactions.len(),
        };
        info!("Seed data initialized: {:?}", summary);
        Ok(SeedOutcome::Seeded(summary))
    }

    /// Commits the catalog issuers and returns them as re-read from the store.
    pub async fn seed_issuers(&self) -> Result<Vec<Issuer>, SeedError> {
        let rows: Vec<NewIssuer> = catalog::issuers()
            .iter()
            .map(|seed| NewIssuer {
                name: seed.name.to_string(),
                country: seed.country.to_string(),
                sector: seed.sector.to_string(),
                credit_rating: seed.credit_rating.to_string(),
                description: seed.description.to_string(),
            })
            .collect();

        let ids = self.store.insert_issuers(&rows).await?;
        let issuers = refetch("issuer", ids, |id| self.store.find_issuer(id)).await?;

        info!("Seeded {} issuers", issuers.len());
        Ok(issuers)
    }

    /// Commits the catalog securities against already-committed `issuers`.
    pub async fn seed_securities(&self, issuers: &[Issuer]) -> Result<Vec<Security>, SeedError> {
        let issuer_ids: HashMap<&str, i64> =
            issuers.iter().map(|i| (i.name.as_str(), i.id)).collect();

        let mut rows = Vec::new();
        for seed in catalog::securities() {
            let issuer_id = *issuer_ids
                .get(seed.issuer)
                .ok_or_else(|| SeedError::UnknownReference {
                    kind: "issuer",
                    key: seed.issuer.to_string(),
                })?;

            let maturity_date = match seed.maturity_years {
                Some(years) => Some(
                    calendar::years_after(self.reference_date, years).ok_or_else(|| {
                        SeedError::DateOutOfRange {
                            what: format!("maturity of {}", seed.ticker),
                        }
                    })?,
                ),
                None => None,
            };

            rows.push(NewSecurity {
                issuer_id,
                ticker: seed.ticker.to_string(),
                name: seed.name.to_string(),
                security_type: seed.security_type,
                currency: seed.currency.to_string(),
                last_price: seed.last_price,
                dividend_yield: seed.dividend_yield,
                maturity_date,
            });
        }

        let ids = self.store.insert_securities(&rows).await?;
        let securities = refetch("security", ids, |id| self.store.find_security(id)).await?;

        info!("Seeded {} securities", securities.len());
        Ok(securities)
    }

    /// Commits the catalog investment accounts.
    pub async fn seed_accounts(&self) -> Result<Vec<InvestmentAccount>, SeedError> {
        let mut rows = Vec::new();
        for seed in catalog::accounts() {
            let opened_date = calendar::months_before(self.reference_date, seed.opened_months_ago)
                .ok_or_else(|| SeedError::DateOutOfRange {
                    what: format!("opening of {}", seed.code),
                })?;

            rows.push(NewInvestmentAccount {
                account_code: seed.code.to_string(),
                owner_name: seed.owner_name.to_string(),
                currency: seed.currency.to_string(),
                strategy: seed.strategy.to_string(),
                opened_date,
                cash_balance: seed.cash_balance,
            });
        }

        let ids = self.store.insert_accounts(&rows).await?;
        let accounts = refetch("investment account", ids, |id| self.store.find_account(id)).await?;

        info!("Seeded {} investment accounts", accounts.len());
        Ok(accounts)
    }

    /// Commits the catalog transactions against committed `securities` and `accounts`.
    /// Returns the storage-assigned ids.
    pub async fn seed_transactions(
        &self,
        securities: &[Security],
        accounts: &[InvestmentAccount],
    ) -> Result<Vec<i64>, SeedError> {
        let security_ids: HashMap<&str, i64> =
            securities.iter().map(|s| (s.ticker.as_str(), s.id)).collect();
        let account_ids: HashMap<&str, i64> = accounts
            .iter()
            .map(|a| (a.account_code.as_str(), a.id))
            .collect();

        let mut rows = Vec::new();
        for seed in catalog::transactions() {
            let security_id = *security_ids
                .get(seed.ticker)
                .ok_or_else(|| SeedError::UnknownReference {
                    kind: "security",
                    key: seed.ticker.to_string(),
                })?;
            let account_id = *account_ids
                .get(seed.account_code)
                .ok_or_else(|| SeedError::UnknownReference {
                    kind: "investment account",
                    key: seed.account_code.to_string(),
                })?;
            let trade_date = calendar::days_before(self.reference_date, seed.days_ago)
                .ok_or_else(|| SeedError::DateOutOfRange {
                    what: format!("{} trade on {}", seed.transaction_type, seed.ticker),
                })?;

            rows.push(NewTransaction {
                security_id,
                account_id,
                transaction_type: seed.transaction_type,
                trade_date,
                quantity: seed.quantity,
                price: seed.price,
                fees: seed.fees,
            });
        }

        let ids = self.store.insert_transactions(&rows).await?;

        info!("Seeded {} transactions", ids.len());
        Ok(ids)
    }
}

/// Re-reads freshly committed rows by id so later phases link to stored records.
async fn refetch<T, F, Fut>(entity: &'static str, ids: Vec<i64>, find: F) -> Result<Vec<T>, SeedError>
where
    F: Fn(i64) -> Fut,
    Fut: Future<Output = Result<Option<T>, PortfolioError>>,
{
    let mut records = Vec::with_capacity(ids.len());
    for id in ids {
        let record = find(id)
            .await?
            .ok_or(SeedError::MissingRecord { entity, id })?;
        records.push(record);
    }
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::MemoryStore;
    use async_trait::async_trait;
    use portfolio::models::{SecurityType, TransactionType};
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;
    use std::collections::HashSet;

    fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn reference_date() -> NaiveDate {
        ymd(2026, 10, 19)
    }

    fn seeder() -> Seeder<MemoryStore> {
        Seeder::new(MemoryStore::new(), reference_date())
    }

    /// Delegates to a [`MemoryStore`] but fails every security insert.
    #[derive(Default)]
    struct BrokenSecurities {
        inner: MemoryStore,
    }

    #[async_trait]
    impl SeedStore for BrokenSecurities {
        async fn count_issuers(&self) -> Result<i64, PortfolioError> {
            self.inner.count_issuers().await
        }

        async fn insert_issuers(&self, rows: &[NewIssuer]) -> Result<Vec<i64>, PortfolioError> {
            self.inner.insert_issuers(rows).await
        }

        async fn find_issuer(&self, id: i64) -> Result<Option<Issuer>, PortfolioError> {
            self.inner.find_issuer(id).await
        }

        async fn insert_securities(
            &self,
            _rows: &[NewSecurity],
        ) -> Result<Vec<i64>, PortfolioError> {
            Err(PortfolioError::Database(sqlx::Error::PoolClosed))
        }

        async fn find_security(&self, id: i64) -> Result<Option<Security>, PortfolioError> {
            self.inner.find_security(id).await
        }

        async fn insert_accounts(
            &self,
            rows: &[NewInvestmentAccount],
        ) -> Result<Vec<i64>, PortfolioError> {
            self.inner.insert_accounts(rows).await
        }

        async fn find_account(
            &self,
            id: i64,
        ) -> Result<Option<InvestmentAccount>, PortfolioError> {
            self.inner.find_account(id).await
        }

        async fn insert_transactions(
            &self,
            rows: &[NewTransaction],
        ) -> Result<Vec<i64>, PortfolioError> {
            self.inner.insert_transactions(rows).await
        }
    }

    #[tokio::test]
    async fn test_seeds_ten_of_each() {
        let seeder = seeder();

        let outcome = seeder.seed_if_empty().await;

        assert_eq!(
            outcome,
            Some(SeedOutcome::Seeded(SeedSummary {
                issuers: 10,
                securities: 10,
                accounts: 10,
                transactions: 10,
            }))
        );
        assert_eq!(seeder.store().counts(), (10, 10, 10, 10));
    }

    #[tokio::test]
    async fn test_second_run_is_noop() {
        let seeder = seeder();

        seeder.seed_if_empty().await;
        let outcome = seeder.seed_if_empty().await;

        assert_eq!(outcome, Some(SeedOutcome::Skipped { existing_issuers: 10 }));
        assert_eq!(seeder.store().counts(), (10, 10, 10, 10));
    }

    #[tokio::test]
    async fn test_skips_when_any_issuer_exists() {
        let store = MemoryStore::new();
        store
            .insert_issuers(&[NewIssuer {
                name: "Existing".to_string(),
                country: "Россия".to_string(),
                sector: "Финансы".to_string(),
                credit_rating: "A".to_string(),
                description: String::new(),
            }])
            .await
            .unwrap();
        let seeder = Seeder::new(store, reference_date());

        let outcome = seeder.try_seed_if_empty().await.unwrap();

        assert_eq!(outcome, SeedOutcome::Skipped { existing_issuers: 1 });
        assert_eq!(seeder.store().counts(), (1, 0, 0, 0));
    }

    #[tokio::test]
    async fn test_gazprom_and_gazp() {
        let seeder = seeder();
        seeder.seed_if_empty().await;

        let issuers = seeder.store().issuers();
        let gazprom: Vec<_> = issuers.iter().filter(|i| i.name == "Газпром").collect();
        assert_eq!(gazprom.len(), 1);
        assert_eq!(gazprom[0].country, "Россия");
        assert_eq!(gazprom[0].sector, "Энергетика");
        assert_eq!(gazprom[0].credit_rating, "BBB+");

        let gazp = seeder
            .store()
            .securities()
            .into_iter()
            .find(|s| s.ticker == "GAZP")
            .unwrap();
        assert_eq!(gazp.last_price, dec!(180.50));
        assert_eq!(gazp.issuer_id, gazprom[0].id);
        assert_eq!(gazp.security_type, SecurityType::Stock);
        assert_eq!(gazp.dividend_yield, Some(dec!(5.2)));
        assert_eq!(gazp.currency, "RUB");
    }

    #[tokio::test]
    async fn test_currency_comes_from_catalog_rows() {
        let seeder = seeder();
        seeder.seed_if_empty().await;
        let store = seeder.store();

        for seed in catalog::securities() {
            let security = store
                .securities()
                .into_iter()
                .find(|s| s.ticker == seed.ticker)
                .unwrap();
            assert_eq!(security.currency, seed.currency, "{}", seed.ticker);
        }
        for seed in catalog::accounts() {
            let account = store
                .accounts()
                .into_iter()
                .find(|a| a.account_code == seed.code)
                .unwrap();
            assert_eq!(account.currency, seed.currency, "{}", seed.code);
        }
    }

    #[tokio::test]
    async fn test_dividend_has_exactly_zero_fees() {
        let seeder = seeder();
        seeder.seed_if_empty().await;

        let store = seeder.store();
        let acc_002 = store
            .accounts()
            .into_iter()
            .find(|a| a.account_code == "ACC-002")
            .unwrap();
        let sber = store
            .securities()
            .into_iter()
            .find(|s| s.ticker == "SBER")
            .unwrap();

        let dividends: Vec<_> = store
            .transactions()
            .into_iter()
            .filter(|t| t.transaction_type == TransactionType::Dividend)
            .collect();
        assert_eq!(dividends.len(), 1);
        assert_eq!(dividends[0].account_id, acc_002.id);
        assert_eq!(dividends[0].security_id, sber.id);
        assert_eq!(dividends[0].fees, Decimal::ZERO);
        assert!(dividends[0].fees.is_zero());
    }

    #[tokio::test]
    async fn test_referential_integrity() {
        let seeder = seeder();
        seeder.seed_if_empty().await;
        let store = seeder.store();

        let issuer_ids: HashSet<i64> = store.issuers().iter().map(|i| i.id).collect();
        let security_ids: HashSet<i64> = store.securities().iter().map(|s| s.id).collect();
        let account_ids: HashSet<i64> = store.accounts().iter().map(|a| a.id).collect();

        for security in store.securities() {
            assert!(issuer_ids.contains(&security.issuer_id), "{}", security.ticker);
        }
        for transaction in store.transactions() {
            assert!(security_ids.contains(&transaction.security_id));
            assert!(account_ids.contains(&transaction.account_id));
        }
    }

    #[tokio::test]
    async fn test_dates_resolve_against_reference_date() {
        let seeder = seeder();
        seeder.seed_if_empty().await;
        let store = seeder.store();

        let maturity = |ticker: &str| {
            store
                .securities()
                .into_iter()
                .find(|s| s.ticker == ticker)
                .unwrap()
                .maturity_date
        };
        assert_eq!(maturity("GAZP-2025"), Some(ymd(2027, 10, 19)));
        assert_eq!(maturity("LKOH-2026"), Some(ymd(2028, 10, 19)));
        assert_eq!(maturity("GAZP"), None);
        assert_eq!(maturity("SBER-ETF"), None);

        let opened = |code: &str| {
            store
                .accounts()
                .into_iter()
                .find(|a| a.account_code == code)
                .unwrap()
                .opened_date
        };
        assert_eq!(opened("ACC-001"), ymd(2025, 10, 19));
        assert_eq!(opened("ACC-009"), ymd(2024, 4, 19));

        let trade_dates: Vec<NaiveDate> = store.transactions().iter().map(|t| t.trade_date).collect();
        assert_eq!(trade_dates[0], ymd(2026, 10, 14));
        assert_eq!(trade_dates[7], ymd(2026, 10, 17));
        assert!(trade_dates.iter().all(|d| *d < reference_date()));
    }

    #[tokio::test]
    async fn test_failure_is_logged_not_raised() {
        let seeder = Seeder::new(BrokenSecurities::default(), reference_date());

        let outcome = seeder.seed_if_empty().await;

        assert!(outcome.is_none());
        // Issuers were committed before the security phase failed.
        assert_eq!(seeder.store().inner.counts(), (10, 0, 0, 0));
    }

    #[tokio::test]
    async fn test_try_seed_surfaces_failure() {
        let seeder = Seeder::new(BrokenSecurities::default(), reference_date());

        let err = seeder.try_seed_if_empty().await.unwrap_err();

        assert!(matches!(err, SeedError::Store(PortfolioError::Database(_))));
    }

    #[tokio::test]
    async fn test_rerun_after_partial_failure_skips() {
        let seeder = Seeder::new(BrokenSecurities::default(), reference_date());
        seeder.seed_if_empty().await;

        let outcome = seeder.seed_if_empty().await;

        assert_eq!(outcome, Some(SeedOutcome::Skipped { existing_issuers: 10 }));
        assert_eq!(seeder.store().inner.counts(), (10, 0, 0, 0));
    }

    #[tokio::test]
    async fn test_unknown_reference_is_reported() {
        let seeder = seeder();

        let err = seeder.seed_securities(&[]).await.unwrap_err();

        assert!(matches!(
            err,
            SeedError::UnknownReference { kind: "issuer", .. }
        ));
        assert!(seeder.store().securities().is_empty());
    }

    #[tokio::test]
    async fn test_missing_record_after_commit() {
        let err = refetch("issuer", vec![42], |_| async { Ok::<Option<Issuer>, PortfolioError>(None) })
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            SeedError::MissingRecord {
                entity: "issuer",
                id: 42
            }
        ));
    }
}

//! In-process store used for dry runs and tests.

use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;

use portfolio::{
    PortfolioError,
    models::{
        InvestmentAccount, Issuer, NewInvestmentAccount, NewIssuer, NewSecurity, NewTransaction,
        Security, Transaction,
    },
};

use super::SeedStore;

#[derive(Debug, Default)]
struct Tables {
    issuers: Vec<Issuer>,
    securities: Vec<Security>,
    accounts: Vec<InvestmentAccount>,
    transactions: Vec<Transaction>,
}

/// Store backed by vectors, with sequential ids starting at 1 and the same
/// foreign-key checks as the database schema.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
}

/// Next sequential id for a table holding `len` rows.
fn next_id(len: usize, offset: usize) -> i64 {
    (len + offset + 1) as i64
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn tables(&self) -> MutexGuard<'_, Tables> {
        self.tables.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn issuers(&self) -> Vec<Issuer> {
        self.tables().issuers.clone()
    }

    pub fn securities(&self) -> Vec<Security> {
        self.tables().securities.clone()
    }

    pub fn accounts(&self) -> Vec<InvestmentAccount> {
        self.tables().accounts.clone()
    }

    pub fn transactions(&self) -> Vec<Transaction> {
        self.tables().transactions.clone()
    }

    /// Row counts as (issuers, securities, accounts, transactions).
    pub fn counts(&self) -> (usize, usize, usize, usize) {
        let tables = self.tables();
        (
            tables.issuers.len(),
            tables.securities.len(),
            tables.accounts.len(),
            tables.transactions.len(),
        )
    }
}

#[async_trait]
impl SeedStore for MemoryStore {
    async fn count_issuers(&self) -> Result<i64, PortfolioError> {
        Ok(self.tables().issuers.len() as i64)
    }

    async fn insert_issuers(&self, issuers: &[NewIssuer]) -> Result<Vec<i64>, PortfolioError> {
        let mut tables = self.tables();
        let base = tables.issuers.len();

        let rows: Vec<Issuer> = issuers
            .iter()
            .enumerate()
            .map(|(i, new)| Issuer::from_new(next_id(base, i), new.clone()))
            .collect();
        let ids = rows.iter().map(|row| row.id).collect();
        tables.issuers.extend(rows);

        Ok(ids)
    }

    async fn find_issuer(&self, id: i64) -> Result<Option<Issuer>, PortfolioError> {
        Ok(self.tables().issuers.iter().find(|i| i.id == id).cloned())
    }

    async fn insert_securities(
        &self,
        securities: &[NewSecurity],
    ) -> Result<Vec<i64>, PortfolioError> {
        let mut tables = self.tables();

        // Validate the whole batch before touching the table.
        for security in securities {
            if !tables.issuers.iter().any(|i| i.id == security.issuer_id) {
                return Err(PortfolioError::NotFound {
                    entity: "issuer",
                    id: security.issuer_id,
                });
            }
        }

        let base = tables.securities.len();
        let rows: Vec<Security> = securities
            .iter()
            .enumerate()
            .map(|(i, new)| Security::from_new(next_id(base, i), new.clone()))
            .collect();
        let ids = rows.iter().map(|row| row.id).collect();
        tables.securities.extend(rows);

        Ok(ids)
    }

    async fn find_security(&self, id: i64) -> Result<Option<Security>, PortfolioError> {
        Ok(self.tables().securities.iter().find(|s| s.id == id).cloned())
    }

    async fn insert_accounts(
        &self,
        accounts: &[NewInvestmentAccount],
    ) -> Result<Vec<i64>, PortfolioError> {
        let mut tables = self.tables();
        let base = tables.accounts.len();

        let rows: Vec<InvestmentAccount> = accounts
            .iter()
            .enumerate()
            .map(|(i, new)| InvestmentAccount::from_new(next_id(base, i), new.clone()))
            .collect();
        let ids = rows.iter().map(|row| row.id).collect();
        tables.accounts.extend(rows);

        Ok(ids)
    }

    async fn find_account(&self, id: i64) -> Result<Option<InvestmentAccount>, PortfolioError> {
        Ok(self.tables().accounts.iter().find(|a| a.id == id).cloned())
    }

    async fn insert_transactions(
        &self,
        transactions: &[NewTransaction],
    ) -> Result<Vec<i64>, PortfolioError> {
        let mut tables = self.tables();

        for transaction in transactions {
            if !tables.securities.iter().any(|s| s.id == transaction.security_id) {
                return Err(PortfolioError::NotFound {
                    entity: "security",
                    id: transaction.security_id,
                });
            }
            if !tables.accounts.iter().any(|a| a.id == transaction.account_id) {
                return Err(PortfolioError::NotFound {
                    entity: "investment account",
                    id: transaction.account_id,
                });
            }
        }

        let base = tables.transactions.len();
        let rows: Vec<Transaction> = transactions
            .iter()
            .enumerate()
            .map(|(i, new)| Transaction::from_new(next_id(base, i), new.clone()))
            .collect();
        let ids = rows.iter().map(|row| row.id).collect();
        tables.transactions.extend(rows);

        Ok(ids)
    }
}

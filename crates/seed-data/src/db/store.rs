//! Persistence primitives the seeder relies on.

use async_trait::async_trait;

use portfolio::{
    Database, PortfolioError,
    models::{
        InvestmentAccount, Issuer, NewInvestmentAccount, NewIssuer, NewSecurity, NewTransaction,
        Security,
    },
};

/// Count, batch insert and find-by-id over the four seeded record types.
///
/// Each `insert_*` call is atomic: either every row in the batch is
/// committed and its storage-assigned id returned (in input order), or none is.
#[async_trait]
pub trait SeedStore: Send + Sync {
    async fn count_issuers(&self) -> Result<i64, PortfolioError>;

    async fn insert_issuers(&self, issuers: &[NewIssuer]) -> Result<Vec<i64>, PortfolioError>;
    async fn find_issuer(&self, id: i64) -> Result<Option<Issuer>, PortfolioError>;

    async fn insert_securities(
        &self,
        securities: &[NewSecurity],
    ) -> Result<Vec<i64>, PortfolioError>;
    async fn find_security(&self, id: i64) -> Result<Option<Security>, PortfolioError>;

    async fn insert_accounts(
        &self,
        accounts: &[NewInvestmentAccount],
    ) -> Result<Vec<i64>, PortfolioError>;
    async fn find_account(&self, id: i64) -> Result<Option<InvestmentAccount>, PortfolioError>;

    async fn insert_transactions(
        &self,
        transactions: &[NewTransaction],
    ) -> Result<Vec<i64>, PortfolioError>;
}

#[async_trait]
impl SeedStore for Database {
    async fn count_issuers(&self) -> Result<i64, PortfolioError> {
        Database::count_issuers(self).await
    }

    async fn insert_issuers(&self, issuers: &[NewIssuer]) -> Result<Vec<i64>, PortfolioError> {
        Database::insert_issuers(self, issuers).await
    }

    async fn find_issuer(&self, id: i64) -> Result<Option<Issuer>, PortfolioError> {
        self.get_issuer(id).await
    }

    async fn insert_securities(
        &self,
        securities: &[NewSecurity],
    ) -> Result<Vec<i64>, PortfolioError> {
        Database::insert_securities(self, securities).await
    }

    async fn find_security(&self, id: i64) -> Result<Option<Security>, PortfolioError> {
        self.get_security(id).await
    }

    async fn insert_accounts(
        &self,
        accounts: &[NewInvestmentAccount],
    ) -> Result<Vec<i64>, PortfolioError> {
        Database::insert_accounts(self, accounts).await
    }

    async fn find_account(&self, id: i64) -> Result<Option<InvestmentAccount>, PortfolioError> {
        self.get_account(id).await
    }

    async fn insert_transactions(
        &self,
        transactions: &[NewTransaction],
    ) -> Result<Vec<i64>, PortfolioError> {
        Database::insert_transactions(self, transactions).await
    }
}

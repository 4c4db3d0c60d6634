use crate::errors::PortfolioError;
use crate::models::{
    InvestmentAccount, Issuer, NewInvestmentAccount, NewIssuer, NewSecurity, NewTransaction,
    Security, Transaction,
};
use sqlx::PgPool;
use tracing::info;

#[derive(Clone)]
pub struct Database {
    pool: PgPool,
}

impl Database {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Applies the embedded schema migrations.
    pub async fn run_migrations(&self) -> Result<(), PortfolioError> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        info!("Schema migrations applied");
        Ok(())
    }

    async fn count(&self, table: &'static str) -> Result<i64, PortfolioError> {
        let count: i64 = sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {table}"))
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    pub async fn count_issuers(&self) -> Result<i64, PortfolioError> {
        self.count("issuers").await
    }

    pub async fn count_securities(&self) -> Result<i64, PortfolioError> {
        self.count("securities").await
    }

    pub async fn count_accounts(&self) -> Result<i64, PortfolioError> {
        self.count("investment_accounts").await
    }

    pub async fn count_transactions(&self) -> Result<i64, PortfolioError> {
        self.count("transactions").await
    }

    /// Inserts all issuers in a single transaction and returns their ids in input order.
    pub async fn insert_issuers(&self, issuers: &[NewIssuer]) -> Result<Vec<i64>, PortfolioError> {
        let mut tx = self.pool.begin().await?;
        let mut ids = Vec::with_capacity(issuers.len());

        for issuer in issuers {
            let id: i64 = sqlx::query_scalar(
                r#"
                INSERT INTO issuers (name, country, sector, credit_rating, description)
                VALUES ($1, $2, $3, $4, $5)
                RETURNING id
                "#,
            )
            .bind(&issuer.name)
            .bind(&issuer.country)
            .bind(&issuer.sector)
            .bind(&issuer.credit_rating)
            .bind(&issuer.description)
            .fetch_one(&mut *tx)
            .await?;
            ids.push(id);
        }

        tx.commit().await?;
        Ok(ids)
    }

    pub async fn get_issuer(&self, id: i64) -> Result<Option<Issuer>, PortfolioError> {
        let issuer = sqlx::query_as(
            r#"
            SELECT id, name, country, sector, credit_rating, description
            FROM issuers
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(issuer)
    }

    pub async fn find_issuer_by_name(&self, name: &str) -> Result<Option<Issuer>, PortfolioError> {
        let issuer = sqlx::query_as(
            r#"
            SELECT id, name, country, sector, credit_rating, description
            FROM issuers
            WHERE name = $1
            ORDER BY id
            LIMIT 1
            "#,
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;

        Ok(issuer)
    }

    /// Inserts all securities in a single transaction. Every `issuer_id` must already exist.
    pub async fn insert_securities(
        &self,
        securities: &[NewSecurity],
    ) -> Result<Vec<i64>, PortfolioError> {
        let mut tx = self.pool.begin().await?;
        let mut ids = Vec::with_capacity(securities.len());

        for security in securities {
            let id: i64 = sqlx::query_scalar(
                r#"
                INSERT INTO securities (
                    issuer_id, ticker, name, security_type, currency,
                    last_price, dividend_yield, maturity_date
                )
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
                RETURNING id
                "#,
            )
            .bind(security.issuer_id)
            .bind(&security.ticker)
            .bind(&security.name)
            .bind(security.security_type)
            .bind(&security.currency)
            .bind(security.last_price)
            .bind(security.dividend_yield)
            .bind(security.maturity_date)
            .fetch_one(&mut *tx)
            .await?;
            ids.push(id);
        }

        tx.commit().await?;
        Ok(ids)
    }

    pub async fn get_security(&self, id: i64) -> Result<Option<Security>, PortfolioError> {
        let security = sqlx::query_as(
            r#"
            SELECT id, issuer_id, ticker, name, security_type, currency,
                   last_price, dividend_yield, maturity_date
            FROM securities
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(security)
    }

    pub async fn find_security_by_ticker(
        &self,
        ticker: &str,
    ) -> Result<Option<Security>, PortfolioError> {
        let security = sqlx::query_as(
            r#"
            SELECT id, issuer_id, ticker, name, security_type, currency,
                   last_price, dividend_yield, maturity_date
            FROM securities
            WHERE ticker = $1
            "#,
        )
        .bind(ticker)
        .fetch_optional(&self.pool)
        .await?;

        Ok(security)
    }

    pub async fn insert_accounts(
        &self,
        accounts: &[NewInvestmentAccount],
    ) -> Result<Vec<i64>, PortfolioError> {
        let mut tx = self.pool.begin().await?;
        let mut ids = Vec::with_capacity(accounts.len());

        for account in accounts {
            let id: i64 = sqlx::query_scalar(
                r#"
                INSERT INTO investment_accounts (
                    account_code, owner_name, currency, strategy, opened_date, cash_balance
                )
                VALUES ($1, $2, $3, $4, $5, $6)
                RETURNING id
                "#,
            )
            .bind(&account.account_code)
            .bind(&account.owner_name)
            .bind(&account.currency)
            .bind(&account.strategy)
            .bind(account.opened_date)
            .bind(account.cash_balance)
            .fetch_one(&mut *tx)
            .await?;
            ids.push(id);
        }

        tx.commit().await?;
        Ok(ids)
    }

    pub async fn get_account(&self, id: i64) -> Result<Option<InvestmentAccount>, PortfolioError> {
        let account = sqlx::query_as(
            r#"
            SELECT id, account_code, owner_name, currency, strategy, opened_date, cash_balance
            FROM investment_accounts
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(account)
    }

    pub async fn find_account_by_code(
        &self,
        code: &str,
    ) -> Result<Option<InvestmentAccount>, PortfolioError> {
        let account = sqlx::query_as(
            r#"
            SELECT id, account_code, owner_name, currency, strategy, opened_date, cash_balance
            FROM investment_accounts
            WHERE account_code = $1
            "#,
        )
        .bind(code)
        .fetch_optional(&self.pool)
        .await?;

        Ok(account)
    }

    /// Inserts all transactions in a single transaction. Referenced securities
    /// and accounts must already exist.
    pub async fn insert_transactions(
        &self,
        transactions: &[NewTransaction],
    ) -> Result<Vec<i64>, PortfolioError> {
        let mut tx = self.pool.begin().await?;
        let mut ids = Vec::with_capacity(transactions.len());

        for transaction in transactions {
            let id: i64 = sqlx::query_scalar(
                r#"
                INSERT INTO transactions (
                    security_id, account_id, transaction_type, trade_date, quantity, price, fees
                )
                VALUES ($1, $2, $3, $4, $5, $6, $7)
                RETURNING id
                "#,
            )
            .bind(transaction.security_id)
            .bind(transaction.account_id)
            .bind(transaction.transaction_type)
            .bind(transaction.trade_date)
            .bind(transaction.quantity)
            .bind(transaction.price)
            .bind(transaction.fees)
            .fetch_one(&mut *tx)
            .await?;
            ids.push(id);
        }

        tx.commit().await?;
        Ok(ids)
    }

    pub async fn get_account_transactions(
        &self,
        account_id: i64,
    ) -> Result<Vec<Transaction>, PortfolioError> {
        let transactions: Vec<Transaction> = sqlx::query_as(
            r#"
            SELECT id, security_id, account_id, transaction_type, trade_date, quantity, price, fees
            FROM transactions
            WHERE account_id = $1
            ORDER BY trade_date DESC, id
            "#,
        )
        .bind(account_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(transactions)
    }
}

use std::fmt;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Issuer {
    pub id: i64,
    pub name: String,
    pub country: String,
    pub sector: String,
    pub credit_rating: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewIssuer {
    pub name: String,
    pub country: String,
    pub sector: String,
    pub credit_rating: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Security {
    pub id: i64,
    pub issuer_id: i64,
    pub ticker: String,
    pub name: String,
    pub security_type: SecurityType,
    pub currency: String,
    pub last_price: Decimal,
    pub dividend_yield: Option<Decimal>,
    /// Only set for bonds.
    pub maturity_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewSecurity {
    pub issuer_id: i64,
    pub ticker: String,
    pub name: String,
    pub security_type: SecurityType,
    pub currency: String,
    pub last_price: Decimal,
    pub dividend_yield: Option<Decimal>,
    pub maturity_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "security_type", rename_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum SecurityType {
    Stock,
    Bond,
    Etf,
}

impl SecurityType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SecurityType::Stock => "STOCK",
            SecurityType::Bond => "BOND",
            SecurityType::Etf => "ETF",
        }
    }
}

impl fmt::Display for SecurityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct InvestmentAccount {
    pub id: i64,
    pub account_code: String,
    pub owner_name: String,
    pub currency: String,
    pub strategy: String,
    pub opened_date: NaiveDate,
    pub cash_balance: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewInvestmentAccount {
    pub account_code: String,
    pub owner_name: String,
    pub currency: String,
    pub strategy: String,
    pub opened_date: NaiveDate,
    pub cash_balance: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Transaction {
    pub id: i64,
    pub security_id: i64,
    pub account_id: i64,
    pub transaction_type: TransactionType,
    pub trade_date: NaiveDate,
    pub quantity: Decimal,
    pub price: Decimal,
    pub fees: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewTransaction {
    pub security_id: i64,
    pub account_id: i64,
    pub transaction_type: TransactionType,
    pub trade_date: NaiveDate,
    pub quantity: Decimal,
    pub price: Decimal,
    pub fees: Decimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "transaction_type", rename_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum TransactionType {
    Buy,
    Sell,
    Dividend,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Buy => "BUY",
            TransactionType::Sell => "SELL",
            TransactionType::Dividend => "DIVIDEND",
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Issuer {
    /// Attaches a storage-assigned id to an insertable record.
    pub fn from_new(id: i64, new: NewIssuer) -> Self {
        Self {
            id,
            name: new.name,
            country: new.country,
            sector: new.sector,
            credit_rating: new.credit_rating,
            description: new.description,
        }
    }
}

impl Security {
    pub fn from_new(id: i64, new: NewSecurity) -> Self {
        Self {
            id,
            issuer_id: new.issuer_id,
            ticker: new.ticker,
            name: new.name,
            security_type: new.security_type,
            currency: new.currency,
            last_price: new.last_price,
            dividend_yield: new.dividend_yield,
            maturity_date: new.maturity_date,
        }
    }
}

impl InvestmentAccount {
    pub fn from_new(id: i64, new: NewInvestmentAccount) -> Self {
        Self {
            id,
            account_code: new.account_code,
            owner_name: new.owner_name,
            currency: new.currency,
            strategy: new.strategy,
            opened_date: new.opened_date,
            cash_balance: new.cash_balance,
        }
    }
}

impl Transaction {
    pub fn from_new(id: i64, new: NewTransaction) -> Self {
        Self {
            id,
            security_id: new.security_id,
            account_id: new.account_id,
            transaction_type: new.transaction_type,
            trade_date: new.trade_date,
            quantity: new.quantity,
            price: new.price,
            fees: new.fees,
        }
    }
}

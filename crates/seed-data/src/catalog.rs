//! Fixed reference data seeded into an empty database.
//!
//! Rows reference each other by natural key: a security names its issuer,
//! a transaction names its security ticker and account code. Dates are kept
//! as offsets and resolved against the seeder's reference date.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use portfolio::models::{SecurityType, TransactionType};

const RUB: &str = "RUB";

#[derive(Debug, Clone, Copy)]
pub struct IssuerSeed {
    pub name: &'static str,
    pub country: &'static str,
    pub sector: &'static str,
    pub credit_rating: &'static str,
    pub description: &'static str,
}

#[derive(Debug, Clone, Copy)]
pub struct SecuritySeed {
    /// Name of the owning issuer.
    pub issuer: &'static str,
    pub ticker: &'static str,
    pub name: &'static str,
    pub security_type: SecurityType,
    /// ISO 4217 code the price is quoted in.
    pub currency: &'static str,
    pub last_price: Decimal,
    pub dividend_yield: Option<Decimal>,
    /// Years from the reference date until maturity. Bonds only.
    pub maturity_years: Option<u32>,
}

#[derive(Debug, Clone, Copy)]
pub struct AccountSeed {
    pub code: &'static str,
    pub owner_name: &'static str,
    pub currency: &'static str,
    pub strategy: &'static str,
    pub opened_months_ago: u32,
    pub cash_balance: Decimal,
}

#[derive(Debug, Clone, Copy)]
pub struct TransactionSeed {
    pub ticker: &'static str,
    pub account_code: &'static str,
    pub transaction_type: TransactionType,
    pub days_ago: u32,
    pub quantity: Decimal,
    pub price: Decimal,
    pub fees: Decimal,
}

const fn issuer(
    name: &'static str,
    sector: &'static str,
    credit_rating: &'static str,
    description: &'static str,
) -> IssuerSeed {
    IssuerSeed {
        name,
        country: "Россия",
        sector,
        credit_rating,
        description,
    }
}

pub fn issuers() -> [IssuerSeed; 10] {
    [
        issuer("Газпром", "Энергетика", "BBB+", "Крупнейшая газовая компания России"),
        issuer("Сбербанк", "Финансы", "BBB", "Крупнейший банк России"),
        issuer("Лукойл", "Энергетика", "BBB+", "Одна из крупнейших нефтяных компаний"),
        issuer("Яндекс", "Технологии", "BB+", "Крупнейшая IT-компания России"),
        issuer("Норникель", "Металлургия", "BBB", "Крупнейший производитель никеля"),
        issuer("Роснефть", "Энергетика", "BBB", "Крупнейшая нефтяная компания"),
        issuer("ВТБ", "Финансы", "BB+", "Второй по величине банк России"),
        issuer("МТС", "Телекоммуникации", "BB", "Крупнейший оператор связи"),
        issuer("Магнит", "Ритейл", "BB", "Крупнейшая сеть магазинов"),
        issuer("Аэрофлот", "Транспорт", "B+", "Национальный авиаперевозчик"),
    ]
}

fn stock(
    issuer: &'static str,
    ticker: &'static str,
    name: &'static str,
    currency: &'static str,
    last_price: Decimal,
    dividend_yield: Decimal,
) -> SecuritySeed {
    SecuritySeed {
        issuer,
        ticker,
        name,
        security_type: SecurityType::Stock,
        currency,
        last_price,
        dividend_yield: Some(dividend_yield),
        maturity_years: None,
    }
}

fn bond(
    issuer: &'static str,
    ticker: &'static str,
    name: &'static str,
    currency: &'static str,
    last_price: Decimal,
    maturity_years: u32,
) -> SecuritySeed {
    SecuritySeed {
        issuer,
        ticker,
        name,
        security_type: SecurityType::Bond,
        currency,
        last_price,
        dividend_yield: None,
        maturity_years: Some(maturity_years),
    }
}

fn etf(
    issuer: &'static str,
    ticker: &'static str,
    name: &'static str,
    currency: &'static str,
    last_price: Decimal,
) -> SecuritySeed {
    SecuritySeed {
        issuer,
        ticker,
        name,
        security_type: SecurityType::Etf,
        currency,
        last_price,
        dividend_yield: None,
        maturity_years: None,
    }
}

pub fn securities() -> [SecuritySeed; 10] {
    [
        stock("Газпром", "GAZP", "Акции Газпром", RUB, dec!(180.50), dec!(5.2)),
        stock("Сбербанк", "SBER", "Акции Сбербанк", RUB, dec!(285.30), dec!(8.1)),
        stock("Лукойл", "LKOH", "Акции Лукойл", RUB, dec!(7450.00), dec!(6.5)),
        stock("Яндекс", "YNDX", "Акции Яндекс", RUB, dec!(3120.50), dec!(0.0)),
        stock("Норникель", "GMKN", "Акции Норникель", RUB, dec!(15800.00), dec!(9.2)),
        bond("Газпром", "GAZP-2025", "Облигации Газпром 2025", RUB, dec!(100.25), 1),
        etf("Сбербанк", "SBER-ETF", "ETF Сбербанк", RUB, dec!(285.00)),
        stock("ВТБ", "VTBR", "Акции ВТБ", RUB, dec!(0.045), dec!(7.8)),
        stock("МТС", "MTSS", "Акции МТС", RUB, dec!(285.75), dec!(10.5)),
        bond("Лукойл", "LKOH-2026", "Облигации Лукойл 2026", RUB, dec!(101.50), 2),
    ]
}

const CONSERVATIVE: &str = "Консервативная";
const AGGRESSIVE: &str = "Агрессивная";
const BALANCED: &str = "Сбалансированная";

fn account(
    code: &'static str,
    owner_name: &'static str,
    currency: &'static str,
    strategy: &'static str,
    opened_months_ago: u32,
    cash_balance: Decimal,
) -> AccountSeed {
    AccountSeed {
        code,
        owner_name,
        currency,
        strategy,
        opened_months_ago,
        cash_balance,
    }
}

pub fn accounts() -> [AccountSeed; 10] {
    [
        account("ACC-001", "Иван Петров", RUB, CONSERVATIVE, 12, dec!(500000.00)),
        account("ACC-002", "Мария Сидорова", RUB, AGGRESSIVE, 6, dec!(1200000.00)),
        account("ACC-003", "Алексей Смирнов", RUB, BALANCED, 24, dec!(800000.00)),
        account("ACC-004", "Елена Козлова", RUB, CONSERVATIVE, 3, dec!(300000.00)),
        account("ACC-005", "Дмитрий Волков", RUB, AGGRESSIVE, 18, dec!(2000000.00)),
        account("ACC-006", "Анна Новикова", RUB, BALANCED, 9, dec!(750000.00)),
        account("ACC-007", "Сергей Морозов", RUB, CONSERVATIVE, 15, dec!(600000.00)),
        account("ACC-008", "Ольга Павлова", RUB, AGGRESSIVE, 2, dec!(1500000.00)),
        account("ACC-009", "Николай Соколов", RUB, BALANCED, 30, dec!(950000.00)),
        account("ACC-010", "Татьяна Лебедева", RUB, CONSERVATIVE, 7, dec!(400000.00)),
    ]
}

fn trade(
    ticker: &'static str,
    account_code: &'static str,
    transaction_type: TransactionType,
    days_ago: u32,
    quantity: Decimal,
    price: Decimal,
    fees: Decimal,
) -> TransactionSeed {
    TransactionSeed {
        ticker,
        account_code,
        transaction_type,
        days_ago,
        quantity,
        price,
        fees,
    }
}

pub fn transactions() -> [TransactionSeed; 10] {
    use TransactionType::{Buy, Dividend, Sell};

    [
        trade("GAZP", "ACC-001", Buy, 5, dec!(100), dec!(180.50), dec!(50.00)),
        trade("SBER", "ACC-002", Buy, 3, dec!(200), dec!(285.30), dec!(100.00)),
        trade("LKOH", "ACC-003", Buy, 10, dec!(50), dec!(7450.00), dec!(200.00)),
        trade("GAZP", "ACC-001", Sell, 1, dec!(30), dec!(182.00), dec!(30.00)),
        trade("YNDX", "ACC-004", Buy, 7, dec!(150), dec!(3120.50), dec!(150.00)),
        trade("GMKN", "ACC-005", Buy, 4, dec!(20), dec!(15800.00), dec!(250.00)),
        trade("GAZP-2025", "ACC-006", Buy, 6, dec!(1000), dec!(100.25), dec!(100.00)),
        trade("SBER", "ACC-002", Dividend, 2, dec!(200), dec!(23.10), Decimal::ZERO),
        trade("SBER-ETF", "ACC-007", Buy, 8, dec!(500), dec!(285.00), dec!(120.00)),
        trade("VTBR", "ACC-008", Buy, 9, dec!(10000), dec!(0.045), dec!(50.00)),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_catalog_sizes() {
        assert_eq!(issuers().len(), 10);
        assert_eq!(securities().len(), 10);
        assert_eq!(accounts().len(), 10);
        assert_eq!(transactions().len(), 10);
    }

    #[test]
    fn test_natural_keys_are_unique() {
        let names: HashSet<_> = issuers().iter().map(|i| i.name).collect();
        assert_eq!(names.len(), 10);

        let tickers: HashSet<_> = securities().iter().map(|s| s.ticker).collect();
        assert_eq!(tickers.len(), 10);

        let codes: HashSet<_> = accounts().iter().map(|a| a.code).collect();
        assert_eq!(codes.len(), 10);
    }

    #[test]
    fn test_references_resolve() {
        let names: HashSet<_> = issuers().iter().map(|i| i.name).collect();
        let tickers: HashSet<_> = securities().iter().map(|s| s.ticker).collect();
        let codes: HashSet<_> = accounts().iter().map(|a| a.code).collect();

        for security in securities() {
            assert!(
                names.contains(security.issuer),
                "Unknown issuer for {}: {}",
                security.ticker,
                security.issuer
            );
        }

        for transaction in transactions() {
            assert!(tickers.contains(transaction.ticker), "{}", transaction.ticker);
            assert!(
                codes.contains(transaction.account_code),
                "{}",
                transaction.account_code
            );
        }
    }

    #[test]
    fn test_only_bonds_mature() {
        for security in securities() {
            match security.security_type {
                SecurityType::Bond => {
                    assert!(security.maturity_years.is_some(), "{}", security.ticker);
                    assert!(security.dividend_yield.is_none(), "{}", security.ticker);
                }
                SecurityType::Stock => {
                    assert!(security.maturity_years.is_none(), "{}", security.ticker);
                    assert!(security.dividend_yield.is_some(), "{}", security.ticker);
                }
                SecurityType::Etf => {
                    assert!(security.maturity_years.is_none(), "{}", security.ticker);
                    assert!(security.dividend_yield.is_none(), "{}", security.ticker);
                }
            }
        }
    }

    #[test]
    fn test_currencies_are_iso_codes() {
        let codes = securities()
            .iter()
            .map(|s| s.currency)
            .chain(accounts().iter().map(|a| a.currency))
            .collect::<Vec<_>>();

        assert_eq!(codes.len(), 20);
        for code in codes {
            assert_eq!(code.len(), 3, "{code}");
            assert!(code.chars().all(|c| c.is_ascii_uppercase()), "{code}");
        }
    }

    #[test]
    fn test_gazprom_row() {
        let gazprom = issuers()[0];
        assert_eq!(gazprom.name, "Газпром");
        assert_eq!(gazprom.country, "Россия");
        assert_eq!(gazprom.sector, "Энергетика");
        assert_eq!(gazprom.credit_rating, "BBB+");

        let gazp = securities()[0];
        assert_eq!(gazp.ticker, "GAZP");
        assert_eq!(gazp.issuer, "Газпром");
        assert_eq!(gazp.last_price, dec!(180.50));
        assert_eq!(gazp.currency, "RUB");
    }

    #[test]
    fn test_decimals_are_exact() {
        let vtbr = securities()
            .into_iter()
            .find(|s| s.ticker == "VTBR")
            .unwrap();
        assert_eq!(vtbr.last_price.to_string(), "0.045");

        let dividend = transactions()
            .into_iter()
            .find(|t| t.transaction_type == TransactionType::Dividend)
            .unwrap();
        assert_eq!(dividend.account_code, "ACC-002");
        assert_eq!(dividend.ticker, "SBER");
        assert_eq!(dividend.fees, Decimal::ZERO);
        assert_eq!(dividend.price.to_string(), "23.10");
    }
}

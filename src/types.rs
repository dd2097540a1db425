//! Common types shared by the conversion screen, the wallet overview and the data providers.

use crate::error::{Error, Result};
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Currencies supported by the wallet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Currency {
    /// Canadian dollar.
    Cad,
    /// Nigerian naira.
    Ngn,
}

impl FromStr for Currency {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_uppercase().as_str() {
            "CAD" => Ok(Currency::Cad),
            "NGN" => Ok(Currency::Ngn),
            _ => Err(Error::InvalidCurrency(s.to_string())),
        }
    }
}

impl TryFrom<String> for Currency {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<Currency> for String {
    fn from(currency: Currency) -> Self {
        currency.code().to_string()
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl Currency {
    /// ISO 4217 code.
    pub fn code(&self) -> &'static str {
        match self {
            Currency::Cad => "CAD",
            Currency::Ngn => "NGN",
        }
    }

    /// Display symbol prepended to amounts.
    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::Cad => "$",
            Currency::Ngn => "₦",
        }
    }
}

/// Ordered currency pair. Rates are quoted as units of `quote` per 1 unit of `base`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CurrencyPair {
    pub base: Currency,
    pub quote: Currency,
}

impl CurrencyPair {
    pub fn new(base: Currency, quote: Currency) -> Result<Self> {
        if base == quote {
            return Err(Error::InvalidCurrency(format!(
                "pair needs two distinct currencies, got {base}/{quote}"
            )));
        }
        Ok(Self { base, quote })
    }

    /// Whether `currency` is one side of the pair.
    pub fn contains(&self, currency: Currency) -> bool {
        self.base == currency || self.quote == currency
    }

    /// The other side of the pair. Returns `None` for a currency outside the pair.
    pub fn counterpart(&self, currency: Currency) -> Option<Currency> {
        if currency == self.base {
            Some(self.quote)
        } else if currency == self.quote {
            Some(self.base)
        } else {
            None
        }
    }

    /// Conversion direction when `from` is the input currency.
    pub fn direction_from(&self, from: Currency) -> Direction {
        if from == self.base {
            Direction::BaseToQuote
        } else {
            Direction::QuoteToBase
        }
    }
}

impl Default for CurrencyPair {
    fn default() -> Self {
        Self {
            base: Currency::Cad,
            quote: Currency::Ngn,
        }
    }
}

/// Which way an amount flows through an exchange rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Multiply by the rate.
    BaseToQuote,
    /// Divide by the rate.
    QuoteToBase,
}

/// Debit/Credit indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DebitCredit {
    /// Debit transaction (outgoing).
    Debit,
    /// Credit transaction (incoming).
    Credit,
}

impl FromStr for DebitCredit {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_uppercase().as_str() {
            "D" | "DEBIT" | "OUT" | "-" => Ok(DebitCredit::Debit),
            "C" | "CREDIT" | "IN" | "+" => Ok(DebitCredit::Credit),
            _ => Err(Error::InvalidConfig(format!(
                "unknown transaction direction: {s} (expected debit or credit)"
            ))),
        }
    }
}

impl DebitCredit {
    /// Single-letter code used in exports.
    pub fn code(&self) -> &'static str {
        match self {
            DebitCredit::Debit => "D",
            DebitCredit::Credit => "C",
        }
    }

    /// Sign shown in front of a transaction amount.
    pub fn sign(&self) -> &'static str {
        match self {
            DebitCredit::Debit => "-",
            DebitCredit::Credit => "+",
        }
    }
}

/// A wallet as supplied by the data source: balance and caption are display-ready strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Wallet {
    pub id: u32,
    pub title: String,
    pub currency: Currency,
    /// Balance with its currency symbol, e.g. `$1,729.73`.
    pub amount: String,
    /// Conversion caption, e.g. `1 CAD ~ 1230 NGN`.
    pub conversion: String,
}

/// A transaction row in the wallet detail sheet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionRecord {
    pub id: u32,
    pub title: String,
    /// Signed amount with symbol, e.g. `- $100`.
    pub amount: String,
    pub date: NaiveDate,
    pub debit_credit: DebitCredit,
}

impl TransactionRecord {
    pub fn is_outgoing(&self) -> bool {
        self.debit_credit == DebitCredit::Debit
    }

    /// Date as shown in lists, e.g. `Oct 08, 2024`.
    pub fn display_date(&self) -> String {
        self.date.format("%b %d, %Y").to_string()
    }
}

/// Account holder profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub full_name: String,
    pub account_balance: Decimal,
    pub currency: String,
    pub account_number: String,
}

/// Partial profile used for updates; `None` fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub account_balance: Option<Decimal>,
    pub currency: Option<String>,
    pub account_number: Option<String>,
}

impl UserProfile {
    /// Apply an update. The full name follows the first and last names.
    pub fn merge(mut self, update: ProfileUpdate) -> Self {
        if let Some(first_name) = update.first_name {
            self.first_name = first_name;
        }
        if let Some(last_name) = update.last_name {
            self.last_name = last_name;
        }
        if let Some(balance) = update.account_balance {
            self.account_balance = balance;
        }
        if let Some(currency) = update.currency {
            self.currency = currency;
        }
        if let Some(account_number) = update.account_number {
            self.account_number = account_number;
        }
        self.full_name = format!("{} {}", self.first_name, self.last_name);
        self
    }
}

/// Envelope returned by every data provider call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub data: T,
    pub success: bool,
    pub message: Option<String>,
    pub timestamp: DateTime<Utc>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T, message: impl Into<String>) -> Self {
        Self {
            data,
            success: true,
            message: Some(message.into()),
            timestamp: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    #[test]
    fn test_currency_from_str() {
        assert_eq!("cad".parse::<Currency>().unwrap(), Currency::Cad);
        assert_eq!(" NGN ".parse::<Currency>().unwrap(), Currency::Ngn);
        assert!("usd".parse::<Currency>().is_err());
    }

    #[test]
    fn test_currency_symbols() {
        assert_eq!(Currency::Cad.symbol(), "$");
        assert_eq!(Currency::Ngn.symbol(), "₦");
        assert_eq!(Currency::Ngn.to_string(), "NGN");
    }

    #[test]
    fn test_debit_credit_from_str() {
        assert_eq!("-".parse::<DebitCredit>().unwrap(), DebitCredit::Debit);
        assert_eq!(" out ".parse::<DebitCredit>().unwrap(), DebitCredit::Debit);
        assert_eq!("Credit".parse::<DebitCredit>().unwrap(), DebitCredit::Credit);
        assert!(matches!(
            "crdt".parse::<DebitCredit>(),
            Err(Error::InvalidConfig(_))
        ));
        assert_eq!(DebitCredit::Debit.sign(), "-");
        assert_eq!(DebitCredit::Credit.code(), "C");
    }

    #[test]
    fn test_pair_rejects_same_currency() {
        assert!(CurrencyPair::new(Currency::Cad, Currency::Cad).is_err());
    }

    #[test]
    fn test_pair_counterpart_and_direction() {
        let pair = CurrencyPair::default();
        assert_eq!(pair.counterpart(Currency::Cad), Some(Currency::Ngn));
        assert_eq!(pair.counterpart(Currency::Ngn), Some(Currency::Cad));
        assert_eq!(pair.direction_from(Currency::Cad), Direction::BaseToQuote);
        assert_eq!(pair.direction_from(Currency::Ngn), Direction::QuoteToBase);
    }

    #[test]
    fn test_profile_merge_updates_full_name() {
        let profile = UserProfile {
            id: "user_1".into(),
            first_name: "Mary".into(),
            last_name: "Smith".into(),
            full_name: "Mary Smith".into(),
            account_balance: Decimal::new(1050, 2),
            currency: "USD".into(),
            account_number: "ACC1".into(),
        };
        let merged = profile.merge(ProfileUpdate {
            last_name: Some("Jones".into()),
            ..Default::default()
        });
        assert_eq!(merged.full_name, "Mary Jones");
        assert_eq!(merged.account_balance, Decimal::new(1050, 2));
    }

    #[test]
    fn test_transaction_display_date() {
        let tx = TransactionRecord {
            id: 1,
            title: "CAD Funding from direct deposit".into(),
            amount: "+ $100".into(),
            date: NaiveDate::from_ymd_opt(2024, 10, 4).unwrap(),
            debit_credit: DebitCredit::Credit,
        };
        assert_eq!(tx.display_date(), "Oct 04, 2024");
        assert!(!tx.is_outgoing());
    }
}

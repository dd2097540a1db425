//! YP Bank Wallet Library
//!
//! The logic behind the wallet and currency conversion screens, independent of any UI.
//!
//! # Modules
//!
//! - **amount**: sanitizes typed text into a canonical decimal amount
//! - **conversion**: converts amounts through a fixed exchange rate
//! - **format**: thousands grouping, balance masking and captions
//! - **session**: conversion screen state machine
//! - **wallet**: wallet overview with hidden balances and transaction search
//! - **provider**: fixture and randomized data sources
//!
//! # Examples
//!
//! ## Converting an amount
//!
//! ```
//! use ypbank_wallet::{ConversionSession, Currency, ExchangeRate, SessionAction};
//!
//! let mut session = ConversionSession::new(ExchangeRate::default(), Currency::Cad)?;
//! session.apply(SessionAction::Input("1200.567".into()));
//!
//! let view = session.view();
//! assert_eq!(view.display, "1,200.56");
//! assert_eq!(view.converted, "1,476,688.80");
//! assert!(view.can_submit);
//! # Ok::<(), ypbank_wallet::Error>(())
//! ```
//!
//! ## Hiding a balance
//!
//! ```
//! use ypbank_wallet::format::mask;
//!
//! assert_eq!(mask("$1,729.73"), "$••••••••");
//! ```

pub mod amount;
pub mod config;
pub mod conversion;
pub mod csv_format;
pub mod error;
pub mod format;
pub mod provider;
pub mod session;
pub mod types;
pub mod wallet;

use std::str::FromStr;

// Re-export commonly used types
pub use config::Config;
pub use conversion::ExchangeRate;
pub use error::{Error, Result};
pub use session::{ConversionSession, EntryState, SessionAction, SessionView};
pub use types::{
    Currency, CurrencyPair, DebitCredit, Direction, TransactionRecord, UserProfile, Wallet,
};
pub use wallet::WalletBoard;

/// Output formats for listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable aligned text
    Table,
    /// Comma-separated values
    Csv,
}

impl FromStr for OutputFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "table" | "text" => Ok(OutputFormat::Table),
            "csv" => Ok(OutputFormat::Csv),
            _ => Err(Error::InvalidConfig(format!("unknown output format: {s}"))),
        }
    }
}

/// Which data provider backs the wallet screens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderKind {
    /// Fixed sample data
    Fixture,
    /// Random data with simulated latency and failures
    Random,
}

impl FromStr for ProviderKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "fixture" | "fixtures" => Ok(ProviderKind::Fixture),
            "random" | "mock" => Ok(ProviderKind::Random),
            _ => Err(Error::InvalidConfig(format!("unknown provider: {s}"))),
        }
    }
}

//! Data sources for wallets, transactions and the user profile.
//!
//! There is no backend: [`FixtureProvider`] serves fixed sample data and
//! [`RandomProvider`] generates data with simulated latency and failures.
//! Screens only see resolved values through [`Resource`], which keeps the last
//! good value when a later call fails.

use crate::config::{Config, FailureRates, LatencyConfig};
use crate::conversion::ExchangeRate;
use crate::error::{Error, Result};
use crate::format::{display, format_money};
use crate::types::{
    ApiResponse, Currency, DebitCredit, ProfileUpdate, TransactionRecord, UserProfile, Wallet,
};
use chrono::{Days, NaiveDate, Utc};
use log::{info, warn};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rust_decimal::Decimal;
use std::thread;
use std::time::Duration;

const FIRST_NAMES: [&str; 20] = [
    "James",
    "Mary",
    "John",
    "Patricia",
    "Robert",
    "Jennifer",
    "Michael",
    "Linda",
    "William",
    "Elizabeth",
    "David",
    "Barbara",
    "Richard",
    "Susan",
    "Joseph",
    "Jessica",
    "Thomas",
    "Sarah",
    "Christopher",
    "Karen",
];

const LAST_NAMES: [&str; 20] = [
    "Smith",
    "Johnson",
    "Williams",
    "Brown",
    "Jones",
    "Garcia",
    "Miller",
    "Davis",
    "Rodriguez",
    "Martinez",
    "Hernandez",
    "Lopez",
    "Wilson",
    "Anderson",
    "Thomas",
    "Taylor",
    "Moore",
    "Jackson",
    "Martin",
    "Lee",
];

const BASE36: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Source of everything the wallet screens display.
pub trait DataProvider {
    fn wallets(&mut self) -> Result<ApiResponse<Vec<Wallet>>>;

    fn transactions(&mut self) -> Result<ApiResponse<Vec<TransactionRecord>>>;

    fn user_profile(&mut self) -> Result<ApiResponse<UserProfile>>;

    fn update_user_profile(
        &mut self,
        user_id: &str,
        update: ProfileUpdate,
    ) -> Result<ApiResponse<UserProfile>>;
}

/// Deterministic sample data. Never fails, never sleeps.
#[derive(Debug, Clone)]
pub struct FixtureProvider {
    profile: UserProfile,
}

impl Default for FixtureProvider {
    fn default() -> Self {
        Self {
            profile: Self::profile_data(),
        }
    }
}

impl FixtureProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// The two sample wallets.
    pub fn wallet_data() -> Vec<Wallet> {
        vec![
            Wallet {
                id: 1,
                title: "CAD Balance".to_string(),
                currency: Currency::Cad,
                amount: "$1,729.73".to_string(),
                conversion: "1260 NGN ~ 1 CAD".to_string(),
            },
            Wallet {
                id: 2,
                title: "NGN Balance".to_string(),
                currency: Currency::Ngn,
                amount: "₦350,000".to_string(),
                conversion: "1 CAD ~ 1260 NGN".to_string(),
            },
        ]
    }

    /// Six sample transactions alternating between transfers out and deposits.
    pub fn transaction_data() -> Vec<TransactionRecord> {
        let transfer_date = NaiveDate::from_ymd_opt(2024, 10, 8).unwrap_or_default();
        let deposit_date = NaiveDate::from_ymd_opt(2024, 10, 4).unwrap_or_default();

        (1..=6)
            .map(|id| {
                if id % 2 == 1 {
                    TransactionRecord {
                        id,
                        title: "Transfer from CAD Wallet to an External CAD Account".to_string(),
                        amount: "- $100".to_string(),
                        date: transfer_date,
                        debit_credit: DebitCredit::Debit,
                    }
                } else {
                    TransactionRecord {
                        id,
                        title: "CAD Funding from direct deposit".to_string(),
                        amount: "+ $100".to_string(),
                        date: deposit_date,
                        debit_credit: DebitCredit::Credit,
                    }
                }
            })
            .collect()
    }

    pub fn profile_data() -> UserProfile {
        UserProfile {
            id: "user_fixture".to_string(),
            first_name: "Mary".to_string(),
            last_name: "Smith".to_string(),
            full_name: "Mary Smith".to_string(),
            account_balance: Decimal::new(172973, 2),
            currency: "USD".to_string(),
            account_number: "ACCFIXTURE000001".to_string(),
        }
    }
}

impl DataProvider for FixtureProvider {
    fn wallets(&mut self) -> Result<ApiResponse<Vec<Wallet>>> {
        Ok(ApiResponse::ok(Self::wallet_data(), "Wallets fetched successfully"))
    }

    fn transactions(&mut self) -> Result<ApiResponse<Vec<TransactionRecord>>> {
        Ok(ApiResponse::ok(
            Self::transaction_data(),
            "Transactions fetched successfully",
        ))
    }

    fn user_profile(&mut self) -> Result<ApiResponse<UserProfile>> {
        Ok(ApiResponse::ok(
            self.profile.clone(),
            "User profile fetched successfully",
        ))
    }

    fn update_user_profile(
        &mut self,
        user_id: &str,
        update: ProfileUpdate,
    ) -> Result<ApiResponse<UserProfile>> {
        if user_id != self.profile.id {
            return Err(Error::Provider(format!("Unknown user: {user_id}")));
        }
        self.profile = self.profile.clone().merge(update);
        Ok(ApiResponse::ok(
            self.profile.clone(),
            "User profile updated successfully",
        ))
    }
}

/// Randomly generated data with simulated latency and occasional failures.
#[derive(Debug, Clone)]
pub struct RandomProvider<R = StdRng> {
    rng: R,
    rate: ExchangeRate,
    latency: LatencyConfig,
    failure_rate: FailureRates,
}

impl RandomProvider<StdRng> {
    /// Entropy-seeded provider using the latency and failure settings from `config`.
    pub fn new(config: &Config) -> Result<Self> {
        Self::with_rng(StdRng::from_entropy(), config)
    }

    /// Reproducible provider.
    pub fn seeded(config: &Config, seed: u64) -> Result<Self> {
        Self::with_rng(StdRng::seed_from_u64(seed), config)
    }
}

impl<R: Rng> RandomProvider<R> {
    pub fn with_rng(rng: R, config: &Config) -> Result<Self> {
        Ok(Self {
            rng,
            rate: config.exchange_rate()?,
            latency: config.latency,
            failure_rate: config.failure_rate,
        })
    }

    pub fn with_latency(mut self, latency: LatencyConfig) -> Self {
        self.latency = latency;
        self
    }

    pub fn with_failure_rate(mut self, failure_rate: FailureRates) -> Self {
        self.failure_rate = failure_rate;
        self
    }

    fn wait(&self, delay: Duration) {
        if !delay.is_zero() {
            thread::sleep(delay);
        }
    }

    /// Fail with probability `probability`.
    fn roll_failure(&mut self, probability: f64, message: &str) -> Result<()> {
        if self.rng.gen::<f64>() < probability {
            warn!("Simulated failure: {}", message);
            return Err(Error::Provider(message.to_string()));
        }
        Ok(())
    }

    fn base36(&mut self, len: usize) -> String {
        (0..len)
            .map(|_| BASE36[self.rng.gen_range(0..BASE36.len())] as char)
            .collect()
    }

    fn pick<'a>(&mut self, items: &[&'a str]) -> &'a str {
        items[self.rng.gen_range(0..items.len())]
    }

    /// Uniform in `[0, upper)` with two decimals.
    fn random_amount(&mut self, upper: u64) -> Decimal {
        let cents = self.rng.gen_range(0..upper * 100);
        Decimal::new(cents as i64, 2)
    }

    /// A fresh random profile.
    pub fn generate_profile(&mut self) -> UserProfile {
        let first_name = self.pick(&FIRST_NAMES);
        let last_name = self.pick(&LAST_NAMES);
        let millis = Utc::now().timestamp_millis().to_string();
        let tail = &millis[millis.len().saturating_sub(6)..];

        UserProfile {
            id: format!("user_{}_{}", millis, self.base36(7)),
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            full_name: format!("{first_name} {last_name}"),
            account_balance: self.random_amount(100_000),
            currency: "USD".to_string(),
            account_number: format!("ACC{}{}", self.base36(8).to_uppercase(), tail),
        }
    }

    fn generate_wallets(&mut self) -> Vec<Wallet> {
        let pair = self.rate.pair();
        let rate = self.rate.rate().normalize();
        let base_balance = self.random_amount(100_000);
        let quote_balance = self.random_amount(10_000_000);

        vec![
            Wallet {
                id: 1,
                title: format!("{} Balance", pair.base),
                currency: pair.base,
                amount: format_money(pair.base, base_balance),
                conversion: format!("{} {} ~ 1 {}", rate, pair.quote, pair.base),
            },
            Wallet {
                id: 2,
                title: format!("{} Balance", pair.quote),
                currency: pair.quote,
                amount: format_money(pair.quote, quote_balance),
                conversion: format!("1 {} ~ {} {}", pair.base, rate, pair.quote),
            },
        ]
    }

    fn generate_transactions(&mut self) -> Vec<TransactionRecord> {
        let base = self.rate.pair().base;
        let today = Utc::now().date_naive();
        let count = self.rng.gen_range(4..=10);

        let mut transactions: Vec<TransactionRecord> = (1..=count)
            .map(|id| {
                let debit_credit = if self.rng.gen_bool(0.5) {
                    DebitCredit::Debit
                } else {
                    DebitCredit::Credit
                };
                let title = match debit_credit {
                    DebitCredit::Debit => {
                        format!("Transfer from {base} Wallet to an External {base} Account")
                    }
                    DebitCredit::Credit => format!("{base} Funding from direct deposit"),
                };
                let value = self.rng.gen_range(1..=500u32).to_string();
                let days_ago = self.rng.gen_range(0..30u64);

                TransactionRecord {
                    id,
                    title,
                    amount: format!("{} {}{}", debit_credit.sign(), base.symbol(), display(&value)),
                    date: today.checked_sub_days(Days::new(days_ago)).unwrap_or(today),
                    debit_credit,
                }
            })
            .collect();

        transactions.sort_by(|a, b| b.date.cmp(&a.date));
        transactions
    }
}

impl<R: Rng> DataProvider for RandomProvider<R> {
    fn wallets(&mut self) -> Result<ApiResponse<Vec<Wallet>>> {
        self.wait(self.latency.list());
        info!("Generating wallets");
        let wallets = self.generate_wallets();
        Ok(ApiResponse::ok(wallets, "Wallets fetched successfully"))
    }

    fn transactions(&mut self) -> Result<ApiResponse<Vec<TransactionRecord>>> {
        self.wait(self.latency.list());
        info!("Generating transactions");
        let transactions = self.generate_transactions();
        Ok(ApiResponse::ok(
            transactions,
            "Transactions fetched successfully",
        ))
    }

    fn user_profile(&mut self) -> Result<ApiResponse<UserProfile>> {
        self.wait(self.latency.profile());
        self.roll_failure(
            self.failure_rate.fetch,
            "Failed to fetch user profile. Please try again.",
        )?;
        info!("Generating user profile");
        let profile = self.generate_profile();
        Ok(ApiResponse::ok(profile, "User profile fetched successfully"))
    }

    fn update_user_profile(
        &mut self,
        user_id: &str,
        update: ProfileUpdate,
    ) -> Result<ApiResponse<UserProfile>> {
        self.wait(self.latency.update());
        self.roll_failure(
            self.failure_rate.update,
            "Failed to update user profile. Please try again.",
        )?;
        let mut profile = self.generate_profile().merge(update);
        profile.id = user_id.to_string();
        Ok(ApiResponse::ok(profile, "User profile updated successfully"))
    }
}

/// The last successfully resolved value of an asynchronous-looking call, plus the
/// most recent error, if the latest call failed.
#[derive(Debug, Clone)]
pub struct Resource<T> {
    value: Option<T>,
    error: Option<String>,
}

impl<T> Default for Resource<T> {
    fn default() -> Self {
        Self {
            value: None,
            error: None,
        }
    }
}

impl<T> Resource<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a call result. A failure keeps the previous value.
    pub fn resolve(&mut self, result: Result<T>) -> Result<&T> {
        match result {
            Ok(value) => {
                self.error = None;
                Ok(self.value.insert(value))
            }
            Err(err) => {
                warn!("Keeping last resolved value after error: {}", err);
                self.error = Some(err.to_string());
                Err(err)
            }
        }
    }

    pub fn value(&self) -> Option<&T> {
        self.value.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// The resolved value, or `default` if nothing resolved yet.
    pub fn get_or<'a>(&'a self, default: &'a T) -> &'a T {
        self.value.as_ref().unwrap_or(default)
    }
}

/// Profile state backed by a provider: fetch, refetch and update.
#[derive(Debug)]
pub struct ProfileStore<P> {
    provider: P,
    profile: Resource<UserProfile>,
}

impl<P: DataProvider> ProfileStore<P> {
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            profile: Resource::new(),
        }
    }

    /// Fetch (or refetch) the profile.
    pub fn fetch(&mut self) -> Result<&UserProfile> {
        let result = self.provider.user_profile().map(|response| response.data);
        self.profile.resolve(result)
    }

    /// Update the loaded profile.
    ///
    /// # Errors
    ///
    /// [`Error::NoProfileLoaded`] when nothing has been fetched yet; provider errors
    /// otherwise. Either way the error is also recorded in the store.
    pub fn update(&mut self, update: ProfileUpdate) -> Result<&UserProfile> {
        let Some(user_id) = self.profile.value().map(|profile| profile.id.clone()) else {
            return self.profile.resolve(Err(Error::NoProfileLoaded));
        };
        let result = self
            .provider
            .update_user_profile(&user_id, update)
            .map(|response| response.data);
        self.profile.resolve(result)
    }

    pub fn profile(&self) -> Option<&UserProfile> {
        self.profile.value()
    }

    pub fn error(&self) -> Option<&str> {
        self.profile.error()
    }

    pub fn provider_mut(&mut self) -> &mut P {
        &mut self.provider
    }
}

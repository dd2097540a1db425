//! Runtime configuration, read from an optional JSON file.
//!
//! Every field has a default, so an empty object `{}` is a valid configuration.
//!
//! ```
//! use ypbank_wallet::config::Config;
//!
//! let json = r#"{ "rate": 1260.0, "mask_glyph": "*" }"#;
//! let config = Config::from_read(&mut json.as_bytes())?;
//! assert_eq!(config.mask_glyph, '*');
//! # Ok::<(), ypbank_wallet::Error>(())
//! ```

use crate::conversion::ExchangeRate;
use crate::error::{Error, Result};
use crate::format::{MASK_GLYPH, MASK_MIN_WIDTH};
use crate::types::{Currency, CurrencyPair};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::time::Duration;

/// Simulated network latency per provider call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LatencyConfig {
    pub profile_ms: u64,
    pub update_ms: u64,
    pub list_ms: u64,
}

impl LatencyConfig {
    /// No delay at all.
    pub fn none() -> Self {
        Self {
            profile_ms: 0,
            update_ms: 0,
            list_ms: 0,
        }
    }

    pub fn profile(&self) -> Duration {
        Duration::from_millis(self.profile_ms)
    }

    pub fn update(&self) -> Duration {
        Duration::from_millis(self.update_ms)
    }

    pub fn list(&self) -> Duration {
        Duration::from_millis(self.list_ms)
    }
}

impl Default for LatencyConfig {
    fn default() -> Self {
        Self {
            profile_ms: 800,
            update_ms: 600,
            list_ms: 1000,
        }
    }
}

/// Probability in `[0, 1]` that a simulated call fails.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FailureRates {
    pub fetch: f64,
    pub update: f64,
}

impl FailureRates {
    pub fn none() -> Self {
        Self {
            fetch: 0.0,
            update: 0.0,
        }
    }
}

impl Default for FailureRates {
    fn default() -> Self {
        Self {
            fetch: 0.05,
            update: 0.03,
        }
    }
}

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Base currency of the rate.
    pub base: Currency,
    /// Quote currency of the rate.
    pub quote: Currency,
    /// Units of `quote` per 1 `base`.
    pub rate: f64,
    /// Input currency when the conversion screen opens. Defaults to `base`.
    pub default_from: Option<Currency>,
    pub mask_glyph: char,
    pub mask_min_width: usize,
    pub latency: LatencyConfig,
    pub failure_rate: FailureRates,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base: Currency::Cad,
            quote: Currency::Ngn,
            rate: 1230.0,
            default_from: None,
            mask_glyph: MASK_GLYPH,
            mask_min_width: MASK_MIN_WIDTH,
            latency: LatencyConfig::default(),
            failure_rate: FailureRates::default(),
        }
    }
}

impl Config {
    /// Parse and validate a JSON configuration from any source implementing `Read`.
    pub fn from_read<R: Read>(reader: &mut R) -> Result<Self> {
        let config: Config = serde_json::from_reader(reader)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut file = File::open(path)?;
        Self::from_read(&mut file)
    }

    /// Check value ranges that the type system does not cover.
    pub fn validate(&self) -> Result<()> {
        self.pair()?;
        if !self.rate.is_finite() || self.rate <= 0.0 {
            return Err(Error::InvalidRate(self.rate.to_string()));
        }
        for (name, value) in [
            ("failure_rate.fetch", self.failure_rate.fetch),
            ("failure_rate.update", self.failure_rate.update),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(Error::InvalidConfig(format!(
                    "{name} must be between 0 and 1, got {value}"
                )));
            }
        }
        if self.mask_min_width == 0 {
            return Err(Error::InvalidConfig(
                "mask_min_width must be at least 1".to_string(),
            ));
        }
        if let Some(from) = self.default_from {
            if from != self.base && from != self.quote {
                return Err(Error::InvalidConfig(format!(
                    "default_from {from} is not one of {}/{}",
                    self.base, self.quote
                )));
            }
        }
        Ok(())
    }

    pub fn pair(&self) -> Result<CurrencyPair> {
        CurrencyPair::new(self.base, self.quote)
    }

    pub fn exchange_rate(&self) -> Result<ExchangeRate> {
        ExchangeRate::from_f64(self.pair()?, self.rate)
    }

    pub fn start_currency(&self) -> Currency {
        self.default_from.unwrap_or(self.base)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_empty_object_gives_defaults() {
        let config = Config::from_read(&mut "{}".as_bytes()).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.exchange_rate().unwrap(), ExchangeRate::default());
        assert_eq!(config.start_currency(), Currency::Cad);
    }

    #[test]
    fn test_partial_config() {
        let json = r#"{
            "rate": 1260.5,
            "default_from": "NGN",
            "latency": { "profile_ms": 10 },
            "failure_rate": { "fetch": 0.5 }
        }"#;
        let config = Config::from_read(&mut json.as_bytes()).unwrap();
        assert_eq!(config.start_currency(), Currency::Ngn);
        assert_eq!(config.latency.profile(), Duration::from_millis(10));
        assert_eq!(config.latency.update_ms, 600);
        assert_eq!(config.failure_rate.fetch, 0.5);
        assert_eq!(config.failure_rate.update, 0.03);
        assert_eq!(config.exchange_rate().unwrap().rate().to_string(), "1260.5");
    }

    #[test]
    fn test_rejects_bad_values() {
        for json in [
            r#"{ "rate": 0.0 }"#,
            r#"{ "rate": -1.0 }"#,
            r#"{ "quote": "CAD" }"#,
            r#"{ "failure_rate": { "fetch": 1.5 } }"#,
            r#"{ "mask_min_width": 0 }"#,
            r#"{ "base": "USD" }"#,
            r#"{ "unknown": true }"#,
        ] {
            assert!(Config::from_read(&mut json.as_bytes()).is_err(), "{}", json);
        }
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(
            Config::from_path("/nonexistent/ypbank.json"),
            Err(Error::Io(_))
        ));
    }
}

//! Currency conversion through a fixed exchange rate.
//!
//! A single [`ExchangeRate`] covers both directions of its pair: base to quote
//! multiplies by the rate, quote to base divides by it.

use crate::amount::{is_submittable, normalize, parse_amount, parse_amount_lossy};
use crate::error::{Error, Result};
use crate::types::{CurrencyPair, Direction};
use log::{debug, warn};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

/// Rate used by the conversion screen: 1 CAD = 1230 NGN.
pub const DEFAULT_RATE: Decimal = Decimal::from_parts(1230, 0, 0, false, 0);

/// Number of fractional digits in every converted amount.
pub const CONVERTED_SCALE: u32 = 2;

/// Units of `pair.quote` per 1 unit of `pair.base`. Always positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExchangeRate {
    pair: CurrencyPair,
    rate: Decimal,
}

impl ExchangeRate {
    pub fn new(pair: CurrencyPair, rate: Decimal) -> Result<Self> {
        if rate <= Decimal::ZERO {
            return Err(Error::InvalidRate(rate.to_string()));
        }
        Ok(Self { pair, rate })
    }

    /// Build a rate from a float, e.g. one read from a config file or the command line.
    pub fn from_f64(pair: CurrencyPair, rate: f64) -> Result<Self> {
        if !rate.is_finite() {
            return Err(Error::InvalidRate(rate.to_string()));
        }
        let rate = Decimal::try_from(rate).map_err(|_| Error::InvalidRate(rate.to_string()))?;
        Self::new(pair, rate)
    }

    pub fn pair(&self) -> CurrencyPair {
        self.pair
    }

    pub fn rate(&self) -> Decimal {
        self.rate
    }

    /// Apply the rate without rounding. Returns `None` if the result is beyond decimal range.
    pub fn apply(&self, value: Decimal, direction: Direction) -> Option<Decimal> {
        match direction {
            Direction::BaseToQuote => value.checked_mul(self.rate),
            Direction::QuoteToBase => value.checked_div(self.rate),
        }
    }

    /// Apply the rate in binary floating point, for amounts [`apply`](Self::apply) cannot hold.
    pub fn apply_lossy(&self, value: f64, direction: Direction) -> f64 {
        let rate = self.rate.to_f64().unwrap_or(f64::NAN);
        match direction {
            Direction::BaseToQuote => value * rate,
            Direction::QuoteToBase => value / rate,
        }
    }
}

impl Default for ExchangeRate {
    fn default() -> Self {
        Self {
            pair: CurrencyPair::default(),
            rate: DEFAULT_RATE,
        }
    }
}

/// Round a value to two decimals, halves away from zero, and render it with exactly two
/// fractional digits.
pub fn to_fixed(value: Decimal) -> String {
    let rounded =
        value.round_dp_with_strategy(CONVERTED_SCALE, RoundingStrategy::MidpointAwayFromZero);
    // Large values keep a smaller scale than requested, so pad instead of rescaling
    let text = rounded.to_string();
    let (integer, fraction) = text.split_once('.').unwrap_or((text.as_str(), ""));
    format!("{integer}.{fraction:0<width$}", width = CONVERTED_SCALE as usize)
}

/// Render a float with exactly two fractional digits.
///
/// Only used past decimal range, where every `f64` is a whole number, so the
/// rounding mode of the float formatter never comes into play.
fn float_to_fixed(value: f64) -> String {
    if value.is_finite() {
        format!("{value:.prec$}", prec = CONVERTED_SCALE as usize)
    } else {
        warn!("Converted amount {} is not representable, clamping", value);
        format!("{:.prec$}", f64::MAX, prec = CONVERTED_SCALE as usize)
    }
}

/// Convert an amount through `rate` in the given direction.
///
/// Empty amounts and zero always convert to `"0.00"`. The result is rounded half
/// away from zero to two decimals. Amounts or results beyond decimal range are
/// computed in `f64` instead, so the result is still exactly two decimals but no
/// longer exact in its low digits.
///
/// # Examples
///
/// ```
/// use ypbank_wallet::conversion::{convert, ExchangeRate};
/// use ypbank_wallet::types::Direction;
///
/// let rate = ExchangeRate::default();
/// assert_eq!(convert("1", Direction::BaseToQuote, &rate), "1230.00");
/// assert_eq!(convert("1230", Direction::QuoteToBase, &rate), "1.00");
/// assert_eq!(convert("", Direction::BaseToQuote, &rate), "0.00");
/// ```
pub fn convert(amount: &str, direction: Direction, rate: &ExchangeRate) -> String {
    let canonical = normalize(amount);
    if !is_submittable(&canonical) {
        return "0.00".to_string();
    }

    let converted = match parse_amount(&canonical).and_then(|value| rate.apply(value, direction)) {
        Some(value) => to_fixed(value),
        None => {
            warn!("Converting {} beyond decimal range, falling back to f64", canonical);
            float_to_fixed(rate.apply_lossy(parse_amount_lossy(&canonical), direction))
        }
    };
    debug!("Converted {} {:?} at {} -> {}", canonical, direction, rate.rate, converted);
    converted
}

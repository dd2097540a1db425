//! Display formatting for amounts: thousands grouping, balance masking and captions.

use crate::amount::normalize;
use crate::conversion::{to_fixed, ExchangeRate};
use crate::types::Currency;
use rust_decimal::Decimal;

/// Currency symbols recognised (and kept visible) at the start of a masked balance.
pub const MASK_SYMBOLS: [char; 5] = ['$', '₦', '€', '£', '¥'];

/// Glyph used to hide balance digits.
pub const MASK_GLYPH: char = '•';

/// Masked balances are never shorter than this many glyphs.
pub const MASK_MIN_WIDTH: usize = 6;

/// Insert `,` every three digits from the right of an integer digit string.
pub fn group_thousands(integer: &str) -> String {
    let len = integer.chars().count();
    let mut grouped = String::with_capacity(len + len / 3);
    for (i, c) in integer.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    grouped
}

/// Group the integer part of a plain decimal string, leaving the fraction untouched.
fn group_decimal(value: &str) -> String {
    match value.split_once('.') {
        Some((integer, fraction)) => format!("{}.{}", group_thousands(integer), fraction),
        None => group_thousands(value),
    }
}

/// Render an amount for the input echo, e.g. `1000000.5` as `1,000,000.5`.
///
/// The input is normalized first, so the fraction is at most two digits and is
/// kept exactly as typed (`"5."` stays `"5."`). Empty input gives an empty string
/// so the caller can show its placeholder.
pub fn display(amount: &str) -> String {
    let canonical = normalize(amount);
    if canonical.is_empty() {
        return String::new();
    }
    group_decimal(&canonical)
}

/// Hide a balance such as `$1,729.73`, keeping its leading currency symbol.
pub fn mask(amount: &str) -> String {
    mask_with(amount, MASK_GLYPH, MASK_MIN_WIDTH)
}

/// [`mask`] with a custom glyph and minimum width.
///
/// Every digit, `,` and `.` after the symbol counts toward the width, and short
/// balances are padded up to `min_width` so the length does not reveal small amounts.
pub fn mask_with(amount: &str, glyph: char, min_width: usize) -> String {
    let (symbol, body) = match amount.chars().next() {
        Some(first) if MASK_SYMBOLS.contains(&first) => amount.split_at(first.len_utf8()),
        _ => ("", amount),
    };
    let count = body
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == ',' || *c == '.')
        .count();

    let mut masked = String::from(symbol);
    masked.extend(std::iter::repeat(glyph).take(count.max(min_width)));
    masked
}

/// A value with its currency symbol, two decimals and grouping, e.g. `₦1,476,688.80`.
pub fn format_money(currency: Currency, value: Decimal) -> String {
    format!("{}{}", currency.symbol(), group_decimal(&to_fixed(value)))
}

/// A rate with at least two and at most three fractional digits, grouped.
pub fn format_rate(rate: Decimal) -> String {
    let value = rate.round_dp(3).normalize();
    if value.scale() < 2 {
        group_decimal(&to_fixed(value))
    } else {
        group_decimal(&value.to_string())
    }
}

/// Info bar caption for the conversion screen, e.g. `~ 1 CAD = 1,230.00 NGN`.
///
/// Always quoted from the pair's base currency.
pub fn rate_caption(rate: &ExchangeRate) -> String {
    let pair = rate.pair();
    format!("~ 1 {} = {} {}", pair.base, format_rate(rate.rate()), pair.quote)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::CurrencyPair;
    use pretty_assertions::assert_eq;
    use std::str::FromStr;

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands(""), "");
        assert_eq!(group_thousands("1"), "1");
        assert_eq!(group_thousands("999"), "999");
        assert_eq!(group_thousands("1000"), "1,000");
        assert_eq!(group_thousands("123456789"), "123,456,789");
        assert_eq!(group_thousands("0001000"), "0,001,000");
    }

    #[test]
    fn test_display() {
        assert_eq!(display(""), "");
        assert_eq!(display("1000"), "1,000");
        assert_eq!(display("1000000.5"), "1,000,000.5");
        assert_eq!(display("1200.56"), "1,200.56");
        assert_eq!(display("5."), "5.");
        assert_eq!(display(".75"), ".75");
        assert_eq!(display("12345.6789"), "12,345.67");
    }

    #[test]
    fn test_mask_keeps_symbol() {
        let masked = mask("$1,729.73");
        assert_eq!(masked, "$••••••••");
        assert!(masked.starts_with('$'));
        assert!(masked.chars().skip(1).all(|c| c == MASK_GLYPH));
    }

    #[test]
    fn test_mask_minimum_width() {
        assert_eq!(mask("$5"), "$••••••");
        assert_eq!(mask(""), "••••••");
        assert_eq!(mask("₦350,000"), "₦•••••••");
    }

    #[test]
    fn test_mask_without_symbol() {
        assert_eq!(mask("1,234,567.89"), "••••••••••••");
        assert_eq!(mask("- $100"), "••••••");
    }

    #[test]
    fn test_mask_with_custom_glyph() {
        assert_eq!(mask_with("€12", '*', 4), "€****");
        assert_eq!(mask_with("£1,000,000", '#', 1), "£#########");
    }

    #[test]
    fn test_format_money() {
        assert_eq!(
            format_money(Currency::Ngn, Decimal::from_str("1476688.8").unwrap()),
            "₦1,476,688.80"
        );
        assert_eq!(format_money(Currency::Cad, Decimal::ZERO), "$0.00");
    }

    #[test]
    fn test_format_rate() {
        assert_eq!(format_rate(Decimal::from(1230)), "1,230.00");
        assert_eq!(format_rate(Decimal::from_str("1.5").unwrap()), "1.50");
        assert_eq!(format_rate(Decimal::from_str("0.0008130").unwrap()), "0.001");
        assert_eq!(
            format_rate(Decimal::from_str("1000000000000000000000000000").unwrap()),
            "1,000,000,000,000,000,000,000,000,000.00"
        );
    }

    #[test]
    fn test_rate_caption() {
        assert_eq!(rate_caption(&ExchangeRate::default()), "~ 1 CAD = 1,230.00 NGN");
        let pair = CurrencyPair::new(Currency::Ngn, Currency::Cad).unwrap();
        let inverse = ExchangeRate::new(pair, Decimal::ONE / Decimal::from(1260)).unwrap();
        assert_eq!(rate_caption(&inverse), "~ 1 NGN = 0.001 CAD");
    }
}

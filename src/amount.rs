//! Amount input normalization.
//!
//! Turns whatever the user typed into the amount field into a canonical decimal
//! string: ASCII digits with at most one `.` and at most two fractional digits.
//! Normalization never fails; input that has nothing usable in it becomes the
//! empty string, which means "no amount entered" and is distinct from `"0"`.

use log::debug;
use rust_decimal::Decimal;
use std::str::FromStr;

/// Maximum number of digits kept after the decimal point.
pub const MAX_FRACTION_DIGITS: usize = 2;

/// Sanitize raw text into a canonical amount.
///
/// Every character other than an ASCII digit or `.` is dropped. The first `.`
/// is the decimal separator; later dots are removed and the digits around them
/// join the fractional part, which is then truncated (never rounded) to
/// [`MAX_FRACTION_DIGITS`].
///
/// # Examples
///
/// ```
/// use ypbank_wallet::amount::normalize;
///
/// assert_eq!(normalize("$1,200.567"), "1200.56");
/// assert_eq!(normalize("12.3.4.5"), "12.34");
/// assert_eq!(normalize("abc"), "");
/// ```
pub fn normalize(raw: &str) -> String {
    let sanitized: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();

    match sanitized.split_once('.') {
        None => sanitized,
        Some((integer, rest)) => {
            let fraction: String = rest
                .chars()
                .filter(|c| *c != '.')
                .take(MAX_FRACTION_DIGITS)
                .collect();
            format!("{integer}.{fraction}")
        }
    }
}

/// Parse an amount into an exact decimal value.
///
/// The input is normalized first, so any string is accepted. Empty input and a
/// bare `.` yield zero. A missing integer part (`".5"`) or fractional part
/// (`"5."`) is read as zero digits. Returns `None` when the amount has more
/// integer digits than [`Decimal`] can hold; [`parse_amount_lossy`] still reads it.
pub fn parse_amount(amount: &str) -> Option<Decimal> {
    let Some(literal) = decimal_literal(amount) else {
        return Some(Decimal::ZERO);
    };

    match Decimal::from_str(&literal) {
        Ok(value) => Some(value),
        Err(err) => {
            debug!("Amount {} is beyond decimal range: {}", literal, err);
            None
        }
    }
}

/// Parse an amount as a binary float.
///
/// Unlike [`parse_amount`] this reads amounts of any length, at the precision of `f64`.
pub fn parse_amount_lossy(amount: &str) -> f64 {
    decimal_literal(amount)
        .and_then(|literal| f64::from_str(&literal).ok())
        .unwrap_or(0.0)
}

/// Canonical amount as a literal both `Decimal` and `f64` accept, or `None` if it has no digits.
fn decimal_literal(amount: &str) -> Option<String> {
    let canonical = normalize(amount);
    let (integer, fraction) = canonical
        .split_once('.')
        .unwrap_or((canonical.as_str(), ""));

    if integer.is_empty() && fraction.is_empty() {
        return None;
    }

    let integer = if integer.is_empty() { "0" } else { integer };
    if fraction.is_empty() {
        Some(integer.to_string())
    } else {
        Some(format!("{integer}.{fraction}"))
    }
}

/// Whether an amount can be submitted: it must be non-empty and greater than zero.
///
/// Decided on the digits, so amounts of any length are judged correctly.
pub fn is_submittable(canonical: &str) -> bool {
    canonical.bytes().any(|b| matches!(b, b'1'..=b'9'))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_normalize_empty_and_garbage() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("abc"), "");
        assert_eq!(normalize("  -+ "), "");
    }

    #[test]
    fn test_normalize_strips_non_digits() {
        assert_eq!(normalize("$1,729.73"), "1729.73");
        assert_eq!(normalize("₦350 000"), "350000");
        assert_eq!(normalize("-42"), "42");
        assert_eq!(normalize("１２"), "");
    }

    #[test]
    fn test_normalize_multiple_dots_keeps_first_separator() {
        assert_eq!(normalize("12.3.4.5"), "12.34");
        assert_eq!(normalize("1..5"), "1.5");
        assert_eq!(normalize("..."), ".");
    }

    #[test]
    fn test_normalize_truncates_fraction() {
        assert_eq!(normalize("1200.567"), "1200.56");
        assert_eq!(normalize("0.999"), "0.99");
        assert_eq!(normalize("5."), "5.");
        assert_eq!(normalize(".5"), ".5");
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let inputs = ["", "abc", "12.3.4.5", "$1,729.73", "..9..9..9", "007", "1e10", "5."];
        for input in inputs {
            let once = normalize(input);
            assert_eq!(normalize(&once), once, "input {:?}", input);
            assert!(once.matches('.').count() <= 1);
            if let Some((_, fraction)) = once.split_once('.') {
                assert!(fraction.len() <= MAX_FRACTION_DIGITS);
            }
        }
    }

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount(""), Some(Decimal::ZERO));
        assert_eq!(parse_amount("."), Some(Decimal::ZERO));
        assert_eq!(parse_amount("5."), Some(Decimal::new(5, 0)));
        assert_eq!(parse_amount(".5"), Some(Decimal::new(5, 1)));
        assert_eq!(parse_amount("1200.56"), Some(Decimal::new(120056, 2)));
        assert_eq!(parse_amount("0007"), Some(Decimal::new(7, 0)));
    }

    #[test]
    fn test_parse_amount_beyond_decimal_range() {
        let thirty_ones = "1".repeat(30);
        assert_eq!(parse_amount(&thirty_ones), None);
        assert_eq!(parse_amount_lossy(&thirty_ones), 1.111_111_111_111_111e29);
        assert_eq!(parse_amount(&"9".repeat(40)), None);

        // Leading zeros do not count towards the range
        let padded = format!("{}1", "0".repeat(30));
        assert_eq!(parse_amount(&padded), Some(Decimal::ONE));
    }

    #[test]
    fn test_parse_amount_lossy() {
        assert_eq!(parse_amount_lossy(""), 0.0);
        assert_eq!(parse_amount_lossy("."), 0.0);
        assert_eq!(parse_amount_lossy(".5"), 0.5);
        assert_eq!(parse_amount_lossy("$1,200.56"), 1200.56);
    }

    #[test]
    fn test_is_submittable() {
        assert!(!is_submittable(""));
        assert!(!is_submittable("."));
        assert!(!is_submittable("0"));
        assert!(!is_submittable("0.00"));
        assert!(is_submittable("0.01"));
        assert!(is_submittable("12"));
    }

    #[test]
    fn test_is_submittable_beyond_decimal_range() {
        assert!(is_submittable(&"1".repeat(30)));
        assert!(is_submittable(&format!("{}1", "0".repeat(30))));
        assert!(!is_submittable(&"0".repeat(40)));
    }
}

use num_bigint::BigUint;
use num_traits::Zero;

use super::NanoParseError;

pub const NANO_DECIMALS: usize = 9;

/// Parses a decimal TON amount (`"1"`, `"0.05"`, `"1.5"`) into nano units.
pub fn to_nano(amount: &str) -> Result<BigUint, NanoParseError> {
    let trimmed = amount.trim();
    let (whole, fraction) = trimmed.split_once('.').unwrap_or((trimmed, ""));
    if whole.is_empty() && fraction.is_empty() {
        return Err(NanoParseError::new(amount, "empty amount"));
    }
    if !whole.chars().chain(fraction.chars()).all(|c| c.is_ascii_digit()) {
        return Err(NanoParseError::new(amount, "only digits and one '.' are allowed"));
    }
    if fraction.len() > NANO_DECIMALS {
        return Err(NanoParseError::new(
            amount,
            format!("more than {} fractional digits", NANO_DECIMALS),
        ));
    }
    let digits = format!("{}{:0<width$}", whole, fraction, width = NANO_DECIMALS);
    BigUint::parse_bytes(digits.as_bytes(), 10)
        .ok_or_else(|| NanoParseError::new(amount, "not a number"))
}

/// Formats nano units as a decimal TON amount without trailing zeros.
pub fn from_nano(nano: &BigUint) -> String {
    if nano.is_zero() {
        return "0".to_string();
    }
    let digits = format!("{:0>width$}", nano.to_str_radix(10), width = NANO_DECIMALS + 1);
    let (whole, fraction) = digits.split_at(digits.len() - NANO_DECIMALS);
    let fraction = fraction.trim_end_matches('0');
    if fraction.is_empty() {
        whole.to_string()
    } else {
        format!("{}.{}", whole, fraction)
    }
}

//! Conversions between decimal token strings and base units.

use crate::error::{ErrorCode, Result};
use alloy_primitives::{
    utils::{parse_units, ParseUnits},
    U256,
};

/// Largest `decimals` whose unit fits in a `U256`.
pub const MAX_DECIMALS: u8 = 77;

/// `10^decimals` as a `U256`, with `decimals` capped at [`MAX_DECIMALS`].
pub fn unit(decimals: u8) -> U256 {
    U256::from(10u64).pow(U256::from(decimals.min(MAX_DECIMALS)))
}

/// Whole tokens to base units.
pub fn tokens(whole: u64, decimals: u8) -> U256 {
    U256::from(whole).saturating_mul(unit(decimals))
}

/// Parses a user-entered decimal amount ("1.5") into base units.
pub fn parse_amount(input: &str, decimals: u8) -> Result<U256> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(ErrorCode::InvalidAmount("empty amount".to_string()));
    }
    match parse_units(trimmed, decimals) {
        Ok(ParseUnits::U256(value)) => Ok(value),
        Ok(ParseUnits::I256(_)) => Err(ErrorCode::InvalidAmount(format!(
            "{} is negative",
            trimmed
        ))),
        Err(e) => Err(ErrorCode::InvalidAmount(format!("{}: {}", trimmed, e))),
    }
}

/// Formats base units as a decimal string rounded half-up to `places`
/// fractional digits, e.g. `format_amount(1_234_567, 6, 2) == "1.23"`.
pub fn format_amount(value: U256, decimals: u8, places: u8) -> String {
    let decimals = decimals.min(MAX_DECIMALS);
    let places = places.min(decimals);
    let drop = unit(decimals - places);
    let mut scaled = value / drop;
    if value % drop >= (drop + U256::from(1u64)) / U256::from(2u64) && drop > U256::from(1u64) {
        scaled += U256::from(1u64);
    }

    let base = unit(places);
    let whole = scaled / base;
    if places == 0 {
        return whole.to_string();
    }
    let frac = (scaled % base).to_string();
    format!("{}.{:0>width$}", whole, frac, width = places as usize)
}

/// Full-precision rendering with trailing zeros stripped (`"1.5"`, `"2"`).
pub fn format_exact(value: U256, decimals: u8) -> String {
    let decimals = decimals.min(MAX_DECIMALS);
    let base = unit(decimals);
    let whole = value / base;
    let frac = value % base;
    if frac.is_zero() {
        return whole.to_string();
    }
    let digits = format!("{:0>width$}", frac.to_string(), width = decimals as usize);
    format!("{}.{}", whole, digits.trim_end_matches('0'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_fractional_ether_amounts() {
        assert_eq!(
            parse_amount("1.5", 18).unwrap(),
            U256::from(1_500_000_000_000_000_000u128)
        );
        assert_eq!(parse_amount(" 2 ", 0).unwrap(), U256::from(2u64));
    }

    #[test]
    fn rejects_empty_and_negative_input() {
        assert!(matches!(parse_amount("", 18), Err(ErrorCode::InvalidAmount(_))));
        assert!(matches!(parse_amount("-1", 18), Err(ErrorCode::InvalidAmount(_))));
        assert!(matches!(parse_amount("abc", 18), Err(ErrorCode::InvalidAmount(_))));
    }

    #[test]
    fn rounds_to_requested_places() {
        assert_eq!(format_amount(U256::from(1_234_567u64), 6, 2), "1.23");
        assert_eq!(format_amount(U256::from(1_235_000u64), 6, 2), "1.24");
        assert_eq!(format_amount(U256::from(999_999u64), 6, 2), "1.00");
        assert_eq!(format_amount(tokens(1_000, 18), 18, 0), "1000");
        assert_eq!(format_amount(U256::ZERO, 18, 4), "0.0000");
    }

    #[test]
    fn exact_format_strips_trailing_zeros() {
        assert_eq!(format_exact(U256::from(1_500_000u64), 6), "1.5");
        assert_eq!(format_exact(tokens(2, 18), 18), "2");
        assert_eq!(format_exact(U256::from(1u64), 18), "0.000000000000000001");
    }

    #[test]
    fn oversized_decimals_are_capped() {
        assert_eq!(unit(255), unit(MAX_DECIMALS));
        assert_eq!(format_amount(U256::ZERO, 255, 2), "0.00");
        assert_eq!(format_exact(U256::MAX, 200), format_exact(U256::MAX, MAX_DECIMALS));
    }
}

// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use crate::DonationError;
use alloy::primitives::{
    utils::{parse_units, ParseUnits},
    U256,
};

/// Decimals of the native currency and of every confidential amount the contract expects.
pub const NATIVE_DECIMALS: u8 = 18;

/// Parse a decimal string into base units without rounding.
///
/// Rejects negative values, malformed input and more fractional digits than
/// `decimals` allows.
pub fn parse_base_units(amount: &str, decimals: u8) -> Result<U256, DonationError> {
    let trimmed = amount.trim();
    if trimmed.is_empty() {
        return Err(DonationError::InvalidAmount("amount is empty".to_string()));
    }

    // parse_units truncates excess fractional digits
    if let Some((_, fraction)) = trimmed.split_once('.') {
        if fraction.len() > decimals as usize {
            return Err(DonationError::InvalidAmount(format!(
                "'{trimmed}' has more than {decimals} decimal places"
            )));
        }
    }

    let parsed = parse_units(trimmed, decimals)
        .map_err(|e| DonationError::InvalidAmount(format!("'{trimmed}': {e}")))?;

    match parsed {
        ParseUnits::U256(value) => Ok(value),
        ParseUnits::I256(value) if value.is_zero() => Ok(U256::ZERO),
        ParseUnits::I256(_) => Err(DonationError::InvalidAmount(format!(
            "'{trimmed}' is negative"
        ))),
    }
}

/// Parse a decimal string that must be strictly positive.
pub fn parse_positive_units(amount: &str, decimals: u8) -> Result<U256, DonationError> {
    let value = parse_base_units(amount, decimals)?;
    if value.is_zero() {
        return Err(DonationError::InvalidAmount(format!(
            "'{}' must be greater than zero",
            amount.trim()
        )));
    }
    Ok(value)
}

/// Digits before the decimal point, ignoring leading zeros. `None` unless `amount`
/// is a plain non-negative decimal.
fn integer_digits(amount: &str) -> Option<usize> {
    let (integer, fraction) = amount.split_once('.').unwrap_or((amount, ""));
    let well_formed = !integer.is_empty()
        && integer.bytes().all(|b| b.is_ascii_digit())
        && fraction.bytes().all(|b| b.is_ascii_digit());
    well_formed.then(|| integer.trim_start_matches('0').len())
}

/// Parse a strictly positive decimal amount that must fit a 64-bit encrypted field.
pub fn parse_u64_base_units(amount: &str, decimals: u8) -> Result<u64, DonationError> {
    let trimmed = amount.trim();
    // u64::MAX has 20 digits. Larger values may not even fit a U256 once scaled.
    if integer_digits(trimmed).is_some_and(|digits| digits > 20) {
        return Err(DonationError::AmountOutOfRange(trimmed.to_string()));
    }
    let value = parse_positive_units(trimmed, decimals)?;
    u64::try_from(value).map_err(|_| DonationError::AmountOutOfRange(trimmed.to_string()))
}

/// Parse a plaintext native-currency value attached to a transaction. Zero is allowed.
pub fn parse_native_value(amount: &str) -> Result<U256, DonationError> {
    parse_base_units(amount, NATIVE_DECIMALS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_ether_amounts_to_wei() {
        assert_eq!(
            parse_u64_base_units("0.01", NATIVE_DECIMALS).unwrap(),
            10_000_000_000_000_000
        );
        assert_eq!(
            parse_u64_base_units("10", NATIVE_DECIMALS).unwrap(),
            10_000_000_000_000_000_000
        );
        assert_eq!(parse_u64_base_units(" 1 ", 0).unwrap(), 1);
    }

    #[test]
    fn rejects_zero_and_negative() {
        assert!(matches!(
            parse_u64_base_units("0", NATIVE_DECIMALS),
            Err(DonationError::InvalidAmount(_))
        ));
        assert!(matches!(
            parse_u64_base_units("0.000", NATIVE_DECIMALS),
            Err(DonationError::InvalidAmount(_))
        ));
        assert!(matches!(
            parse_u64_base_units("-1", NATIVE_DECIMALS),
            Err(DonationError::InvalidAmount(_))
        ));
        assert!(matches!(
            parse_u64_base_units("", NATIVE_DECIMALS),
            Err(DonationError::InvalidAmount(_))
        ));
        assert!(matches!(
            parse_u64_base_units("ten", NATIVE_DECIMALS),
            Err(DonationError::InvalidAmount(_))
        ));
    }

    #[test]
    fn rejects_precision_beyond_unit() {
        assert!(matches!(
            parse_u64_base_units("0.0000000000000000001", NATIVE_DECIMALS),
            Err(DonationError::InvalidAmount(_))
        ));
        assert!(matches!(
            parse_u64_base_units("1.0000000000000000001", NATIVE_DECIMALS),
            Err(DonationError::InvalidAmount(_))
        ));
        assert!(matches!(
            parse_u64_base_units("1.5", 0),
            Err(DonationError::InvalidAmount(_))
        ));
    }

    #[test]
    fn u64_boundary() {
        // 2^64 - 1 wei
        assert_eq!(
            parse_u64_base_units("18.446744073709551615", NATIVE_DECIMALS).unwrap(),
            u64::MAX
        );
        assert_eq!(
            parse_u64_base_units("18.446744073709551616", NATIVE_DECIMALS),
            Err(DonationError::AmountOutOfRange(
                "18.446744073709551616".to_string()
            ))
        );
        assert!(matches!(
            parse_u64_base_units("1000", NATIVE_DECIMALS),
            Err(DonationError::AmountOutOfRange(_))
        ));
    }

    #[test]
    fn amounts_beyond_u256_are_out_of_range() {
        let huge = "115792089237316195423570985008687907853269984665640564039458";
        assert_eq!(
            parse_u64_base_units(huge, NATIVE_DECIMALS),
            Err(DonationError::AmountOutOfRange(huge.to_string()))
        );
        let digits = "9".repeat(81);
        assert_eq!(
            parse_u64_base_units(&format!("{digits}.5"), NATIVE_DECIMALS),
            Err(DonationError::AmountOutOfRange(format!("{digits}.5")))
        );
        // leading zeros do not count
        assert_eq!(
            parse_u64_base_units("000000000000000000000001", NATIVE_DECIMALS).unwrap(),
            1_000_000_000_000_000_000
        );
        // malformed input stays invalid whatever its length
        assert!(matches!(
            parse_u64_base_units(&format!("-{digits}"), NATIVE_DECIMALS),
            Err(DonationError::InvalidAmount(_))
        ));
    }

    #[test]
    fn native_value_allows_zero() {
        assert_eq!(parse_native_value("0").unwrap(), U256::ZERO);
        assert_eq!(
            parse_native_value("0.01").unwrap(),
            U256::from(10_000_000_000_000_000u64)
        );
        assert!(parse_native_value("-0.5").is_err());
    }
}

//! Money codec
//!
//! Balances are kept as signed integers counting minor units (cents) so no
//! floating-point drift can creep in. The codec converts between that
//! representation and the two-decimal-place [`Decimal`] used at the edges.
//!
//! Both directions round half-up (ties away from zero). Converting to minor
//! units discards anything beyond the second fractional digit.

use crate::types::LedgerError;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use std::str::FromStr;

/// Number of fractional digits in the external representation
pub const MINOR_UNIT_DIGITS: u32 = 2;

const ROUNDING: RoundingStrategy = RoundingStrategy::MidpointAwayFromZero;

/// Convert a decimal amount into minor units
///
/// Multiplies by 100 and rounds half-up to a whole number.
///
/// # Errors
///
/// Returns `LedgerError::InvalidAmount` if the result does not fit in an `i64`.
pub fn to_minor_units(amount: Decimal) -> Result<i64, LedgerError> {
    amount
        .checked_mul(Decimal::ONE_HUNDRED)
        .map(|scaled| scaled.round_dp_with_strategy(0, ROUNDING))
        .and_then(|rounded| rounded.to_i64())
        .ok_or_else(|| LedgerError::invalid_amount(&amount.to_string()))
}

/// Parse a decimal string and convert it into minor units
///
/// Surrounding whitespace is ignored.
///
/// # Errors
///
/// Returns `LedgerError::InvalidAmount` if the text is not a decimal number
/// or is out of range.
pub fn parse_minor_units(raw: &str) -> Result<i64, LedgerError> {
    let amount = Decimal::from_str(raw.trim()).map_err(|_| LedgerError::invalid_amount(raw))?;
    to_minor_units(amount)
}

/// Convert minor units back into a decimal with exactly two fractional digits
///
/// The sign is preserved, so negative balances come out negative.
pub fn to_decimal(minor_units: i64) -> Decimal {
    Decimal::new(minor_units, MINOR_UNIT_DIGITS).round_dp_with_strategy(MINOR_UNIT_DIGITS, ROUNDING)
}

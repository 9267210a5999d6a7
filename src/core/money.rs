//! Currency rounding
//!
//! Prices are carried as `f64` on the wire and in the store, but every value
//! that gets persisted or summed goes through [`round_to`] first so that the
//! same inputs always produce the same two-decimal output.

use crate::core::error::{ServiceError, ServiceResult};
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::{Decimal, RoundingStrategy};
use std::str::FromStr;

/// Decimal places used for every monetary amount
pub const CURRENCY_PRECISION: u32 = 2;

/// Highest unit price accepted for a food or an order line
pub const MAX_PRICE: f64 = 1_000_000_000.0;

/// Round `value` to `precision` decimal places, ties away from zero
///
/// The value is rounded from its shortest decimal representation, so
/// `2.005` rounds to `2.01` even though the nearest `f64` is slightly below it.
///
/// ```
/// use restaurant::core::money::round_to;
///
/// assert_eq!(round_to(2.005, 2), 2.01);
/// assert_eq!(round_to(-2.005, 2), -2.01);
/// assert_eq!(round_to(3.14159, 2), 3.14);
/// ```
pub fn round_to(value: f64, precision: u32) -> f64 {
    if !value.is_finite() {
        return value;
    }

    match to_decimal(value) {
        Some(decimal) => decimal
            .round_dp_with_strategy(precision, RoundingStrategy::MidpointAwayFromZero)
            .to_f64()
            .unwrap_or(value),
        // Beyond Decimal's 96-bit mantissa every f64 is already integral
        None => value,
    }
}

/// Round a currency amount to [`CURRENCY_PRECISION`]
pub fn round_currency(value: f64) -> f64 {
    round_to(value, CURRENCY_PRECISION)
}

/// Sum currency amounts exactly and round the total
///
/// Fails when an amount has no decimal representation or the total
/// overflows, rather than reporting a wrong sum.
pub fn sum_currency<I>(amounts: I) -> ServiceResult<f64>
where
    I: IntoIterator<Item = f64>,
{
    let mut total = Decimal::ZERO;
    for amount in amounts {
        let amount = to_decimal(amount).ok_or_else(|| {
            ServiceError::Internal(format!("amount {} cannot be summed as currency", amount))
        })?;
        total = total
            .checked_add(amount)
            .ok_or_else(|| ServiceError::Internal("currency total overflowed".to_string()))?;
    }

    Ok(total
        .round_dp_with_strategy(CURRENCY_PRECISION, RoundingStrategy::MidpointAwayFromZero)
        .to_f64()
        .unwrap_or(0.0))
}

/// Shortest decimal representation first, so `2.005` stays `2.005`
fn to_decimal(value: f64) -> Option<Decimal> {
    Decimal::from_str(&value.to_string())
        .ok()
        .or_else(|| Decimal::from_f64(value))
}

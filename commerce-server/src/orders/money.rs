//! Money calculation utilities using rust_decimal for precision
//!
//! Monetary columns are stored as `f64`; every computation runs on
//! `Decimal` and converts back at the storage boundary.

use crate::orders::error::OrderError;
use rust_decimal::prelude::*;

/// Rounding for monetary values (2 decimal places, half-up)
const DECIMAL_PLACES: u32 = 2;

/// Tolerance for monetary comparisons (0.01)
pub const MONEY_TOLERANCE: Decimal = Decimal::from_parts(1, 0, 0, false, 2);

/// Maximum accepted payment amount
const MAX_PAYMENT_AMOUNT: f64 = 1_000_000.0;

/// Convert f64 to Decimal for precise calculation
pub fn to_decimal(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or(Decimal::ZERO)
}

/// Convert Decimal back to f64 for storage, rounded to 2 decimal places
pub fn to_f64(value: Decimal) -> f64 {
    value
        .round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
        .to_f64()
        .unwrap_or(0.0)
}

/// Sum a payment history into a rounded Decimal total
pub fn sum_amounts<I: IntoIterator<Item = f64>>(amounts: I) -> Decimal {
    amounts
        .into_iter()
        .map(to_decimal)
        .sum::<Decimal>()
        .round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
}

/// Validate a payment amount before any write happens
pub fn validate_payment_amount(amount: f64) -> Result<(), OrderError> {
    if !amount.is_finite() {
        return Err(OrderError::InvalidAmount);
    }
    if amount <= 0.0 {
        return Err(OrderError::InvalidAmount);
    }
    if amount > MAX_PAYMENT_AMOUNT {
        return Err(OrderError::InvalidOperation(format!(
            "payment amount exceeds maximum allowed ({}), got {}",
            MAX_PAYMENT_AMOUNT, amount
        )));
    }
    Ok(())
}
